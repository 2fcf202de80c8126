use std::collections::{BTreeMap, BTreeSet};

use egui::{Pos2, Vec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{InteractionState, Scene};
use crate::circle::{Circle, CircleRole, HullCircle};
use crate::config::EditorConfig;
use crate::error::{HullError, HullResult};
use crate::geometry::GeometryProvider;
use crate::hull::Hull;
use crate::id_generator::{CircleId, HullId, IdGenerator};

pub const SNAPSHOT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One circle with its owner. `hull` is None for uncontained circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleRecord {
    pub id: CircleId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub role: CircleRole,
    pub hull: Option<HullId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullRecord {
    pub id: HullId,
    /// Accumulated drag translation
    #[serde(default)]
    pub translation: (f32, f32),
}

/// Everything needed to rebuild a scene. Boundaries are not stored; they
/// are redrawn on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub version: String,
    pub config: EditorConfig,
    pub hulls: Vec<HullRecord>,
    pub circles: Vec<CircleRecord>,
    pub active: Option<HullId>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> HullResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> HullResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Scene {
    pub fn snapshot(&self) -> SceneSnapshot {
        let record = |member: &HullCircle, hull: Option<HullId>| {
            let circle = member.circle();
            CircleRecord {
                id: circle.id(),
                x: circle.center().x,
                y: circle.center().y,
                radius: circle.radius(),
                role: member.role(),
                hull,
            }
        };

        let mut circles = Vec::with_capacity(self.circle_count());
        for hull in self.hulls.values() {
            circles.extend(hull.circles().map(|member| record(member, Some(hull.id()))));
        }
        circles.extend(self.uncontained.values().map(|member| record(member, None)));

        SceneSnapshot {
            version: SNAPSHOT_VERSION.to_string(),
            config: self.config.clone(),
            hulls: self
                .hulls
                .values()
                .map(|hull| HullRecord {
                    id: hull.id(),
                    translation: (hull.translation().x, hull.translation().y),
                })
                .collect(),
            circles,
            active: self.active_hull,
        }
    }

    /// Rebuilds a scene from a snapshot and draws every hull.
    ///
    /// Fails on repeated or out-of-range ids, on records that name a missing
    /// hull, and on notches that pair a circle with itself or whose circles
    /// are not inner members of the outer circle's hull.
    pub fn restore(snapshot: SceneSnapshot, provider: Box<dyn GeometryProvider>) -> HullResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "Restoring snapshot from version {} into {}",
                snapshot.version, SNAPSHOT_VERSION
            );
        }

        let mut ids = IdGenerator::new();
        let mut hulls = BTreeMap::new();
        for record in &snapshot.hulls {
            if hulls.contains_key(&record.id) {
                return Err(HullError::DuplicateHull(record.id));
            }
            ids.reserve_hull(record.id)?;
            let mut hull = Hull::new(record.id);
            let (x, y) = record.translation;
            hull.translate(Vec2::new(x, y));
            hulls.insert(record.id, hull);
        }

        let mut uncontained = BTreeMap::new();
        let mut seen = BTreeSet::new();
        for record in &snapshot.circles {
            // A circle has exactly one home
            if !seen.insert(record.id) {
                return Err(HullError::DuplicateCircle(record.id));
            }
            ids.reserve_circle(record.id)?;
            let circle = Circle::new(record.id, Pos2::new(record.x, record.y), record.radius);
            let member = HullCircle::new(circle, record.role);
            match record.hull {
                Some(hull_id) => hulls
                    .get_mut(&hull_id)
                    .ok_or(HullError::UnknownHull(hull_id))?
                    .add_circle(member),
                None => {
                    uncontained.insert(record.id, member);
                }
            }
        }

        for record in &snapshot.circles {
            let (Some(pair), Some(hull_id)) = (record.role.notch(), record.hull) else {
                continue;
            };
            if pair.a == pair.b {
                return Err(HullError::InvalidPairing(format!(
                    "{} notches between {} and itself",
                    record.id, pair.a
                )));
            }
            let hull = hulls.get(&hull_id).ok_or(HullError::UnknownHull(hull_id))?;
            for id in [pair.a, pair.b] {
                if !hull.circle(id).is_some_and(|member| member.role().is_inner()) {
                    return Err(HullError::InvalidPairing(format!(
                        "{} notches on {}, which is not an inner circle of {}",
                        record.id, id, hull_id
                    )));
                }
            }
        }

        if let Some(active) = snapshot.active {
            if !hulls.contains_key(&active) {
                return Err(HullError::UnknownHull(active));
            }
        }

        let mut scene = Scene {
            config: snapshot.config.validated(),
            provider,
            ids,
            hulls,
            active_hull: snapshot.active,
            uncontained,
            interaction: InteractionState::Idle,
        };
        scene.redraw_all();

        info!(
            "Restored {} hulls and {} circles",
            scene.hull_count(),
            scene.circle_count()
        );
        Ok(scene)
    }
}
