//! The scene owns every hull, the uncontained circles and the pointer
//! interaction, and is the only place where a circle changes owner.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use egui::Pos2;
use log::{debug, info};
use parking_lot::Mutex;

use crate::circle::{Circle, CircleRole, HullCircle, NotchPair};
use crate::config::EditorConfig;
use crate::error::{HullError, HullResult};
use crate::geometry::{GeometryProvider, TangentHullProvider};
use crate::hull::{Hull, HullPath};
use crate::id_generator::{CircleId, HullId, IdGenerator};

mod interaction;
mod snapshot;

pub use interaction::{DragSession, InteractionState};
pub use snapshot::{CircleRecord, HullRecord, SNAPSHOT_VERSION, SceneSnapshot};

/// Scene shared between the UI thread and whoever else holds it. Every
/// mutation goes through the one lock.
pub type SharedScene = Arc<Mutex<Scene>>;

/// Where a circle currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleHome {
    Hull(HullId),
    Uncontained,
}

pub struct Scene {
    config: EditorConfig,
    provider: Box<dyn GeometryProvider>,
    ids: IdGenerator,
    hulls: BTreeMap<HullId, Hull>,
    active_hull: Option<HullId>,
    uncontained: BTreeMap<CircleId, HullCircle>,
    interaction: InteractionState,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("config", &self.config)
            .field("hulls", &self.hulls)
            .field("active_hull", &self.active_hull)
            .field("uncontained", &self.uncontained)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Scene {
    /// Empty scene using the tangent hull provider
    pub fn new(config: EditorConfig) -> Self {
        Self::with_provider(config, Box::new(TangentHullProvider::new()))
    }

    pub fn with_provider(config: EditorConfig, provider: Box<dyn GeometryProvider>) -> Self {
        Self {
            config: config.validated(),
            provider,
            ids: IdGenerator::new(),
            hulls: BTreeMap::new(),
            active_hull: None,
            uncontained: BTreeMap::new(),
            interaction: InteractionState::Idle,
        }
    }

    pub fn into_shared(self) -> SharedScene {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the config and redraws every hull with it
    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config.validated();
        self.redraw_all();
    }

    pub fn provider(&self) -> &dyn GeometryProvider {
        self.provider.as_ref()
    }

    // Hulls

    /// Creates an empty hull. It becomes active when no hull is.
    pub fn add_hull(&mut self) -> HullId {
        let id = self.ids.next_hull_id();
        self.hulls.insert(id, Hull::new(id));
        if self.active_hull.is_none() {
            self.active_hull = Some(id);
        }
        info!("Created {}", id);
        id
    }

    /// Removes a hull. Its members become uncontained, losing any notch.
    pub fn remove_hull(&mut self, id: HullId) -> HullResult<()> {
        let mut hull = self.hulls.remove(&id).ok_or(HullError::UnknownHull(id))?;
        hull.erase();

        let members: Vec<CircleId> = hull.circles().map(HullCircle::id).collect();
        for circle_id in members {
            if let Some(mut member) = hull.remove_circle(circle_id) {
                if member.role().is_outer() {
                    member.set_role(CircleRole::outer());
                }
                self.uncontained.insert(circle_id, member);
            }
        }

        if self.active_hull == Some(id) {
            self.active_hull = self.hulls.keys().next().copied();
        }
        if self.interaction.selected_hull() == Some(id) {
            self.interaction = InteractionState::Idle;
        }

        info!("Removed {}", id);
        Ok(())
    }

    pub fn set_active_hull(&mut self, id: HullId) -> HullResult<()> {
        if !self.hulls.contains_key(&id) {
            return Err(HullError::UnknownHull(id));
        }
        debug!("Active hull is now {}", id);
        self.active_hull = Some(id);
        Ok(())
    }

    pub fn active_hull(&self) -> Option<HullId> {
        self.active_hull
    }

    pub fn hull(&self, id: HullId) -> Option<&Hull> {
        self.hulls.get(&id)
    }

    pub fn hulls(&self) -> impl Iterator<Item = &Hull> {
        self.hulls.values()
    }

    pub fn hull_count(&self) -> usize {
        self.hulls.len()
    }

    /// Circles that belong to no hull
    pub fn uncontained(&self) -> impl Iterator<Item = &HullCircle> {
        self.uncontained.values()
    }

    /// Topmost hull whose boundary contains `pos`
    pub fn hull_at(&self, pos: Pos2) -> Option<HullId> {
        self.hulls.values().rev().find(|hull| hull.hit_test(pos)).map(Hull::id)
    }

    /// Topmost circle under `pos`. Uncontained circles paint last, so they
    /// are checked first.
    pub fn circle_at(&self, pos: Pos2) -> Option<CircleId> {
        self.uncontained
            .values()
            .rev()
            .find(|member| member.circle().contains(pos))
            .map(HullCircle::id)
            .or_else(|| self.hulls.values().rev().find_map(|hull| hull.circle_at(pos)))
    }

    /// Redraws one hull and returns its new path, if any
    pub fn redraw_hull(&mut self, id: HullId) -> HullResult<Option<&HullPath>> {
        let hull = self.hulls.get_mut(&id).ok_or(HullError::UnknownHull(id))?;
        Ok(hull.draw(self.provider.as_ref(), &self.config))
    }

    pub fn redraw_all(&mut self) {
        for hull in self.hulls.values_mut() {
            hull.draw(self.provider.as_ref(), &self.config);
        }
    }

    // Circles

    pub fn locate(&self, id: CircleId) -> Option<CircleHome> {
        if self.uncontained.contains_key(&id) {
            return Some(CircleHome::Uncontained);
        }
        self.owner_of(id).map(CircleHome::Hull)
    }

    /// The hull a circle is a member of
    pub fn owner_of(&self, id: CircleId) -> Option<HullId> {
        self.hulls.values().find(|hull| hull.has_circle(id)).map(Hull::id)
    }

    pub fn circle(&self, id: CircleId) -> Option<&HullCircle> {
        match self.locate(id)? {
            CircleHome::Uncontained => self.uncontained.get(&id),
            CircleHome::Hull(hull) => self.hulls.get(&hull)?.circle(id),
        }
    }

    pub fn circle_count(&self) -> usize {
        self.uncontained.len() + self.hulls.values().map(Hull::circle_count).sum::<usize>()
    }

    fn circle_mut(&mut self, id: CircleId) -> Option<&mut HullCircle> {
        match self.locate(id)? {
            CircleHome::Uncontained => self.uncontained.get_mut(&id),
            CircleHome::Hull(hull) => self.hulls.get_mut(&hull)?.circle_mut(id),
        }
    }

    /// Detaches a circle from wherever it lives and redraws the hull it left
    fn take_circle(&mut self, id: CircleId) -> Option<(CircleHome, HullCircle)> {
        let home = self.locate(id)?;
        let taken = match home {
            CircleHome::Uncontained => self.uncontained.remove(&id)?,
            CircleHome::Hull(hull_id) => {
                let hull = self.hulls.get_mut(&hull_id)?;
                let taken = hull.remove_circle(id)?;
                hull.draw(self.provider.as_ref(), &self.config);
                taken
            }
        };
        Some((home, taken))
    }

    /// The active hull, created on demand
    fn ensure_active_hull(&mut self) -> HullId {
        match self.active_hull {
            Some(id) if self.hulls.contains_key(&id) => id,
            _ => {
                let id = self.add_hull();
                self.active_hull = Some(id);
                id
            }
        }
    }

    /// Creates a circle with the configured default radius
    pub fn create_circle(&mut self, role: CircleRole, pos: Pos2) -> CircleId {
        let radius = self.config.default_radius;
        self.create_circle_with_radius(role, pos, radius)
    }

    /// Creates a circle and places it.
    ///
    /// Outer circles always join the active hull. Inner circles join while
    /// the hull is still below its inner minimum, and afterwards only when
    /// they fit inside its boundary; otherwise they are left uncontained.
    pub fn create_circle_with_radius(&mut self, role: CircleRole, pos: Pos2, radius: f32) -> CircleId {
        let hull_id = self.ensure_active_hull();
        let id = self.ids.next_circle_id();
        let circle = HullCircle::new(Circle::new(id, pos, self.config.clamp_radius(radius)), role);

        let accepted = role.is_outer() || self.accepts(hull_id, &circle);
        if accepted {
            if let Some(hull) = self.hulls.get_mut(&hull_id) {
                hull.add_circle(circle);
                hull.draw(self.provider.as_ref(), &self.config);
            }
            info!("Created {} in {}", id, hull_id);
        } else {
            self.uncontained.insert(id, circle);
            info!("Created {} uncontained", id);
        }
        id
    }

    /// Whether the hull takes `circle` on placement: unconditionally while it
    /// has too few inner circles, by containment afterwards.
    fn accepts(&self, hull_id: HullId, circle: &HullCircle) -> bool {
        let Some(hull) = self.hulls.get(&hull_id) else {
            return false;
        };
        hull.inner_count() < self.config.min_inner_circles || circle.is_inside(hull, self.provider.as_ref())
    }

    /// Deletes a circle from wherever it lives
    pub fn delete_circle(&mut self, id: CircleId) -> HullResult<()> {
        self.take_circle(id).ok_or(HullError::UnknownCircle(id))?;
        if self.interaction.selected_circle() == Some(id) {
            self.interaction = InteractionState::Idle;
        }
        info!("Deleted {}", id);
        Ok(())
    }

    /// Deletes the selected circle, or the selected hull with its members.
    /// Returns false when nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        if let Some(circle) = self.interaction.selected_circle() {
            return self.delete_circle(circle).is_ok();
        }

        let Some(hull_id) = self.interaction.selected_hull() else {
            debug!("Nothing selected to delete");
            return false;
        };
        let members: Vec<CircleId> = self
            .hulls
            .get(&hull_id)
            .map(|hull| hull.circles().map(HullCircle::id).collect())
            .unwrap_or_default();
        if let Some(hull) = self.hulls.get_mut(&hull_id) {
            for id in members {
                hull.remove_circle(id);
                info!("Deleted {}", id);
            }
        }
        self.remove_hull(hull_id).is_ok()
    }

    /// Moves a circle into `target`, atomically leaving its old home
    fn transfer(&mut self, id: CircleId, target: HullId) -> HullResult<()> {
        if !self.hulls.contains_key(&target) {
            return Err(HullError::UnknownHull(target));
        }
        let (from, circle) = self.take_circle(id).ok_or(HullError::UnknownCircle(id))?;

        if let Some(hull) = self.hulls.get_mut(&target) {
            hull.add_circle(circle);
            hull.draw(self.provider.as_ref(), &self.config);
        }
        match from {
            CircleHome::Hull(origin) => info!("{} moved from {} to {}", id, origin, target),
            CircleHome::Uncontained => info!("{} joined {}", id, target),
        }
        Ok(())
    }

    /// Decides where a released circle belongs.
    ///
    /// Members of the active hull and outer circles stay where they are. Any
    /// other inner circle moves into the active hull if the hull accepts it.
    /// An uncontained circle is accepted unconditionally while the hull is
    /// below its inner minimum; a member of another hull only by containment.
    /// A rejected circle stays in its current home.
    pub fn resolve_membership(&mut self, id: CircleId) {
        let Some(active) = self.active_hull else {
            return;
        };
        let Some(home) = self.locate(id) else {
            debug!("Membership of {} not resolved: circle is gone", id);
            return;
        };
        if home == CircleHome::Hull(active) {
            return;
        }
        let Some(circle) = self.circle(id) else {
            return;
        };
        if circle.role().is_outer() {
            return;
        }

        let accepted = match home {
            CircleHome::Uncontained => self.accepts(active, circle),
            CircleHome::Hull(_) => self
                .hulls
                .get(&active)
                .is_some_and(|hull| circle.is_inside(hull, self.provider.as_ref())),
        };

        if accepted {
            if let Err(err) = self.transfer(id, active) {
                debug!("Membership of {} not resolved: {}", id, err);
            }
        } else {
            debug!("{} rejected by {}", id, active);
        }
    }

    // Outer circle pairing

    /// Pairs an outer circle with two inner circles of the same hull, so the
    /// boundary dips around the outer circle between them.
    pub fn pair_outer_circle(&mut self, outer: CircleId, a: CircleId, b: CircleId) -> HullResult<()> {
        let hull_id = self.owner_of(outer).ok_or(HullError::UnknownCircle(outer))?;
        if a == b {
            return Err(HullError::InvalidPairing(format!("{} cannot pair with itself", a)));
        }

        let hull = self.hulls.get_mut(&hull_id).ok_or(HullError::UnknownHull(hull_id))?;
        for id in [a, b] {
            let member = hull.circle(id).ok_or_else(|| {
                HullError::InvalidPairing(format!("{} is not in {}", id, hull_id))
            })?;
            if !member.role().is_inner() {
                return Err(HullError::InvalidPairing(format!("{} is not an inner circle", id)));
            }
        }
        let is_outer = hull.circle(outer).is_some_and(|member| member.role().is_outer());
        if !is_outer {
            return Err(HullError::InvalidPairing(format!("{} is not an outer circle", outer)));
        }

        hull.set_role(outer, CircleRole::Outer { notch: Some(NotchPair { a, b }) });
        hull.draw(self.provider.as_ref(), &self.config);
        info!("Paired {} between {} and {}", outer, a, b);
        Ok(())
    }

    pub fn unpair_outer_circle(&mut self, outer: CircleId) -> HullResult<()> {
        let hull_id = self.owner_of(outer).ok_or(HullError::UnknownCircle(outer))?;
        let hull = self.hulls.get_mut(&hull_id).ok_or(HullError::UnknownHull(hull_id))?;

        let is_outer = hull.circle(outer).is_some_and(|member| member.role().is_outer());
        if !is_outer {
            return Err(HullError::InvalidPairing(format!("{} is not an outer circle", outer)));
        }

        hull.set_role(outer, CircleRole::outer());
        hull.draw(self.provider.as_ref(), &self.config);
        info!("Unpaired {}", outer);
        Ok(())
    }
}
