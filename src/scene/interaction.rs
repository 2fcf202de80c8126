use egui::{Key, Pos2, Vec2};
use log::{debug, trace};

use super::{CircleHome, Scene};
use crate::circle::CircleRole;
use crate::id_generator::{CircleId, HullId};
use crate::input::InputEvent;

/// Values captured for one press-drag-release gesture.
///
/// Created on pointer-down and dropped on pointer-up, so nothing captured
/// during one drag can leak into the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub down_pos: Pos2,
    /// Target minus pointer, captured on the first translating move
    pub move_offset: Option<Vec2>,
    /// Radius at the first resizing move
    pub initial_radius: Option<f32>,
}

impl DragSession {
    pub fn new(down_pos: Pos2) -> Self {
        Self {
            down_pos,
            move_offset: None,
            initial_radius: None,
        }
    }
}

/// Pointer state machine. Every state but `Idle` lasts exactly as long as
/// the primary button is held.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pressed over empty canvas
    Pressed(DragSession),
    /// `hull` is the circle's owner at press time, None when uncontained
    DraggingCircle {
        circle: CircleId,
        hull: Option<HullId>,
        session: DragSession,
    },
    DraggingHull { hull: HullId, session: DragSession },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn selected_circle(&self) -> Option<CircleId> {
        match self {
            InteractionState::DraggingCircle { circle, .. } => Some(*circle),
            _ => None,
        }
    }

    /// The dragged hull, or the hull owning the dragged circle
    pub fn selected_hull(&self) -> Option<HullId> {
        match self {
            InteractionState::DraggingHull { hull, .. } => Some(*hull),
            InteractionState::DraggingCircle { hull, .. } => *hull,
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Pressed(session)
            | InteractionState::DraggingCircle { session, .. }
            | InteractionState::DraggingHull { session, .. } => Some(session),
        }
    }
}

impl Scene {
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn selected_circle(&self) -> Option<CircleId> {
        self.interaction.selected_circle()
    }

    pub fn selected_hull(&self) -> Option<HullId> {
        self.interaction.selected_hull()
    }

    /// Starts a gesture. Circles win over the hull boundary they sit on.
    /// Ignored while another gesture is in progress.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if !self.interaction.is_idle() {
            return;
        }

        let session = DragSession::new(pos);
        self.interaction = if let Some(circle) = self.circle_at(pos) {
            let hull = self.owner_of(circle);
            debug!("Selected {}", circle);
            InteractionState::DraggingCircle { circle, hull, session }
        } else if let Some(hull) = self.hull_at(pos) {
            debug!("Selected {}", hull);
            InteractionState::DraggingHull { hull, session }
        } else {
            InteractionState::Pressed(session)
        };
    }

    /// Drags the selection to `pos`. With `resize` set a selected circle
    /// grows as the pointer moves up and shrinks as it moves down.
    pub fn pointer_move(&mut self, pos: Pos2, resize: bool) {
        match self.interaction {
            InteractionState::DraggingCircle {
                circle,
                hull,
                mut session,
            } => {
                if self.drag_circle(circle, &mut session, pos, resize) {
                    self.interaction = InteractionState::DraggingCircle { circle, hull, session };
                }
            }
            InteractionState::DraggingHull { hull, mut session } => {
                if self.drag_hull(hull, &mut session, pos) {
                    self.interaction = InteractionState::DraggingHull { hull, session };
                }
            }
            InteractionState::Idle | InteractionState::Pressed(_) => {}
        }
    }

    fn drag_circle(&mut self, id: CircleId, session: &mut DragSession, pos: Pos2, resize: bool) -> bool {
        let Some(home) = self.locate(id) else {
            debug!("Drag of {} ignored: circle is gone", id);
            return false;
        };
        let config = self.config.clone();
        let Some(member) = self.circle_mut(id) else {
            return false;
        };
        let circle = member.circle_mut();

        if resize {
            let initial = *session.initial_radius.get_or_insert(circle.radius());
            let radius = config.clamp_radius(initial + (session.down_pos.y - pos.y));
            trace!("Resizing {} to {:.1}", id, radius);
            circle.set_radius(radius);
        } else {
            let offset = *session.move_offset.get_or_insert(circle.center() - session.down_pos);
            trace!("Moving {} to {:?}", id, pos + offset);
            circle.set_center(pos + offset);
        }

        if let CircleHome::Hull(hull) = home {
            if let Some(hull) = self.hulls.get_mut(&hull) {
                hull.draw(self.provider.as_ref(), &self.config);
            }
        }
        true
    }

    fn drag_hull(&mut self, id: HullId, session: &mut DragSession, pos: Pos2) -> bool {
        let Some(hull) = self.hulls.get_mut(&id) else {
            debug!("Drag of {} ignored: hull is gone", id);
            return false;
        };

        let translation = hull.translation();
        let offset = *session.move_offset.get_or_insert(translation - session.down_pos.to_vec2());
        let target = pos.to_vec2() + offset;
        trace!("Moving {} by {:?}", id, target - translation);
        hull.translate(target - translation);
        true
    }

    /// Ends the gesture: settles the released circle's membership and drops
    /// the selection with everything captured during the drag.
    pub fn pointer_up(&mut self) {
        let finished = std::mem::take(&mut self.interaction);
        if let InteractionState::DraggingCircle { circle, .. } = finished {
            self.resolve_membership(circle);
        }
    }

    /// Routes one input event. Pointer presses outside the canvas are ignored;
    /// releases are not, so a drag leaving the canvas still ends.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { location } => {
                if location.is_in_canvas {
                    self.pointer_down(location.position);
                }
            }
            InputEvent::PointerMove { location, modifiers } => {
                self.pointer_move(location.position, modifiers.shift);
            }
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::DoubleClick { location, modifiers } => {
                if location.is_in_canvas {
                    let role = if modifiers.alt { CircleRole::outer() } else { CircleRole::Inner };
                    self.create_circle(role, location.position);
                }
            }
            InputEvent::KeyDown { key, .. } => match key {
                Key::Delete | Key::Backspace => {
                    self.delete_selected();
                }
                Key::N => {
                    let id = self.add_hull();
                    // A new hull always takes over as the creation target
                    self.active_hull = Some(id);
                }
                _ => {}
            },
        }
    }
}
