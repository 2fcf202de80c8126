use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Editor-level input, decoupled from egui's raw event stream.
///
/// Only the primary button drives the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
    },
    PointerUp {
        location: InputLocation,
    },
    /// Pointer moved; `modifiers.shift` turns a circle drag into a resize
    PointerMove {
        location: InputLocation,
        modifiers: Modifiers,
    },
    /// Creates a circle; `modifiers.alt` makes it an outer one
    DoubleClick {
        location: InputLocation,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location }
            | InputEvent::PointerUp { location }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::DoubleClick { location, .. } => location.is_in_canvas,
            InputEvent::KeyDown { .. } => false,
        }
    }
}

/// Handles converting raw egui input into InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_location(pos: Pos2, canvas_rect: Rect) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_canvas: canvas_rect.contains(pos),
        }
    }

    /// Collects this frame's events, in the order the editor should see them
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let modifiers = input.modifiers;
            let hover = input.pointer.hover_pos();

            if let Some(pos) = hover {
                if input.pointer.button_pressed(PointerButton::Primary) {
                    events.push(InputEvent::PointerDown {
                        location: Self::make_location(pos, canvas_rect),
                    });
                }

                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: Self::make_location(pos, canvas_rect),
                        modifiers,
                    });
                }

                if input.pointer.button_double_clicked(PointerButton::Primary) {
                    events.push(InputEvent::DoubleClick {
                        location: Self::make_location(pos, canvas_rect),
                        modifiers,
                    });
                }
            }

            // Released outside the window still has to end the drag
            if input.pointer.button_released(PointerButton::Primary) {
                if let Some(pos) = hover.or(self.last_pointer_pos) {
                    events.push(InputEvent::PointerUp {
                        location: Self::make_location(pos, canvas_rect),
                    });
                }
            }

            self.last_pointer_pos = hover;

            for event in &input.raw.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyDown {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}
