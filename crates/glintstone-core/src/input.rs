//! Translating pointer, wheel, touch and keyboard input into transform calls.

use serde::{Deserialize, Serialize};

use crate::events::ZoomboxEvents;
use crate::geometry::Point;
use crate::state::Phase;
use crate::zoombox::Zoombox;

/// Logical keys the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ZoomIn,
    ZoomOut,
    Reset,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map a key name as a browser or toolkit reports it.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "+" | "=" | "Plus" | "Equals" => Some(Key::ZoomIn),
            "-" | "_" | "Minus" => Some(Key::ZoomOut),
            "0" | "Num0" | "Escape" | "Esc" => Some(Key::Reset),
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            _ => None,
        }
    }
}

/// One input event in viewport coordinates.
///
/// Minimap positions are fractions (0-1) of the minimap canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Wheel { x: f64, y: f64, delta_y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    /// The full set of active touch points after a touch start or move.
    Touch { touches: Vec<Point> },
    TouchEnd,
    Key { key: Key },
    MinimapPress { fx: f64, fy: f64 },
    MinimapDrag { fx: f64, fy: f64 },
    MinimapRelease,
}

/// In-progress pointer or touch gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    Pointer {
        start: Point,
        start_pan: Point,
        can_drag: bool,
        moved: bool,
    },
    TouchPan {
        start: Point,
        start_pan: Point,
    },
    Pinch {
        last_distance: f64,
    },
    Minimap,
}

impl Zoombox {
    /// Feed one input event. Returns true when the event was consumed and
    /// the host should suppress its default handling (page scroll etc.).
    pub fn handle_input(&mut self, event: InputEvent, events: &mut dyn ZoomboxEvents) -> bool {
        if self.phase() != Phase::Loaded {
            return false;
        }
        match event {
            InputEvent::Wheel { x, y, delta_y } => self.on_wheel(x, y, delta_y, events),
            InputEvent::PointerDown { x, y } => self.on_pointer_down(Point::new(x, y)),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y), events),
            InputEvent::PointerUp { x, y } => self.on_pointer_up(Point::new(x, y), events),
            InputEvent::PointerLeave => {
                if !matches!(self.gesture, Gesture::Minimap) {
                    self.gesture = Gesture::Idle;
                }
                self.clear_hover(events);
                false
            }
            InputEvent::Touch { touches } => self.on_touch(&touches, events),
            InputEvent::TouchEnd => {
                self.gesture = Gesture::Idle;
                true
            }
            InputEvent::Key { key } => self.on_key(key, events),
            InputEvent::MinimapPress { fx, fy } => {
                self.gesture = Gesture::Minimap;
                self.navigate_minimap(fx, fy, events);
                true
            }
            InputEvent::MinimapDrag { fx, fy } => {
                if self.gesture != Gesture::Minimap {
                    return false;
                }
                self.navigate_minimap(fx, fy, events);
                true
            }
            InputEvent::MinimapRelease => {
                let was_dragging = self.gesture == Gesture::Minimap;
                self.gesture = Gesture::Idle;
                was_dragging
            }
        }
    }

    fn on_wheel(&mut self, x: f64, y: f64, delta_y: f64, events: &mut dyn ZoomboxEvents) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let delta = -delta_y.signum() * self.config().zoom_step;
        self.zoom_at(x, y, delta, events);
        true
    }

    fn on_pointer_down(&mut self, at: Point) -> bool {
        self.gesture = Gesture::Pointer {
            start: at,
            start_pan: self.pan(),
            can_drag: self.drag_enabled(),
            moved: false,
        };
        true
    }

    fn on_pointer_move(&mut self, at: Point, events: &mut dyn ZoomboxEvents) -> bool {
        let Gesture::Pointer {
            start,
            start_pan,
            can_drag,
            moved,
        } = self.gesture
        else {
            self.hover_at(at.x, at.y, events);
            return false;
        };

        let moved = moved || start.distance(at) > self.config().drag_slop;
        self.gesture = Gesture::Pointer {
            start,
            start_pan,
            can_drag,
            moved,
        };
        if can_drag && moved {
            self.set_pan(
                start_pan.x + (at.x - start.x),
                start_pan.y + (at.y - start.y),
                events,
            );
        }
        true
    }

    fn on_pointer_up(&mut self, at: Point, events: &mut dyn ZoomboxEvents) -> bool {
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Pointer { moved: false, .. } => {
                self.click_at(at.x, at.y, events);
                true
            }
            Gesture::Pointer { .. } => true,
            _ => false,
        }
    }

    fn on_touch(&mut self, touches: &[Point], events: &mut dyn ZoomboxEvents) -> bool {
        match touches {
            [one] => {
                match self.gesture {
                    Gesture::TouchPan { start, start_pan } => {
                        if self.drag_enabled() {
                            self.set_pan(
                                start_pan.x + (one.x - start.x),
                                start_pan.y + (one.y - start.y),
                                events,
                            );
                        }
                    }
                    // A lifted pinch finger restarts the pan from here.
                    _ => {
                        self.gesture = Gesture::TouchPan {
                            start: *one,
                            start_pan: self.pan(),
                        };
                    }
                }
                true
            }
            [a, b, ..] => {
                let distance = a.distance(*b);
                if let Gesture::Pinch { last_distance } = self.gesture {
                    let mid = a.midpoint(*b);
                    let delta = (distance - last_distance) / self.config().pinch_divisor;
                    self.zoom_at(mid.x, mid.y, delta, events);
                }
                self.gesture = Gesture::Pinch {
                    last_distance: distance,
                };
                true
            }
            [] => {
                self.gesture = Gesture::Idle;
                false
            }
        }
    }

    fn on_key(&mut self, key: Key, events: &mut dyn ZoomboxEvents) -> bool {
        let step = self.config().keyboard_pan_step;
        match key {
            Key::ZoomIn => self.zoom_in(events),
            Key::ZoomOut => self.zoom_out(events),
            Key::Reset => self.reset(events),
            Key::Left => self.pan_by(step, 0.0, events),
            Key::Right => self.pan_by(-step, 0.0, events),
            Key::Up => self.pan_by(0.0, step, events),
            Key::Down => self.pan_by(0.0, -step, events),
        }
        true
    }
}
