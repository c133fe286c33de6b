use smallvec::SmallVec;

use crate::foundation::core::{Point, Vec2};

/// Active touch points, in canvas pixels.
pub type Touches = SmallVec<[Point; 2]>;

/// Pointer, wheel and touch input delivered to the crop engine.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    MouseDown(Point),
    /// Pointer moved.
    MouseMove(Point),
    /// Primary button released.
    MouseUp,
    /// Pointer left the canvas.
    MouseLeave,
    /// Wheel scrolled; positive `delta_y` scrolls down (zooms out).
    Wheel {
        /// Vertical scroll delta.
        delta_y: f64,
    },
    /// Touches after a finger went down.
    TouchStart(Touches),
    /// Touches after a move.
    TouchMove(Touches),
    /// Remaining touches after a finger lifted.
    TouchEnd(Touches),
    /// Remaining touches after the platform cancelled a touch.
    TouchCancel(Touches),
}

/// What the engine should do in response to an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GestureEffect {
    /// Nothing changes.
    None,
    /// Pan to an absolute position (before constraining).
    PanTo(Vec2),
    /// Zoom one wheel step in (`+1`) or out (`-1`).
    WheelStep(f64),
    /// Multiply zoom by `scale` (when known), then pan by `pan`.
    Pinch {
        scale: Option<f64>,
        pan: Vec2,
    },
}

/// Drag and pinch state machine.
#[derive(Clone, Debug, Default)]
pub(crate) struct GestureTracker {
    dragging: bool,
    drag_start: Point,
    drag_origin: Vec2,
    pinch_distance: f64,
    pinch_center: Point,
}

impl GestureTracker {
    pub(crate) fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed one event. `position` is the engine's current pan offset.
    pub(crate) fn handle(&mut self, event: &InputEvent, position: Vec2) -> GestureEffect {
        match event {
            InputEvent::MouseDown(p) => {
                self.begin_drag(*p, position);
                GestureEffect::None
            }
            InputEvent::MouseMove(p) => {
                if !self.dragging {
                    return GestureEffect::None;
                }
                GestureEffect::PanTo(self.drag_origin + (*p - self.drag_start))
            }
            InputEvent::MouseUp | InputEvent::MouseLeave => {
                self.dragging = false;
                GestureEffect::None
            }
            InputEvent::Wheel { delta_y } => {
                GestureEffect::WheelStep(if *delta_y > 0.0 { -1.0 } else { 1.0 })
            }
            InputEvent::TouchStart(touches) => {
                match touches.as_slice() {
                    [t] => self.begin_drag(*t, position),
                    [a, b, ..] => {
                        self.pinch_distance = a.distance(*b);
                        self.pinch_center = a.midpoint(*b);
                    }
                    [] => {}
                }
                GestureEffect::None
            }
            InputEvent::TouchMove(touches) => match touches.as_slice() {
                [t] if self.dragging => {
                    GestureEffect::PanTo(self.drag_origin + (*t - self.drag_start))
                }
                [a, b, ..] => {
                    let distance = a.distance(*b);
                    let center = a.midpoint(*b);
                    let scale = (self.pinch_distance > 0.0).then(|| distance / self.pinch_distance);
                    let pan = center - self.pinch_center;
                    self.pinch_distance = distance;
                    self.pinch_center = center;
                    GestureEffect::Pinch { scale, pan }
                }
                _ => GestureEffect::None,
            },
            InputEvent::TouchEnd(remaining) | InputEvent::TouchCancel(remaining) => {
                match remaining.as_slice() {
                    [] => self.dragging = false,
                    [t] => self.begin_drag(*t, position),
                    _ => {}
                }
                self.pinch_distance = 0.0;
                GestureEffect::None
            }
        }
    }

    fn begin_drag(&mut self, at: Point, position: Vec2) {
        self.dragging = true;
        self.drag_start = at;
        self.drag_origin = position;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/gesture.rs"]
mod tests;
