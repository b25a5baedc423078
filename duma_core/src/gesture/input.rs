//! Raw input events accepted by the engine.

use serde::{Deserialize, Serialize};

/// A position on the card surface, in the host's pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer, touch and keyboard input bound to the active card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// The pointer left the card surface; handled like a release.
    PointerLeave,
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
    /// A key name as reported by the host, e.g. `ArrowLeft`.
    Key(String),
}

/// Input reduced to what the gesture interpreter understands.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureInput {
    Begin(Point),
    Move(Point),
    End,
    Key(String),
}

impl InputEvent {
    /// Reduce to a gesture input. Touch events use the first touch point;
    /// a touch event with no points yields nothing.
    pub fn to_gesture_input(&self) -> Option<GestureInput> {
        match self {
            InputEvent::PointerDown(p) => Some(GestureInput::Begin(*p)),
            InputEvent::TouchStart(touches) => touches.first().map(|p| GestureInput::Begin(*p)),
            InputEvent::PointerMove(p) => Some(GestureInput::Move(*p)),
            InputEvent::TouchMove(touches) => touches.first().map(|p| GestureInput::Move(*p)),
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                Some(GestureInput::End)
            }
            InputEvent::Key(key) => Some(GestureInput::Key(key.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_uses_first_point() {
        let event = InputEvent::TouchMove(vec![Point::new(1.0, 2.0), Point::new(9.0, 9.0)]);
        assert_eq!(event.to_gesture_input(), Some(GestureInput::Move(Point::new(1.0, 2.0))));
        assert_eq!(InputEvent::TouchStart(Vec::new()).to_gesture_input(), None);
    }

    #[test]
    fn test_leave_is_release() {
        assert_eq!(InputEvent::PointerLeave.to_gesture_input(), Some(GestureInput::End));
        assert_eq!(InputEvent::TouchEnd.to_gesture_input(), Some(GestureInput::End));
    }
}
