//! Drag gesture recognition for drag sources.
//!
//! Turns raw press/move/release signals, already converted to screen
//! coordinates, into the four drag lifecycle events. A press only becomes a
//! drag once the pointer has travelled past the threshold.

use kurbo::Point;

/// Recognized drag lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The press turned into a drag; `at` is the current pointer position.
    Start { at: Point },
    Update(Point),
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Pressed {
        origin: Point,
    },
    Dragging,
}

/// Per-source gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    threshold: f64,
    phase: Phase,
}

impl DragGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            phase: Phase::Idle,
        }
    }

    /// Primary button went down over the source.
    pub fn press(&mut self, position: Point) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Pressed { origin: position };
        }
    }

    /// Pointer moved while the primary button is held.
    pub fn drag_to(&mut self, position: Point) -> Option<GestureEvent> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pressed { origin } => {
                if origin.distance(position) < self.threshold {
                    return None;
                }
                self.phase = Phase::Dragging;
                Some(GestureEvent::Start { at: position })
            }
            Phase::Dragging => Some(GestureEvent::Update(position)),
        }
    }

    /// Primary button released.
    pub fn release(&mut self) -> Option<GestureEvent> {
        let was_dragging = self.is_dragging();
        self.phase = Phase::Idle;
        was_dragging.then_some(GestureEvent::End)
    }

    /// Gesture aborted (escape, focus loss, pointer gone).
    pub fn abort(&mut self) -> Option<GestureEvent> {
        let was_dragging = self.is_dragging();
        self.phase = Phase::Idle;
        was_dragging.then_some(GestureEvent::Cancel)
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Pressed or dragging.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DRAG_THRESHOLD)
    }
}
