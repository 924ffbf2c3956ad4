//! Pointer press/move/release tracking with a drag activation threshold.
//!
//! # Invariants
//! - A press becomes a drag only after the pointer travels at least
//!   `activation_distance` from the press point; releasing earlier is a click.
//! - Click and drag never both fire for one press/release pair.
//! - After `reset()` the tracker is idle.

use crate::interaction::geometry::Point;

/// Default minimum travel (px) before a press turns into a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f32 = 8.0;

/// Drag activation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationConstraint {
    /// Minimum euclidean travel from the press point.
    pub activation_distance: f32,
}

impl Default for ActivationConstraint {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}

/// Semantic result of one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Nothing to report.
    None,
    /// The press crossed the threshold and a drag began.
    DragStart { origin: Point, current: Point },
    /// Pointer moved while dragging.
    DragMove { current: Point },
    /// Pointer released while dragging.
    DragEnd { current: Point },
    /// Pointer released before the threshold was crossed.
    Click { at: Point },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TrackerState {
    Idle,
    Pressed { origin: Point },
    Dragging { origin: Point },
}

/// Press/drag state machine for a single pointer.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    constraint: ActivationConstraint,
    state: TrackerState,
}

impl PointerTracker {
    pub fn new(constraint: ActivationConstraint) -> Self {
        Self {
            constraint,
            state: TrackerState::Idle,
        }
    }

    pub fn press(&mut self, at: Point) {
        self.state = TrackerState::Pressed { origin: at };
    }

    pub fn moved(&mut self, to: Point) -> PointerEvent {
        match self.state {
            TrackerState::Idle => PointerEvent::None,
            TrackerState::Pressed { origin } => {
                if origin.distance_to(to) >= self.constraint.activation_distance {
                    self.state = TrackerState::Dragging { origin };
                    PointerEvent::DragStart {
                        origin,
                        current: to,
                    }
                } else {
                    PointerEvent::None
                }
            }
            TrackerState::Dragging { .. } => PointerEvent::DragMove { current: to },
        }
    }

    pub fn release(&mut self, at: Point) -> PointerEvent {
        let event = match self.state {
            TrackerState::Idle => PointerEvent::None,
            TrackerState::Pressed { .. } => PointerEvent::Click { at },
            TrackerState::Dragging { .. } => PointerEvent::DragEnd { current: at },
        };
        self.state = TrackerState::Idle;
        event
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, TrackerState::Dragging { .. })
    }

    pub fn is_pressed(&self) -> bool {
        !matches!(self.state, TrackerState::Idle)
    }

    pub fn reset(&mut self) {
        self.state = TrackerState::Idle;
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(ActivationConstraint::default())
    }
}
