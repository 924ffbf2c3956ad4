//! Drag session orchestration: one pointer gesture, at most one mutation.
//!
//! # Responsibility
//! - Remember where a dragged item came from and show a preview of it.
//! - Turn the release point into cancel, no-op, reorder or move.
//!
//! # Invariants
//! - Releasing without a target, or over another trip, mutates nothing.
//! - Same collection + hovered item = reorder, with the hovered index shifted
//!   down by one when it lies after the source (removal happens first).
//! - Different collection = move appended at the destination's end.
//! - Same collection without a hovered item (or hovering itself) = no-op.

use crate::interaction::drop_zone::{DropZone, DropZoneRegistry};
use crate::interaction::geometry::Point;
use crate::interaction::gesture::{ActivationConstraint, PointerEvent, PointerTracker};
use crate::model::section::SectionRef;
use crate::model::trip::{ItemId, PlaceItem, TripId};
use crate::store::command::{MutationOutcome, TripCommand};
use crate::store::trip_store::TripStore;
use log::debug;

/// Interaction-start metadata attached to a draggable card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSource {
    pub trip_id: TripId,
    pub section: SectionRef,
    pub item_id: ItemId,
}

/// Floating copy of the dragged card rendered at the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub item: PlaceItem,
    /// One-based position in the source collection.
    pub position: usize,
    pub pointer: Point,
}

/// Resolved drop target at release time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub trip_id: TripId,
    pub section: SectionRef,
    /// Hovered item and its current index in `section`.
    pub hovered: Option<(ItemId, usize)>,
}

/// What a release translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    /// No valid target; nothing happens.
    Cancel,
    /// Valid target but the order would not change.
    NoOp,
    Reorder {
        trip_id: TripId,
        item_id: ItemId,
        section: SectionRef,
        to_index: usize,
    },
    Move {
        trip_id: TripId,
        item_id: ItemId,
        from: SectionRef,
        to: SectionRef,
    },
}

impl DropAction {
    /// Engine command for this action, if it mutates anything.
    pub fn to_command(self) -> Option<TripCommand> {
        match self {
            Self::Cancel | Self::NoOp => None,
            Self::Reorder {
                trip_id,
                item_id,
                section,
                to_index,
            } => Some(TripCommand::ReorderItem {
                trip_id,
                item_id,
                section,
                to_index,
            }),
            Self::Move {
                trip_id,
                item_id,
                from,
                to,
            } => Some(TripCommand::MoveItem {
                trip_id,
                item_id,
                from: Some(from),
                to,
                to_index: None,
            }),
        }
    }
}

/// Decides what dropping `source` (currently at `source_index`) onto `target` means.
pub fn resolve_drop(
    source: &DragSource,
    source_index: usize,
    target: Option<&DropTarget>,
) -> DropAction {
    let Some(target) = target else {
        return DropAction::Cancel;
    };
    if target.trip_id != source.trip_id {
        return DropAction::Cancel;
    }

    if target.section != source.section {
        return DropAction::Move {
            trip_id: source.trip_id,
            item_id: source.item_id,
            from: source.section,
            to: target.section,
        };
    }

    match target.hovered {
        Some((hovered_id, hovered_index)) if hovered_id != source.item_id => {
            let to_index = if hovered_index > source_index {
                hovered_index - 1
            } else {
                hovered_index
            };
            DropAction::Reorder {
                trip_id: source.trip_id,
                item_id: source.item_id,
                section: source.section,
                to_index,
            }
        }
        _ => DropAction::NoOp,
    }
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResult {
    pub action: DropAction,
    /// Present when a command was sent to the store.
    pub outcome: Option<MutationOutcome>,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    source: DragSource,
    preview: Option<DragPreview>,
}

/// Couples pointer tracking, hit-testing and the store for one board.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    tracker: PointerTracker,
    zones: DropZoneRegistry,
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new(constraint: ActivationConstraint) -> Self {
        Self {
            tracker: PointerTracker::new(constraint),
            zones: DropZoneRegistry::new(),
            active: None,
        }
    }

    /// Zones for the current layout; callers re-register after each layout pass.
    pub fn zones_mut(&mut self) -> &mut DropZoneRegistry {
        &mut self.zones
    }

    pub fn zones(&self) -> &DropZoneRegistry {
        &self.zones
    }

    /// Pointer pressed on a draggable card.
    pub fn press(&mut self, at: Point, source: DragSource) {
        self.tracker.press(at);
        self.active = Some(ActiveDrag {
            source,
            preview: None,
        });
    }

    /// Pointer moved; captures the preview when the drag activates.
    pub fn pointer_moved(&mut self, to: Point, store: &TripStore) -> PointerEvent {
        let event = self.tracker.moved(to);
        match event {
            PointerEvent::DragStart { current, .. } => {
                if let Some(active) = self.active.as_mut() {
                    active.preview = capture_preview(store, &active.source, current);
                    debug!(
                        "event=drag_start module=interaction status=ok item_id={} section={}",
                        active.source.item_id, active.source.section
                    );
                }
            }
            PointerEvent::DragMove { current } => {
                if let Some(preview) = self
                    .active
                    .as_mut()
                    .and_then(|active| active.preview.as_mut())
                {
                    preview.pointer = current;
                }
            }
            PointerEvent::None | PointerEvent::DragEnd { .. } | PointerEvent::Click { .. } => {}
        }
        event
    }

    /// Preview of the card under drag, if a drag is in progress.
    pub fn preview(&self) -> Option<&DragPreview> {
        self.active.as_ref()?.preview.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Pointer released: resolves the drop and applies at most one command.
    pub fn release(&mut self, at: Point, store: &mut TripStore) -> DropResult {
        let event = self.tracker.release(at);
        let active = self.active.take();
        let (PointerEvent::DragEnd { current }, Some(active)) = (event, active) else {
            return DropResult {
                action: DropAction::Cancel,
                outcome: None,
            };
        };

        let source = active.source;
        let Some(source_location) = store.locate(source.trip_id, source.item_id) else {
            return DropResult {
                action: DropAction::Cancel,
                outcome: None,
            };
        };
        let source = DragSource {
            section: source_location.section,
            ..source
        };
        let target = self
            .zones
            .hit_test(current)
            .map(|zone| drop_target(store, zone));
        let action = resolve_drop(&source, source_location.index, target.as_ref());
        let outcome = action.to_command().map(|command| store.apply(&command));
        debug!(
            "event=drag_end module=interaction status=ok action={} applied={}",
            action_label(&action),
            outcome.is_some_and(|outcome| outcome.is_applied())
        );
        DropResult { action, outcome }
    }

    /// Abandons the gesture (escape key, focus loss).
    pub fn cancel(&mut self) {
        self.tracker.reset();
        self.active = None;
    }
}

fn capture_preview(store: &TripStore, source: &DragSource, pointer: Point) -> Option<DragPreview> {
    let location = store.locate(source.trip_id, source.item_id)?;
    let item = store
        .trip(source.trip_id)?
        .collection(location.section)?
        .get(location.index)?
        .clone();
    Some(DragPreview {
        item,
        position: location.display_position(),
        pointer,
    })
}

fn drop_target(store: &TripStore, zone: &DropZone) -> DropTarget {
    let hovered = zone.hovered_item().and_then(|item_id| {
        store
            .locate(zone.trip_id, item_id)
            .filter(|location| location.section == zone.section)
            .map(|location| (item_id, location.index))
    });
    DropTarget {
        trip_id: zone.trip_id,
        section: zone.section,
        hovered,
    }
}

fn action_label(action: &DropAction) -> &'static str {
    match action {
        DropAction::Cancel => "cancel",
        DropAction::NoOp => "noop",
        DropAction::Reorder { .. } => "reorder",
        DropAction::Move { .. } => "move",
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_drop, DragSource, DropAction, DropTarget};
    use crate::model::section::SectionRef;
    use uuid::Uuid;

    fn source() -> DragSource {
        DragSource {
            trip_id: Uuid::new_v4(),
            section: SectionRef::WISHLIST,
            item_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn hovering_later_item_targets_one_before_it() {
        let source = source();
        let target = DropTarget {
            trip_id: source.trip_id,
            section: source.section,
            hovered: Some((Uuid::new_v4(), 3)),
        };
        assert_eq!(
            resolve_drop(&source, 0, Some(&target)),
            DropAction::Reorder {
                trip_id: source.trip_id,
                item_id: source.item_id,
                section: source.section,
                to_index: 2,
            }
        );
    }

    #[test]
    fn hovering_earlier_item_targets_its_index() {
        let source = source();
        let target = DropTarget {
            trip_id: source.trip_id,
            section: source.section,
            hovered: Some((Uuid::new_v4(), 1)),
        };
        assert!(matches!(
            resolve_drop(&source, 3, Some(&target)),
            DropAction::Reorder { to_index: 1, .. }
        ));
    }

    #[test]
    fn same_collection_empty_space_or_self_is_noop() {
        let source = source();
        let empty_space = DropTarget {
            trip_id: source.trip_id,
            section: source.section,
            hovered: None,
        };
        assert_eq!(resolve_drop(&source, 0, Some(&empty_space)), DropAction::NoOp);

        let itself = DropTarget {
            hovered: Some((source.item_id, 0)),
            ..empty_space
        };
        assert_eq!(resolve_drop(&source, 0, Some(&itself)), DropAction::NoOp);
    }

    #[test]
    fn other_trip_or_no_target_cancels() {
        let source = source();
        assert_eq!(resolve_drop(&source, 0, None), DropAction::Cancel);
        let foreign = DropTarget {
            trip_id: Uuid::new_v4(),
            section: SectionRef::TODO,
            hovered: None,
        };
        assert_eq!(resolve_drop(&source, 0, Some(&foreign)), DropAction::Cancel);
    }
}
