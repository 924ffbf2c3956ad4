use tripboard_core::interaction::drag::{DragController, DragSource, DropAction};
use tripboard_core::interaction::drop_zone::DropZone;
use tripboard_core::interaction::geometry::{Point, Rect};
use tripboard_core::interaction::gesture::ActivationConstraint;
use tripboard_core::{DayId, FlatSection, ItemId, PlacePayload, SectionRef, TripId, TripStore};

const CARD_HEIGHT: f32 = 40.0;

struct Board {
    store: TripStore,
    trip_id: TripId,
    day_id: DayId,
    wishlist: Vec<ItemId>,
    controller: DragController,
}

impl Board {
    fn new() -> Self {
        let mut store = TripStore::new();
        let trip_id = store.add_trip();
        let day_id = store.add_day_section(trip_id, None).unwrap();
        let wishlist = ["A", "B", "C", "D"]
            .into_iter()
            .map(|name| {
                store
                    .add_item_to_section(trip_id, FlatSection::Wishlist, PlacePayload::named(name))
                    .unwrap()
            })
            .collect();
        let mut board = Self {
            store,
            trip_id,
            day_id,
            wishlist,
            controller: DragController::new(ActivationConstraint::default()),
        };
        board.layout();
        board
    }

    /// Wishlist column at x in [0, 200), day column at x in [300, 500).
    fn layout(&mut self) {
        let zones = self.controller.zones_mut();
        zones.clear();
        zones.register(DropZone::collection(
            self.trip_id,
            SectionRef::WISHLIST,
            Rect::new(0.0, 0.0, 200.0, 400.0),
        ));
        zones.register(DropZone::collection(
            self.trip_id,
            SectionRef::Day(self.day_id),
            Rect::new(300.0, 0.0, 200.0, 400.0),
        ));
        let trip = self.store.trip(self.trip_id).unwrap();
        for (index, item) in trip.wishlist.iter().enumerate() {
            zones.register(DropZone::item(
                self.trip_id,
                SectionRef::WISHLIST,
                item.id,
                Rect::new(0.0, index as f32 * CARD_HEIGHT, 200.0, CARD_HEIGHT),
            ));
        }
    }

    fn card_center(index: usize) -> Point {
        Point::new(100.0, index as f32 * CARD_HEIGHT + CARD_HEIGHT / 2.0)
    }

    fn wishlist_names(&self) -> Vec<String> {
        self.store
            .trip(self.trip_id)
            .unwrap()
            .wishlist
            .iter()
            .map(|item| item.name.clone())
            .collect()
    }

    fn drag(&mut self, item_index: usize, to: Point) -> DropAction {
        let source = DragSource {
            trip_id: self.trip_id,
            section: SectionRef::WISHLIST,
            item_id: self.wishlist[item_index],
        };
        let start = Self::card_center(item_index);
        self.controller.press(start, source);
        self.controller
            .pointer_moved(Point::new(start.x, start.y + 10.0), &self.store);
        self.controller.pointer_moved(to, &self.store);
        self.controller.release(to, &mut self.store).action
    }
}

#[test]
fn dropping_on_a_later_card_lands_before_it_after_removal() {
    let mut board = Board::new();

    let action = board.drag(0, Board::card_center(2));

    assert!(matches!(action, DropAction::Reorder { to_index: 1, .. }));
    assert_eq!(board.wishlist_names(), ["B", "A", "C", "D"]);
}

#[test]
fn dropping_on_an_earlier_card_takes_its_index() {
    let mut board = Board::new();

    let action = board.drag(3, Board::card_center(1));

    assert!(matches!(action, DropAction::Reorder { to_index: 1, .. }));
    assert_eq!(board.wishlist_names(), ["A", "D", "B", "C"]);
}

#[test]
fn dropping_on_another_column_appends_there() {
    let mut board = Board::new();

    let action = board.drag(1, Point::new(400.0, 350.0));

    assert!(matches!(action, DropAction::Move { .. }));
    assert_eq!(board.wishlist_names(), ["A", "C", "D"]);
    let day = board.store.trip(board.trip_id).unwrap().day(board.day_id).unwrap();
    assert_eq!(day.items[0].id, board.wishlist[1]);
}

#[test]
fn dropping_on_empty_space_or_outside_changes_nothing() {
    let mut board = Board::new();
    let before = board.store.snapshot().to_trips();

    assert_eq!(board.drag(0, Point::new(100.0, 350.0)), DropAction::NoOp);
    assert_eq!(board.drag(0, Point::new(250.0, 100.0)), DropAction::Cancel);
    assert_eq!(board.store.snapshot().to_trips(), before);
}

#[test]
fn short_press_is_a_click_not_a_drag() {
    let mut board = Board::new();
    let before = board.store.snapshot().to_trips();
    let source = DragSource {
        trip_id: board.trip_id,
        section: SectionRef::WISHLIST,
        item_id: board.wishlist[0],
    };

    board.controller.press(Board::card_center(0), source);
    board
        .controller
        .pointer_moved(Point::new(103.0, 24.0), &board.store);
    assert!(!board.controller.is_dragging());
    assert!(board.controller.preview().is_none());

    let result = board
        .controller
        .release(Board::card_center(2), &mut board.store);
    assert_eq!(result.action, DropAction::Cancel);
    assert!(result.outcome.is_none());
    assert_eq!(board.store.snapshot().to_trips(), before);
}

#[test]
fn preview_shows_item_and_one_based_position() {
    let mut board = Board::new();
    let source = DragSource {
        trip_id: board.trip_id,
        section: SectionRef::WISHLIST,
        item_id: board.wishlist[2],
    };

    board.controller.press(Board::card_center(2), source);
    board
        .controller
        .pointer_moved(Point::new(100.0, 120.0), &board.store);
    board
        .controller
        .pointer_moved(Point::new(150.0, 160.0), &board.store);

    let preview = board.controller.preview().unwrap();
    assert_eq!(preview.item.name, "C");
    assert_eq!(preview.position, 3);
    assert_eq!(preview.pointer, Point::new(150.0, 160.0));

    board.controller.cancel();
    assert!(board.controller.preview().is_none());
    assert!(!board.controller.is_dragging());
}
