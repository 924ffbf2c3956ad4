use std::collections::HashSet;
use tripboard_core::{
    FlatSection, ItemId, ItemPatch, MutationOutcome, NoOpReason, PlacePayload, SectionRef, Trip,
    TripId, TripStore,
};
use uuid::Uuid;

fn all_item_ids(trip: &Trip) -> Vec<ItemId> {
    trip.collections()
        .flat_map(|(_, items)| items.iter().map(|item| item.id))
        .collect()
}

fn names(items: &[tripboard_core::PlaceItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

fn seeded_store() -> (TripStore, TripId) {
    let mut store = TripStore::new();
    let trip_id = store.add_trip();
    (store, trip_id)
}

#[test]
fn every_item_stays_in_exactly_one_collection() {
    let (mut store, trip_id) = seeded_store();
    let day_one = store.add_day_section(trip_id, None).unwrap();
    let day_two = store.add_day_section(trip_id, None).unwrap();
    let mut ids = Vec::new();
    for (index, section) in [FlatSection::Wishlist, FlatSection::Todo, FlatSection::Recommended]
        .into_iter()
        .cycle()
        .take(9)
        .enumerate()
    {
        ids.push(
            store
                .add_item_to_section(trip_id, section, PlacePayload::named(format!("p{index}")))
                .unwrap(),
        );
    }

    let targets = [
        SectionRef::Day(day_one),
        SectionRef::Day(day_two),
        SectionRef::WISHLIST,
        SectionRef::TODO,
        SectionRef::RECOMMENDED,
    ];
    for (step, item_id) in ids.iter().cycle().take(40).enumerate() {
        let to = targets[step % targets.len()];
        if step % 3 == 0 {
            store.move_item(trip_id, *item_id, None, to, Some(step % 4));
        } else {
            let section = store.locate(trip_id, *item_id).unwrap().section;
            store.reorder_item(trip_id, *item_id, section, step % 5);
        }
    }
    let first_section = store.locate(trip_id, ids[0]).unwrap().section;
    store.remove_item(trip_id, ids[0], first_section);

    let trip = store.trip(trip_id).unwrap();
    let seen = all_item_ids(trip);
    let unique: HashSet<_> = seen.iter().copied().collect();
    assert_eq!(seen.len(), unique.len());
    assert_eq!(seen.len(), ids.len() - 1);
    for item_id in &ids[1..] {
        assert!(store.locate(trip_id, *item_id).is_some());
    }
}

#[test]
fn moving_unknown_item_leaves_everything_unchanged() {
    let (mut store, trip_id) = seeded_store();
    let day_id = store.add_day_section(trip_id, None).unwrap();
    store.add_item_to_section(trip_id, FlatSection::Wishlist, PlacePayload::named("Cafe"));
    let before = store.snapshot().to_trips();

    let outcome = store.move_item(
        trip_id,
        Uuid::new_v4(),
        Some(SectionRef::WISHLIST),
        SectionRef::Day(day_id),
        None,
    );

    assert!(matches!(outcome, MutationOutcome::NoOp(NoOpReason::ItemNotFound(_))));
    assert_eq!(store.snapshot().to_trips(), before);
}

#[test]
fn moving_to_missing_day_keeps_item_in_place() {
    let (mut store, trip_id) = seeded_store();
    let item_id = store
        .add_item_to_section(trip_id, FlatSection::Todo, PlacePayload::named("Museum"))
        .unwrap();

    let outcome = store.move_item(trip_id, item_id, None, SectionRef::Day(Uuid::new_v4()), None);

    assert!(!outcome.is_applied());
    assert_eq!(store.trip(trip_id).unwrap().todo.len(), 1);
}

#[test]
fn reorder_index_counts_after_removal() {
    let (mut store, trip_id) = seeded_store();
    let day_id = store.add_day_section(trip_id, None).unwrap();
    let ids: Vec<ItemId> = ["A", "B", "C", "D"]
        .into_iter()
        .map(|name| {
            store
                .add_item_to_day(trip_id, day_id, PlacePayload::named(name))
                .unwrap()
        })
        .collect();

    store.reorder_item(trip_id, ids[0], SectionRef::Day(day_id), 2);
    let day = store.trip(trip_id).unwrap().day(day_id).unwrap();
    assert_eq!(names(&day.items), ["B", "C", "A", "D"]);

    store.reorder_item(trip_id, ids[3], SectionRef::Day(day_id), 99);
    let day = store.trip(trip_id).unwrap().day(day_id).unwrap();
    assert_eq!(names(&day.items), ["B", "C", "A", "D"]);

    store.reorder_item(trip_id, ids[3], SectionRef::Day(day_id), 0);
    let day = store.trip(trip_id).unwrap().day(day_id).unwrap();
    assert_eq!(names(&day.items), ["D", "B", "C", "A"]);
}

#[test]
fn clone_gets_fresh_ids_and_is_independent() {
    let (mut store, trip_id) = seeded_store();
    store.rename_trip(trip_id, "Rome");
    let day_id = store.add_day_section(trip_id, None).unwrap();
    store.add_item_to_day(trip_id, day_id, PlacePayload::named("Colosseum"));
    store.add_item_to_section(trip_id, FlatSection::Wishlist, PlacePayload::named("Gelato"));

    let copy_id = store.clone_trip(trip_id).unwrap();
    let original = store.trip(trip_id).unwrap().clone();
    let copy = store.trip(copy_id).unwrap().clone();

    assert_eq!(copy.name, "Copy of Rome");
    assert_ne!(copy.id, original.id);
    assert_ne!(copy.days[0].id, original.days[0].id);
    let original_ids: HashSet<_> = all_item_ids(&original).into_iter().collect();
    assert!(all_item_ids(&copy).iter().all(|id| !original_ids.contains(id)));
    assert_eq!(store.trips().last().unwrap().id, copy_id);

    let copied_item = copy.wishlist[0].id;
    store.update_item(
        copy_id,
        copied_item,
        SectionRef::WISHLIST,
        ItemPatch::default().name("Pizza"),
    );
    store.remove_day_section(copy_id, copy.days[0].id);
    assert_eq!(store.trip(trip_id).unwrap(), &original);
    assert_eq!(store.clone_trip(Uuid::new_v4()), None);
}

#[test]
fn default_day_names_are_positional() {
    let (mut store, trip_id) = seeded_store();
    let days: Vec<_> = (0..3)
        .map(|_| store.add_day_section(trip_id, None).unwrap())
        .collect();
    let trip = store.trip(trip_id).unwrap();
    let day_names: Vec<_> = trip.days.iter().map(|day| day.name.as_str()).collect();
    assert_eq!(day_names, ["Day 1", "Day 2", "Day 3"]);

    store.remove_day_section(trip_id, days[1]);
    let new_day = store.add_day_section(trip_id, None).unwrap();

    let trip = store.trip(trip_id).unwrap();
    assert_eq!(trip.day(new_day).unwrap().name, "Day 3");
    let day_names: Vec<_> = trip.days.iter().map(|day| day.name.as_str()).collect();
    assert_eq!(day_names, ["Day 1", "Day 3", "Day 3"]);
}

#[test]
fn removing_a_day_discards_its_items() {
    let (mut store, trip_id) = seeded_store();
    let day_id = store.add_day_section(trip_id, Some("Arrival".to_string())).unwrap();
    let item_id = store
        .add_item_to_day(trip_id, day_id, PlacePayload::named("Hotel"))
        .unwrap();

    store.remove_day_section(trip_id, day_id);

    assert!(store.locate(trip_id, item_id).is_none());
    assert_eq!(store.trip(trip_id).unwrap().item_count(), 0);
}

#[test]
fn update_merges_present_fields_and_clears_explicit_nulls() {
    let (mut store, trip_id) = seeded_store();
    let item_id = store
        .add_item_to_section(
            trip_id,
            FlatSection::Recommended,
            PlacePayload::named("Bar").at(1.0, 2.0).with_instructions("book"),
        )
        .unwrap();
    let patch: ItemPatch =
        serde_json::from_str(r#"{"recommendedFor":"date night","instructions":null}"#).unwrap();

    store.update_item(trip_id, item_id, SectionRef::RECOMMENDED, patch);

    let item = &store.trip(trip_id).unwrap().recommended_places[0];
    assert_eq!(item.id, item_id);
    assert_eq!(item.name, "Bar");
    assert_eq!(item.coordinates(), Some((1.0, 2.0)));
    assert_eq!(item.recommended_for.as_deref(), Some("date night"));
    assert_eq!(item.instructions, None);
}

#[test]
fn add_to_missing_day_or_trip_is_a_silent_noop() {
    let (mut store, trip_id) = seeded_store();
    assert_eq!(
        store.add_item_to_day(trip_id, Uuid::new_v4(), PlacePayload::named("x")),
        None
    );
    assert_eq!(
        store.add_item_to_section(Uuid::new_v4(), FlatSection::Todo, PlacePayload::named("x")),
        None
    );
    assert_eq!(store.trip(trip_id).unwrap().item_count(), 0);
}

#[test]
fn cafe_moves_from_wishlist_into_first_day() {
    let mut store = TripStore::new();
    assert!(store.is_empty());

    let trip_id = store.add_trip();
    assert_eq!(store.trip(trip_id).unwrap().name, "New Trip");
    let item_id = store
        .add_item_to_section(
            trip_id,
            FlatSection::Wishlist,
            PlacePayload::named("Cafe X").at(1.0, 2.0),
        )
        .unwrap();
    let day_id = store.add_day_section(trip_id, None).unwrap();

    let outcome = store.move_item(
        trip_id,
        item_id,
        Some(SectionRef::WISHLIST),
        SectionRef::Day(day_id),
        None,
    );
    assert_eq!(outcome, MutationOutcome::Applied);

    let trip = store.trip(trip_id).unwrap();
    assert!(trip.wishlist.is_empty());
    let day = trip.day(day_id).unwrap();
    assert_eq!(day.name, "Day 1");
    assert_eq!(day.items.len(), 1);
    assert_eq!(day.items[0].name, "Cafe X");
    assert_eq!(day.items[0].coordinates(), Some((1.0, 2.0)));
    assert_eq!(day.items[0].id, item_id);
    assert_ne!(item_id, trip_id);
    assert_ne!(item_id, day_id);
}

#[test]
fn commands_round_trip_through_wire_json() {
    let (mut store, trip_id) = seeded_store();
    let json = format!(
        r#"{{"op":"add_item_to_section","tripId":"{trip_id}","section":"todo","payload":{{"name":"Louvre","placeId":"abc"}}}}"#
    );
    let command: tripboard_core::TripCommand = serde_json::from_str(&json).unwrap();

    let item_id = store.apply(&command).created_id().unwrap();

    let item = &store.trip(trip_id).unwrap().todo[0];
    assert_eq!(item.id, item_id);
    assert_eq!(item.place_id.as_deref(), Some("abc"));
}
