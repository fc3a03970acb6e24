use crate::{
    model::library::{Consent, ReadingStatus},
    server::{
        error::library::LibraryError,
        model::library::{
            LibraryRecord, PlaceBook, PlaceOutcome, Source, DEFAULT_COLOR, SHELF_CAPACITY,
        },
    },
};

fn place(book_id: i32, library: &str, shelf_index: i32, position: i32) -> PlaceBook {
    PlaceBook {
        book_id,
        library_name: library.to_string(),
        shelf_index,
        position,
        read_progress: 0,
        status: None,
        source: Source::default(),
    }
}

fn positions(record: &LibraryRecord, library: &str) -> Vec<(i32, i32)> {
    record
        .shelf(library, 0)
        .unwrap()
        .placements
        .iter()
        .map(|p| (p.book_id, p.position))
        .collect()
}

/// Record holding books `1..=n` on the first shelf of `library` at positions `0..n`.
fn filled(library: &str, n: i32) -> LibraryRecord {
    let mut record = LibraryRecord::default();
    for i in 0..n {
        record.place(place(i + 1, library, 0, i)).unwrap();
    }
    record
}

/// Tests placing into a library that does not exist yet.
///
/// Verifies the library is created with a single shelf whose id is 1 and the
/// placement gets the default color, source and status.
///
/// Expected: Ok(Inserted)
#[test]
fn place_creates_missing_library() {
    let mut record = LibraryRecord::default();

    let outcome = record.place(place(7, "Home", 0, 0)).unwrap();

    assert_eq!(outcome, PlaceOutcome::Inserted);
    let library = record.library("Home").unwrap();
    assert_eq!(library.shelves.len(), 1);
    assert_eq!(library.shelves[0].shelf_id, 1);
    let placement = &library.shelves[0].placements[0];
    assert_eq!(placement.color, DEFAULT_COLOR);
    assert_eq!(placement.status, ReadingStatus::Reading);
    assert_eq!(placement.source, Source::default());
}

/// Tests that a new library only exposes shelf index 0.
///
/// Expected: Err(InvalidShelfIndex) and no library created
#[test]
fn place_rejects_shelf_index_beyond_new_library() {
    let mut record = LibraryRecord::default();

    let result = record.place(place(7, "Home", 1, 0));

    assert_eq!(result, Err(LibraryError::InvalidShelfIndex(1)));
    assert!(record.libraries.is_empty());
}

/// Tests that placing a book elsewhere copies the color of its first occurrence.
///
/// B1 goes on "Home" shelf 0 position 0, gets recolored, then goes on "Travel".
///
/// Expected: both placements share the color
#[test]
fn place_inherits_color_of_first_occurrence() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(1, "Travel", 0, 0)).unwrap();

    let home = record.placement_at("Home", 0, 0).unwrap();
    let travel = record.placement_at("Travel", 0, 0).unwrap();
    assert_eq!(home.color, DEFAULT_COLOR);
    assert_eq!(travel.color, home.color);

    record.recolor(1, "blue").unwrap();
    record.place(place(1, "Bedside", 0, 0)).unwrap();

    assert_eq!(record.placement_at("Bedside", 0, 0).unwrap().color, "blue");
}

/// Tests inserting at an occupied position.
///
/// Verifies every placement at or after the target moves up by exactly one and
/// placements before it are untouched.
///
/// Expected: positions 0, 1(new), 2, 3 in original relative order
#[test]
fn place_shifts_placements_at_or_after_target() {
    let mut record = filled("Home", 3);

    let outcome = record.place(place(9, "Home", 0, 1)).unwrap();

    assert_eq!(outcome, PlaceOutcome::Inserted);
    assert_eq!(positions(&record, "Home"), vec![(1, 0), (9, 1), (2, 2), (3, 3)]);
}

/// Tests inserting into a gap leaves neighbours alone.
///
/// Expected: no shift when the target position is free
#[test]
fn place_into_free_position_does_not_shift() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(2, "Home", 0, 5)).unwrap();

    record.place(place(3, "Home", 0, 3)).unwrap();

    assert_eq!(positions(&record, "Home"), vec![(1, 0), (3, 3), (2, 5)]);
}

/// Tests the shelf capacity.
///
/// A shelf holding placements at 0..9 rejects an eleventh book and is left as it was.
///
/// Expected: Err(ShelfFull)
#[test]
fn place_rejects_eleventh_book() {
    let mut record = filled("Home", SHELF_CAPACITY as i32);
    let before = record.clone();

    let result = record.place(place(99, "Home", 0, 4));

    assert_eq!(result, Err(LibraryError::ShelfFull(1)));
    assert_eq!(record, before);
}

/// Tests placing a book already on the target shelf.
///
/// The existing placement is moved and updated instead of being duplicated, and a
/// full shelf still accepts the update.
///
/// Expected: Ok(Updated), still ten placements
#[test]
fn place_existing_book_updates_in_place() {
    let mut record = filled("Home", SHELF_CAPACITY as i32);
    let mut request = place(1, "Home", 0, 9);
    request.read_progress = 40;
    request.status = Some(ReadingStatus::Abandoned);

    let outcome = record.place(request).unwrap();

    assert_eq!(outcome, PlaceOutcome::Updated);
    let shelf = record.shelf("Home", 0).unwrap();
    assert_eq!(shelf.placements.len(), SHELF_CAPACITY);
    let moved = shelf.placements.iter().find(|p| p.book_id == 1).unwrap();
    assert_eq!(moved.read_progress, 40);
    assert_eq!(moved.status, ReadingStatus::Abandoned);

    let mut seen: Vec<i32> = shelf.placements.iter().map(|p| p.position).collect();
    seen.dedup();
    assert_eq!(seen.len(), SHELF_CAPACITY);
}

/// Tests that full progress on placement marks the book completed.
///
/// Expected: status Completed regardless of the requested status
#[test]
fn place_with_full_progress_completes() {
    let mut record = LibraryRecord::default();
    let mut request = place(1, "Home", 0, 0);
    request.read_progress = 100;
    request.status = Some(ReadingStatus::ToRead);

    record.place(request).unwrap();

    assert_eq!(
        record.placement_at("Home", 0, 0).unwrap().status,
        ReadingStatus::Completed
    );
}

/// Tests malformed placement requests.
///
/// Expected: InvalidProgress for 101 and -1, InvalidPosition for -1
#[test]
fn place_rejects_malformed_requests() {
    let mut record = LibraryRecord::default();

    let mut over = place(1, "Home", 0, 0);
    over.read_progress = 101;
    let mut under = place(1, "Home", 0, 0);
    under.read_progress = -1;

    assert_eq!(record.place(over), Err(LibraryError::InvalidProgress(101)));
    assert_eq!(record.place(under), Err(LibraryError::InvalidProgress(-1)));
    assert_eq!(
        record.place(place(1, "Home", 0, -1)),
        Err(LibraryError::InvalidPosition(-1))
    );
    assert_eq!(
        record.place(place(1, "Home", -1, 0)),
        Err(LibraryError::InvalidShelfIndex(-1))
    );
}

/// Tests positions stay distinct and capacity holds over a long mixed sequence.
///
/// Expected: every shelf sorted, distinct positions, at most ten placements
#[test]
fn place_sequence_preserves_shelf_invariants() {
    let mut record = LibraryRecord::default();
    for i in 0..40 {
        let _ = record.place(place(i % 13, "Home", 0, (i * 7) % 5));
    }

    let shelf = record.shelf("Home", 0).unwrap();
    assert!(shelf.placements.len() <= SHELF_CAPACITY);
    let positions: Vec<i32> = shelf.placements.iter().map(|p| p.position).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(positions, sorted);
}

/// Tests updating progress to 100.
///
/// Expected: first occurrence completed, later occurrences untouched
#[test]
fn update_progress_to_full_completes_first_occurrence() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(1, "Travel", 0, 0)).unwrap();

    let updated = record.update_progress(1, 100).unwrap();

    assert_eq!(updated.status, ReadingStatus::Completed);
    assert_eq!(
        record.placement_at("Travel", 0, 0).unwrap().status,
        ReadingStatus::Reading
    );
}

/// Tests progress outside the allowed range.
///
/// Expected: Err(InvalidProgress), record unchanged
#[test]
fn update_progress_rejects_out_of_range() {
    let mut record = filled("Home", 1);
    let before = record.clone();

    assert_eq!(
        record.update_progress(1, 150),
        Err(LibraryError::InvalidProgress(150))
    );
    assert_eq!(record, before);
}

/// Tests status updates on a missing book.
///
/// Expected: Err(PlacementNotFound)
#[test]
fn update_status_requires_placement() {
    let mut record = filled("Home", 1);

    assert_eq!(
        record.update_status(42, ReadingStatus::Abandoned),
        Err(LibraryError::PlacementNotFound(42))
    );
    assert_eq!(
        record.update_status(1, ReadingStatus::Abandoned).unwrap().status,
        ReadingStatus::Abandoned
    );
}

/// Tests removing the last occurrence from a library.
///
/// Expected: Ok, then PlacementNotFound on repeat with state unchanged
#[test]
fn remove_from_library_then_repeat() {
    let mut record = filled("Home", 1);

    record.remove_from_library("Home", 1).unwrap();
    let after = record.clone();

    assert_eq!(
        record.remove_from_library("Home", 1),
        Err(LibraryError::PlacementNotFound(1))
    );
    assert_eq!(record, after);
    assert!(record.shelf("Home", 0).unwrap().placements.is_empty());
}

/// Tests removing from a library that does not exist.
///
/// Expected: Err(LibraryNotFound)
#[test]
fn remove_from_missing_library() {
    let mut record = filled("Home", 1);

    assert_eq!(
        record.remove_from_library("Attic", 1),
        Err(LibraryError::LibraryNotFound("Attic".to_string()))
    );
}

/// Tests removing a book from every library.
///
/// Expected: Ok(2), then PlacementNotFound
#[test]
fn remove_everywhere_counts_occurrences() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(1, "Travel", 0, 0)).unwrap();

    assert_eq!(record.remove_everywhere(1), Ok(2));
    assert_eq!(
        record.remove_everywhere(1),
        Err(LibraryError::PlacementNotFound(1))
    );
}

/// Tests querying by color and by location.
///
/// Expected: color query lists every matching occurrence; an empty position is PositionEmpty
#[test]
fn queries_by_color_and_location() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(2, "Home", 0, 1)).unwrap();
    record.place(place(1, "Travel", 0, 0)).unwrap();
    record.recolor(1, "red").unwrap();

    let red = record.by_color("red");
    assert_eq!(red.len(), 2);
    assert_eq!(red[0].library_name, "Home");
    assert_eq!(red[1].library_name, "Travel");
    assert!(record.by_color("green").is_empty());

    assert!(matches!(
        record.placement_at("Home", 0, 5),
        Err(LibraryError::PositionEmpty { position: 5, .. })
    ));
    assert!(matches!(
        record.shelf("Home", 3),
        Err(LibraryError::ShelfNotFound { shelf_index: 3, .. })
    ));
}

/// Tests creating libraries and adding shelves.
///
/// Expected: duplicate names rejected, shelf ids increment from 1
#[test]
fn create_library_and_add_shelves() {
    let mut record = LibraryRecord::default();
    record.create_library("Home").unwrap();

    assert_eq!(
        record.create_library("Home").map(|_| ()),
        Err(LibraryError::DuplicateLibrary("Home".to_string()))
    );
    assert_eq!(record.add_shelf("Home"), Ok(2));
    assert_eq!(record.add_shelf("Home"), Ok(3));

    record.place(place(1, "Home", 2, 0)).unwrap();
    assert_eq!(record.shelf("Home", 2).unwrap().shelf_id, 3);
}

/// Tests renaming a library.
///
/// Expected: renamed in place; renaming onto an existing name is rejected
#[test]
fn rename_library() {
    let mut record = filled("Home", 2);
    record.create_library("Travel").unwrap();

    assert_eq!(
        record.rename_library("Home", "Travel"),
        Err(LibraryError::DuplicateLibrary("Travel".to_string()))
    );
    record.rename_library("Home", "Study").unwrap();

    assert_eq!(record.libraries[0].name, "Study");
    assert_eq!(record.library("Study").unwrap().book_ids(), vec![1, 2]);
}

/// Tests conditional deletion of a library holding books found nowhere else.
///
/// Expected: ConsentRequired listing the orphaned books, then deleted unconditionally
#[test]
fn delete_library_requires_consent_for_orphans() {
    let mut record = filled("Home", 3);
    record.place(place(2, "Travel", 0, 0)).unwrap();

    let result = record.delete_library("Home", Consent::Conditional);

    assert_eq!(
        result,
        Err(LibraryError::ConsentRequired {
            library: "Home".to_string(),
            orphaned: vec![1, 3],
        })
    );
    assert!(record.library("Home").is_ok());

    record.delete_library("Home", Consent::Unconditional).unwrap();
    assert!(record.library("Home").is_err());
}

/// Tests conditional deletion when every book is also elsewhere.
///
/// Expected: Ok without needing unconditional consent
#[test]
fn delete_library_without_orphans() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(1, "Travel", 0, 0)).unwrap();

    assert!(record.delete_library("Home", Consent::Conditional).is_ok());
}

/// Tests moving books between libraries.
///
/// Every occurrence leaves the source; each lands once after the last position on
/// the target's first shelf keeping its progress.
///
/// Expected: Ok(moved ids)
#[test]
fn move_books_appends_to_target() {
    let mut record = filled("Home", 3);
    record.update_progress(2, 60).unwrap();
    record.place(place(10, "Travel", 0, 4)).unwrap();

    let moved = record.move_books("Home", "Travel", &[2, 3, 77]).unwrap();

    assert_eq!(moved, vec![2, 3]);
    assert_eq!(positions(&record, "Home"), vec![(1, 0)]);
    assert_eq!(positions(&record, "Travel"), vec![(10, 4), (2, 5), (3, 6)]);
    assert_eq!(record.placement_at("Travel", 0, 5).unwrap().read_progress, 60);
}

/// Tests moving ids absent from the source.
///
/// Expected: Ok(empty) and no change
#[test]
fn move_books_without_matches_is_noop() {
    let mut record = filled("Home", 1);
    record.create_library("Travel").unwrap();
    let before = record.clone();

    assert_eq!(record.move_books("Home", "Travel", &[5]), Ok(Vec::new()));
    assert_eq!(record, before);
}

/// Tests moving into a target without room.
///
/// Expected: Err(ShelfFull) and the source keeps its books
#[test]
fn move_books_checks_capacity_first() {
    let mut record = filled("Travel", SHELF_CAPACITY as i32);
    record.place(place(50, "Home", 0, 0)).unwrap();
    let before = record.clone();

    assert_eq!(
        record.move_books("Home", "Travel", &[50]),
        Err(LibraryError::ShelfFull(1))
    );
    assert_eq!(record, before);
}

/// Tests moving within one library or to a missing one.
///
/// Expected: SameLibrary and LibraryNotFound
#[test]
fn move_books_validates_libraries() {
    let mut record = filled("Home", 1);

    assert_eq!(
        record.move_books("Home", "Home", &[1]),
        Err(LibraryError::SameLibrary("Home".to_string()))
    );
    assert_eq!(
        record.move_books("Home", "Nowhere", &[1]),
        Err(LibraryError::LibraryNotFound("Nowhere".to_string()))
    );
}

/// Tests the stored JSON shape of a record.
///
/// Expected: a bare array of libraries with camelCase placement fields
#[test]
fn record_serializes_as_array() {
    let mut record = LibraryRecord::default();
    record.place(place(4, "Home", 0, 0)).unwrap();

    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json[0]["name"], "Home");
    assert_eq!(json[0]["shelves"][0]["shelfId"], 1);
    assert_eq!(json[0]["shelves"][0]["placements"][0]["bookId"], 4);
    assert_eq!(
        json[0]["shelves"][0]["placements"][0]["source"]["sourceType"],
        "owned"
    );

    let decoded: LibraryRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

/// Tests inserting in front of a placement at the largest position.
///
/// Expected: InvalidPosition and the shelf left as it was
#[test]
fn place_refuses_shift_past_largest_position() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(2, "Home", 0, i32::MAX)).unwrap();

    assert_eq!(
        record.place(place(3, "Home", 0, 0)),
        Err(LibraryError::InvalidPosition(0))
    );
    assert_eq!(positions(&record, "Home"), vec![(1, 0), (2, i32::MAX)]);

    assert_eq!(record.place(place(3, "Home", 0, 5)), Ok(PlaceOutcome::Inserted));
    assert_eq!(
        positions(&record, "Home"),
        vec![(1, 0), (3, 5), (2, i32::MAX)]
    );
}

/// Tests appending moved books behind a placement at the largest position.
///
/// Expected: the moved book takes the lowest free position
#[test]
fn move_books_reuses_free_position_at_largest() {
    let mut record = LibraryRecord::default();
    record.place(place(1, "Home", 0, 0)).unwrap();
    record.place(place(2, "Travel", 0, 0)).unwrap();
    record.place(place(3, "Travel", 0, i32::MAX)).unwrap();

    record.move_books("Home", "Travel", &[1]).unwrap();

    assert_eq!(
        positions(&record, "Travel"),
        vec![(2, 0), (1, 1), (3, i32::MAX)]
    );
}

/// Tests picking a shelf with room.
///
/// Expected: 0 for a missing library, the shelf already holding the book, the
/// first shelf with room, and a new shelf once every shelf is full
#[test]
fn shelf_with_room_falls_through_full_shelves() {
    let mut record = LibraryRecord::default();
    assert_eq!(record.shelf_with_room("Home", 1), Ok(0));

    let mut record = filled("Home", SHELF_CAPACITY as i32);
    assert_eq!(record.shelf_with_room("Home", 3), Ok(0));
    assert_eq!(record.shelf_with_room("Home", 99), Ok(1));
    assert_eq!(record.library("Home").unwrap().shelves.len(), 2);

    record.place(place(99, "Home", 1, 0)).unwrap();
    assert_eq!(record.shelf_with_room("Home", 100), Ok(1));
    assert_eq!(record.library("Home").unwrap().shelves.len(), 2);
}
