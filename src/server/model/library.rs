//! Per-reader library records and the shelf engine.
//!
//! A reader owns at most one `LibraryRecord`: an ordered list of named libraries,
//! each holding ordered shelves, each holding up to `SHELF_CAPACITY` placements.
//! The record is persisted as a single JSON document, so every mutation goes through
//! the methods below and the whole record is written back afterwards.
//!
//! Invariants maintained by every mutating method:
//! - positions on a shelf are pairwise distinct
//! - a shelf never holds more than `SHELF_CAPACITY` placements
//! - placements on every shelf are sorted by position
//! - `read_progress == 100` implies `ReadingStatus::Completed`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::library::{
        Consent, LibraryDto, LibraryRecordDto, LocatedPlacementDto, PlaceBookDto, PlacementDto,
        ReadingStatus, ShelfDto, SourceDto,
    },
    server::error::library::LibraryError,
};

/// Maximum number of placements on one shelf.
pub const SHELF_CAPACITY: usize = 10;

/// Library that accepted borrow requests are placed into.
pub const BORROWED_LIBRARY: &str = "Borrowed Books";

/// Color given to a book the first time it is placed.
pub const DEFAULT_COLOR: &str = "default";

/// Shelf id of the shelf created alongside a new library.
pub const FIRST_SHELF_ID: i32 = 1;

/// Source type recorded for books placed by an accepted borrow request.
pub const BORROWED_SOURCE_TYPE: &str = "borrowed";

/// Where a placed copy came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub source_name: String,
    pub source_type: String,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            source_name: String::new(),
            source_type: "owned".to_string(),
        }
    }
}

impl Source {
    /// Source of a copy borrowed from `owner_name`.
    pub fn borrowed(owner_name: impl Into<String>) -> Self {
        Self {
            source_name: owner_name.into(),
            source_type: BORROWED_SOURCE_TYPE.to_string(),
        }
    }

    pub fn from_dto(dto: SourceDto) -> Self {
        Self {
            source_name: dto.source_name,
            source_type: dto.source_type,
        }
    }

    pub fn into_dto(self) -> SourceDto {
        SourceDto {
            source_name: self.source_name,
            source_type: self.source_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub book_id: i32,
    pub position: i32,
    pub read_progress: u8,
    pub status: ReadingStatus,
    pub color: String,
    pub source: Source,
}

impl Placement {
    pub fn into_dto(self) -> PlacementDto {
        PlacementDto {
            book_id: self.book_id,
            position: self.position,
            read_progress: self.read_progress,
            status: self.status,
            color: self.color,
            source: self.source.into_dto(),
        }
    }

    fn set_progress(&mut self, progress: u8) {
        self.read_progress = progress;
        if progress == 100 {
            self.status = ReadingStatus::Completed;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    pub shelf_id: i32,
    pub placements: Vec<Placement>,
}

impl Shelf {
    pub fn new(shelf_id: i32) -> Self {
        Self {
            shelf_id,
            placements: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.placements.len() >= SHELF_CAPACITY
    }

    pub fn contains(&self, book_id: i32) -> bool {
        self.placements.iter().any(|p| p.book_id == book_id)
    }

    fn sort(&mut self) {
        self.placements.sort_by_key(|p| p.position);
    }

    /// One past the highest position, or the lowest free position once that would
    /// overflow.
    fn next_position(&self) -> i32 {
        let highest = self.placements.iter().map(|p| p.position).max();
        match highest {
            None => 0,
            Some(highest) => highest.checked_add(1).unwrap_or_else(|| {
                (0..)
                    .find(|candidate| self.placements.iter().all(|p| p.position != *candidate))
                    .unwrap_or(0)
            }),
        }
    }

    /// Inserts a placement at its position.
    ///
    /// When the position is taken, every placement at or after it moves up by one
    /// first, keeping their relative order. The shift is refused with
    /// `InvalidPosition` when it would push a placement past `i32::MAX`.
    fn insert_shifting(&mut self, placement: Placement) -> Result<(), LibraryError> {
        if self.is_full() {
            return Err(LibraryError::ShelfFull(self.shelf_id));
        }

        let target = placement.position;
        if self.placements.iter().any(|p| p.position == target) {
            if self.placements.iter().any(|p| p.position == i32::MAX) {
                return Err(LibraryError::InvalidPosition(target));
            }
            for p in self.placements.iter_mut().filter(|p| p.position >= target) {
                p.position += 1;
            }
        }

        self.placements.push(placement);
        self.sort();

        Ok(())
    }

    pub fn into_dto(self) -> ShelfDto {
        ShelfDto {
            shelf_id: self.shelf_id,
            placements: self
                .placements
                .into_iter()
                .map(Placement::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub shelves: Vec<Shelf>,
}

impl Library {
    /// A new library with one empty shelf.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shelves: vec![Shelf::new(FIRST_SHELF_ID)],
        }
    }

    pub fn contains(&self, book_id: i32) -> bool {
        self.shelves.iter().any(|s| s.contains(book_id))
    }

    /// Distinct book ids in shelf order.
    pub fn book_ids(&self) -> Vec<i32> {
        let mut ids = Vec::new();
        for placement in self.shelves.iter().flat_map(|s| &s.placements) {
            if !ids.contains(&placement.book_id) {
                ids.push(placement.book_id);
            }
        }
        ids
    }

    fn shelf(&self, shelf_index: i32) -> Result<&Shelf, LibraryError> {
        usize::try_from(shelf_index)
            .ok()
            .and_then(|i| self.shelves.get(i))
            .ok_or_else(|| LibraryError::ShelfNotFound {
                library: self.name.clone(),
                shelf_index,
            })
    }

    pub fn into_dto(self) -> LibraryDto {
        LibraryDto {
            name: self.name,
            shelves: self.shelves.into_iter().map(Shelf::into_dto).collect(),
        }
    }
}

/// Request to put a book at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBook {
    pub book_id: i32,
    pub library_name: String,
    /// Zero based index into the library's shelves.
    pub shelf_index: i32,
    pub position: i32,
    pub read_progress: i32,
    /// `None` keeps the current status of an existing placement or uses the default.
    pub status: Option<ReadingStatus>,
    pub source: Source,
}

impl PlaceBook {
    pub fn from_dto(dto: PlaceBookDto) -> Self {
        Self {
            book_id: dto.book_id,
            library_name: dto.library_name,
            shelf_index: dto.shelf_index,
            position: dto.position,
            read_progress: dto.read_progress,
            status: dto.status,
            source: dto.source.map(Source::from_dto).unwrap_or_default(),
        }
    }
}

/// Whether placing a book added a new placement or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Inserted,
    Updated,
}

/// A placement together with the library and shelf it sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedPlacement {
    pub library_name: String,
    pub shelf_index: usize,
    pub shelf_id: i32,
    pub placement: Placement,
}

impl LocatedPlacement {
    pub fn into_dto(self) -> LocatedPlacementDto {
        LocatedPlacementDto {
            library_name: self.library_name,
            shelf_index: self.shelf_index,
            shelf_id: self.shelf_id,
            placement: self.placement.into_dto(),
        }
    }
}

fn validate_progress(progress: i32) -> Result<u8, LibraryError> {
    u8::try_from(progress)
        .ok()
        .filter(|p| *p <= 100)
        .ok_or(LibraryError::InvalidProgress(progress))
}

/// A reader's whole collection of libraries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryRecord {
    pub libraries: Vec<Library>,
}

impl LibraryRecord {
    /// Sorts every shelf by position.
    pub fn sort(&mut self) {
        for shelf in self.libraries.iter_mut().flat_map(|l| l.shelves.iter_mut()) {
            shelf.sort();
        }
    }

    fn find_library(&self, name: &str) -> Option<&Library> {
        self.libraries.iter().find(|l| l.name == name)
    }

    fn library_mut(&mut self, name: &str) -> Result<&mut Library, LibraryError> {
        self.libraries
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| LibraryError::LibraryNotFound(name.to_string()))
    }

    pub fn library(&self, name: &str) -> Result<&Library, LibraryError> {
        self.find_library(name)
            .ok_or_else(|| LibraryError::LibraryNotFound(name.to_string()))
    }

    /// Every placement with its location, in library, shelf and position order.
    pub fn placements(&self) -> impl Iterator<Item = (&Library, usize, &Shelf, &Placement)> {
        self.libraries.iter().flat_map(|library| {
            library
                .shelves
                .iter()
                .enumerate()
                .flat_map(move |(index, shelf)| {
                    shelf
                        .placements
                        .iter()
                        .map(move |placement| (library, index, shelf, placement))
                })
        })
    }

    /// First placement of the book across all libraries.
    pub fn first_occurrence(&self, book_id: i32) -> Option<&Placement> {
        self.placements()
            .map(|(_, _, _, p)| p)
            .find(|p| p.book_id == book_id)
    }

    fn first_occurrence_mut(&mut self, book_id: i32) -> Result<&mut Placement, LibraryError> {
        self.libraries
            .iter_mut()
            .flat_map(|l| l.shelves.iter_mut())
            .flat_map(|s| s.placements.iter_mut())
            .find(|p| p.book_id == book_id)
            .ok_or(LibraryError::PlacementNotFound(book_id))
    }

    pub fn contains(&self, book_id: i32) -> bool {
        self.first_occurrence(book_id).is_some()
    }

    /// Places a book at `shelf_index`/`position` of the named library.
    ///
    /// A missing library is created with one shelf, in which case only shelf index 0
    /// is addressable. A book already on the target shelf is updated and moved to the
    /// requested position. Otherwise a new placement is inserted, inheriting the color
    /// of the book's first occurrence anywhere in the record.
    ///
    /// # Returns
    /// - `Ok(PlaceOutcome::Inserted)` - A new placement was added
    /// - `Ok(PlaceOutcome::Updated)` - The book was already on that shelf
    /// - `Err(LibraryError::InvalidProgress)` - Progress outside 0 to 100
    /// - `Err(LibraryError::InvalidPosition)` - Negative position, or a shift that
    ///   would move a placement past the largest position
    /// - `Err(LibraryError::InvalidShelfIndex)` - Shelf index does not address a shelf
    /// - `Err(LibraryError::ShelfFull)` - Target shelf already holds ten placements
    pub fn place(&mut self, request: PlaceBook) -> Result<PlaceOutcome, LibraryError> {
        let progress = validate_progress(request.read_progress)?;
        if request.position < 0 {
            return Err(LibraryError::InvalidPosition(request.position));
        }

        let shelf_count = self
            .find_library(&request.library_name)
            .map_or(1, |l| l.shelves.len());
        let shelf_index = usize::try_from(request.shelf_index)
            .ok()
            .filter(|i| *i < shelf_count)
            .ok_or(LibraryError::InvalidShelfIndex(request.shelf_index))?;

        let inherited_color = self
            .first_occurrence(request.book_id)
            .map(|p| p.color.clone());

        if self.find_library(&request.library_name).is_none() {
            self.libraries.push(Library::new(request.library_name.clone()));
        }

        let library = self.library_mut(&request.library_name)?;
        let shelf = &mut library.shelves[shelf_index];

        if let Some(index) = shelf
            .placements
            .iter()
            .position(|p| p.book_id == request.book_id)
        {
            let mut existing = shelf.placements.remove(index);
            existing.position = request.position;
            existing.source = request.source;
            if let Some(status) = request.status {
                existing.status = status;
            }
            existing.set_progress(progress);
            shelf.insert_shifting(existing)?;

            return Ok(PlaceOutcome::Updated);
        }

        let mut placement = Placement {
            book_id: request.book_id,
            position: request.position,
            read_progress: 0,
            status: request.status.unwrap_or_default(),
            color: inherited_color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            source: request.source,
        };
        placement.set_progress(progress);
        shelf.insert_shifting(placement)?;

        Ok(PlaceOutcome::Inserted)
    }

    /// Sets read progress on the book's first occurrence. 100 marks it completed.
    pub fn update_progress(&mut self, book_id: i32, progress: i32) -> Result<Placement, LibraryError> {
        let progress = validate_progress(progress)?;
        let placement = self.first_occurrence_mut(book_id)?;
        placement.set_progress(progress);

        Ok(placement.clone())
    }

    /// Sets the reading status on the book's first occurrence.
    pub fn update_status(
        &mut self,
        book_id: i32,
        status: ReadingStatus,
    ) -> Result<Placement, LibraryError> {
        let placement = self.first_occurrence_mut(book_id)?;
        placement.status = status;

        Ok(placement.clone())
    }

    /// Removes the first placement of the book within one library.
    pub fn remove_from_library(&mut self, library_name: &str, book_id: i32) -> Result<(), LibraryError> {
        let library = self.library_mut(library_name)?;

        for shelf in library.shelves.iter_mut() {
            if let Some(index) = shelf.placements.iter().position(|p| p.book_id == book_id) {
                shelf.placements.remove(index);
                return Ok(());
            }
        }

        Err(LibraryError::PlacementNotFound(book_id))
    }

    /// Removes every placement of the book.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of placements removed, at least one
    /// - `Err(LibraryError::PlacementNotFound)` - Book was not placed anywhere
    pub fn remove_everywhere(&mut self, book_id: i32) -> Result<usize, LibraryError> {
        let mut removed = 0;
        for shelf in self.libraries.iter_mut().flat_map(|l| l.shelves.iter_mut()) {
            let before = shelf.placements.len();
            shelf.placements.retain(|p| p.book_id != book_id);
            removed += before - shelf.placements.len();
        }

        if removed == 0 {
            return Err(LibraryError::PlacementNotFound(book_id));
        }

        Ok(removed)
    }

    /// Recolors every placement of the book.
    pub fn recolor(&mut self, book_id: i32, color: &str) -> Result<usize, LibraryError> {
        let mut changed = 0;
        for placement in self
            .libraries
            .iter_mut()
            .flat_map(|l| l.shelves.iter_mut())
            .flat_map(|s| s.placements.iter_mut())
            .filter(|p| p.book_id == book_id)
        {
            placement.color = color.to_string();
            changed += 1;
        }

        if changed == 0 {
            return Err(LibraryError::PlacementNotFound(book_id));
        }

        Ok(changed)
    }

    /// Placements of the given color across all libraries.
    pub fn by_color(&self, color: &str) -> Vec<LocatedPlacement> {
        self.placements()
            .filter(|(_, _, _, p)| p.color == color)
            .map(|(library, shelf_index, shelf, placement)| LocatedPlacement {
                library_name: library.name.clone(),
                shelf_index,
                shelf_id: shelf.shelf_id,
                placement: placement.clone(),
            })
            .collect()
    }

    pub fn shelf(&self, library_name: &str, shelf_index: i32) -> Result<&Shelf, LibraryError> {
        self.library(library_name)?.shelf(shelf_index)
    }

    /// Placement at an exact location.
    pub fn placement_at(
        &self,
        library_name: &str,
        shelf_index: i32,
        position: i32,
    ) -> Result<&Placement, LibraryError> {
        self.shelf(library_name, shelf_index)?
            .placements
            .iter()
            .find(|p| p.position == position)
            .ok_or_else(|| LibraryError::PositionEmpty {
                library: library_name.to_string(),
                shelf_index,
                position,
            })
    }

    /// Adds an empty library with one shelf.
    pub fn create_library(&mut self, name: &str) -> Result<&Library, LibraryError> {
        if self.find_library(name).is_some() {
            return Err(LibraryError::DuplicateLibrary(name.to_string()));
        }

        self.libraries.push(Library::new(name));

        self.library(name)
    }

    /// Appends a shelf to the library and returns its shelf id.
    pub fn add_shelf(&mut self, name: &str) -> Result<i32, LibraryError> {
        let library = self.library_mut(name)?;
        let shelf_id = library
            .shelves
            .iter()
            .map(|s| s.shelf_id + 1)
            .max()
            .unwrap_or(FIRST_SHELF_ID);
        library.shelves.push(Shelf::new(shelf_id));

        Ok(shelf_id)
    }

    /// Shelf index of `name` that can take `book_id`.
    ///
    /// That is the shelf already holding the book, else the first shelf with room.
    /// When every shelf is full a new one is added. A missing library resolves to
    /// index 0, the shelf `place` creates with it.
    pub fn shelf_with_room(&mut self, name: &str, book_id: i32) -> Result<i32, LibraryError> {
        let Some(library) = self.find_library(name) else {
            return Ok(0);
        };

        let existing = library
            .shelves
            .iter()
            .position(|s| s.contains(book_id))
            .or_else(|| library.shelves.iter().position(|s| !s.is_full()));
        let index = match existing {
            Some(index) => index,
            None => {
                self.add_shelf(name)?;
                self.library(name)?.shelves.len() - 1
            }
        };

        i32::try_from(index).map_err(|_| LibraryError::InvalidShelfIndex(i32::MAX))
    }

    pub fn rename_library(&mut self, name: &str, new_name: &str) -> Result<(), LibraryError> {
        if name != new_name && self.find_library(new_name).is_some() {
            return Err(LibraryError::DuplicateLibrary(new_name.to_string()));
        }

        self.library_mut(name)?.name = new_name.to_string();

        Ok(())
    }

    /// Books of the library that no other library holds.
    pub fn orphaned_books(&self, name: &str) -> Result<Vec<i32>, LibraryError> {
        let library = self.library(name)?;

        Ok(library
            .book_ids()
            .into_iter()
            .filter(|id| {
                !self
                    .libraries
                    .iter()
                    .filter(|l| l.name != name)
                    .any(|l| l.contains(*id))
            })
            .collect())
    }

    /// Deletes a library.
    ///
    /// With conditional consent the deletion is refused when it would orphan books,
    /// returning them so the caller can confirm with unconditional consent.
    pub fn delete_library(&mut self, name: &str, consent: Consent) -> Result<Library, LibraryError> {
        if consent == Consent::Conditional {
            let orphaned = self.orphaned_books(name)?;
            if !orphaned.is_empty() {
                return Err(LibraryError::ConsentRequired {
                    library: name.to_string(),
                    orphaned,
                });
            }
        }

        let index = self
            .libraries
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| LibraryError::LibraryNotFound(name.to_string()))?;

        Ok(self.libraries.remove(index))
    }

    /// Moves books from one library onto the first shelf of another.
    ///
    /// Every occurrence in the source is removed. Each book lands once on the target
    /// shelf after its last position, keeping color, status and progress; books the
    /// target shelf already holds are not duplicated. Capacity is checked before
    /// anything changes.
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - Ids removed from the source, empty when none were present
    /// - `Err(LibraryError::LibraryNotFound)` - Source or target missing
    /// - `Err(LibraryError::ShelfFull)` - Target shelf lacks room for the books
    pub fn move_books(
        &mut self,
        from: &str,
        to: &str,
        book_ids: &[i32],
    ) -> Result<Vec<i32>, LibraryError> {
        if from == to {
            return Err(LibraryError::SameLibrary(from.to_string()));
        }

        let source = self.library(from)?;
        let target = self.library(to)?;

        let mut moving: Vec<Placement> = Vec::new();
        for placement in source.shelves.iter().flat_map(|s| &s.placements) {
            if book_ids.contains(&placement.book_id)
                && !moving.iter().any(|m| m.book_id == placement.book_id)
            {
                moving.push(placement.clone());
            }
        }

        if moving.is_empty() {
            return Ok(Vec::new());
        }

        let (target_len, target_shelf_id) = target
            .shelves
            .first()
            .map_or((0, FIRST_SHELF_ID), |s| (s.placements.len(), s.shelf_id));
        let appended = moving
            .iter()
            .filter(|m| !target.shelves.first().is_some_and(|s| s.contains(m.book_id)))
            .count();
        if target_len + appended > SHELF_CAPACITY {
            return Err(LibraryError::ShelfFull(target_shelf_id));
        }

        let moved: Vec<i32> = moving.iter().map(|m| m.book_id).collect();

        for shelf in self.library_mut(from)?.shelves.iter_mut() {
            shelf.placements.retain(|p| !moved.contains(&p.book_id));
        }

        let target = self.library_mut(to)?;
        if target.shelves.is_empty() {
            target.shelves.push(Shelf::new(FIRST_SHELF_ID));
        }
        let shelf = &mut target.shelves[0];
        for mut placement in moving {
            if shelf.contains(placement.book_id) {
                continue;
            }
            placement.position = shelf.next_position();
            shelf.placements.push(placement);
        }
        shelf.sort();

        Ok(moved)
    }

    /// Book id of every placement, repeated once per occurrence.
    pub fn placed_book_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.placements().map(|(_, _, _, p)| p.book_id)
    }
}

/// A stored record with its concurrency version.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLibrary {
    pub user_id: i32,
    pub record: LibraryRecord,
    /// Incremented on every write; a write against a stale version is refused.
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}

impl StoredLibrary {
    pub fn into_dto(self) -> LibraryRecordDto {
        LibraryRecordDto {
            user_id: self.user_id,
            libraries: self
                .record
                .libraries
                .into_iter()
                .map(Library::into_dto)
                .collect(),
            version: self.version,
            updated_at: self.updated_at,
        }
    }
}
