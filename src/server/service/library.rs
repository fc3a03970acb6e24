//! Shelf and library service.
//!
//! Every write follows the same unit of work: read the reader's record with its
//! version, apply one `LibraryRecord` method to it, and write it back conditional on
//! the version. A failing method leaves the stored record untouched, and a write that
//! loses a race is refused with a version conflict.

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::library::{Consent, ReadingStatus},
    server::{
        data::{book::BookRepository, library::LibraryRepository},
        error::{library::LibraryError, AppError},
        model::library::{
            Library, LibraryRecord, LocatedPlacement, PlaceBook, PlaceOutcome, Placement, Shelf,
            StoredLibrary,
        },
    },
};

/// Applies one change to a reader's record and stores it.
///
/// # Arguments
/// - `conn` - Connection or open transaction
/// - `user_id` - Owner of the record
/// - `create_if_missing` - Start from an empty record when the reader has none
/// - `apply` - The change; its error aborts the write
///
/// # Returns
/// - `Ok((StoredLibrary, R))` - The stored record and the change's result
/// - `Err(LibraryError::RecordNotFound)` - No record and `create_if_missing` is false
/// - `Err(LibraryError::VersionConflict)` - The record changed since it was read
/// - `Err(AppError)` - The change failed or the database did
pub(crate) async fn mutate_record<C, F, R>(
    conn: &C,
    user_id: i32,
    create_if_missing: bool,
    apply: F,
) -> Result<(StoredLibrary, R), AppError>
where
    C: ConnectionTrait,
    F: FnOnce(&mut LibraryRecord) -> Result<R, LibraryError>,
{
    let repo = LibraryRepository::new(conn);

    let (mut record, version) = match repo.find_by_user(user_id).await? {
        Some(stored) => (stored.record, Some(stored.version)),
        None if create_if_missing => (LibraryRecord::default(), None),
        None => return Err(LibraryError::RecordNotFound(user_id).into()),
    };

    let result = apply(&mut record)?;
    let stored = repo.save(user_id, &record, version).await?;

    Ok((stored, result))
}

pub struct LibraryService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> LibraryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn mutate<F, R>(&self, user_id: i32, apply: F) -> Result<(StoredLibrary, R), AppError>
    where
        F: FnOnce(&mut LibraryRecord) -> Result<R, LibraryError>,
    {
        mutate_record(self.db, user_id, false, apply).await
    }

    /// The reader's full record, every shelf sorted by position.
    pub async fn get_record(&self, user_id: i32) -> Result<StoredLibrary, AppError> {
        LibraryRepository::new(self.db)
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| LibraryError::RecordNotFound(user_id).into())
    }

    /// Places a book, creating the record and the library when missing.
    ///
    /// # Returns
    /// - `Ok((StoredLibrary, PlaceOutcome))` - Stored record and whether the book was
    ///   inserted or an existing placement was updated
    /// - `Err(AppError::NotFound)` - The book is not an active catalog entry
    /// - `Err(AppError::LibraryErr)` - The shelf engine refused the placement
    pub async fn place(
        &self,
        user_id: i32,
        request: PlaceBook,
    ) -> Result<(StoredLibrary, PlaceOutcome), AppError> {
        let book_id = request.book_id;
        let active = BookRepository::new(self.db)
            .find_by_id(book_id)
            .await?
            .is_some_and(|b| b.lifecycle.is_active());
        if !active {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }

        let (stored, outcome) =
            mutate_record(self.db, user_id, true, |record| record.place(request)).await?;

        tracing::debug!("User {} placed book {}: {:?}", user_id, book_id, outcome);

        Ok((stored, outcome))
    }

    pub async fn update_progress(
        &self,
        user_id: i32,
        book_id: i32,
        progress: i32,
    ) -> Result<Placement, AppError> {
        let (_, placement) = self
            .mutate(user_id, |record| record.update_progress(book_id, progress))
            .await?;

        Ok(placement)
    }

    pub async fn update_status(
        &self,
        user_id: i32,
        book_id: i32,
        status: ReadingStatus,
    ) -> Result<Placement, AppError> {
        let (_, placement) = self
            .mutate(user_id, |record| record.update_status(book_id, status))
            .await?;

        Ok(placement)
    }

    /// Removes a book from one library, or from every library when `library` is `None`.
    ///
    /// # Returns
    /// - `Ok(StoredLibrary)` - Record after the removal
    /// - `Err(LibraryError::LibraryNotFound)` - Named library does not exist
    /// - `Err(LibraryError::PlacementNotFound)` - Nothing was removed
    pub async fn remove(
        &self,
        user_id: i32,
        book_id: i32,
        library: Option<&str>,
    ) -> Result<StoredLibrary, AppError> {
        let (stored, _) = self
            .mutate(user_id, |record| match library {
                Some(name) => record.remove_from_library(name, book_id).map(|_| 1),
                None => record.remove_everywhere(book_id),
            })
            .await?;

        Ok(stored)
    }

    /// Recolors every placement of the book.
    pub async fn recolor(
        &self,
        user_id: i32,
        book_id: i32,
        color: &str,
    ) -> Result<StoredLibrary, AppError> {
        let (stored, _) = self
            .mutate(user_id, |record| record.recolor(book_id, color))
            .await?;

        Ok(stored)
    }

    /// Placements of the given color. No match is an empty list.
    pub async fn by_color(
        &self,
        user_id: i32,
        color: &str,
    ) -> Result<Vec<LocatedPlacement>, AppError> {
        Ok(self.get_record(user_id).await?.record.by_color(color))
    }

    pub async fn library(&self, user_id: i32, name: &str) -> Result<Library, AppError> {
        let stored = self.get_record(user_id).await?;

        Ok(stored.record.library(name)?.clone())
    }

    pub async fn shelf(
        &self,
        user_id: i32,
        name: &str,
        shelf_index: i32,
    ) -> Result<Shelf, AppError> {
        let stored = self.get_record(user_id).await?;

        Ok(stored.record.shelf(name, shelf_index)?.clone())
    }

    pub async fn placement_at(
        &self,
        user_id: i32,
        name: &str,
        shelf_index: i32,
        position: i32,
    ) -> Result<Placement, AppError> {
        let stored = self.get_record(user_id).await?;

        Ok(stored
            .record
            .placement_at(name, shelf_index, position)?
            .clone())
    }

    /// Adds an empty library with one shelf, creating the record when missing.
    pub async fn create_library(&self, user_id: i32, name: &str) -> Result<StoredLibrary, AppError> {
        let (stored, _) = mutate_record(self.db, user_id, true, |record| {
            record.create_library(name).map(|_| ())
        })
        .await?;

        Ok(stored)
    }

    /// Appends a shelf and returns the record with the new shelf's id.
    pub async fn add_shelf(&self, user_id: i32, name: &str) -> Result<(StoredLibrary, i32), AppError> {
        self.mutate(user_id, |record| record.add_shelf(name)).await
    }

    pub async fn rename_library(
        &self,
        user_id: i32,
        name: &str,
        new_name: &str,
    ) -> Result<StoredLibrary, AppError> {
        let (stored, _) = self
            .mutate(user_id, |record| record.rename_library(name, new_name))
            .await?;

        Ok(stored)
    }

    /// Deletes a library.
    ///
    /// # Returns
    /// - `Ok(StoredLibrary)` - Record without the library
    /// - `Err(LibraryError::ConsentRequired)` - Conditional consent and the library holds
    ///   books no other library has; the error carries their ids
    /// - `Err(LibraryError::LibraryNotFound)` - No such library
    pub async fn delete_library(
        &self,
        user_id: i32,
        name: &str,
        consent: Consent,
    ) -> Result<StoredLibrary, AppError> {
        let (stored, removed) = self
            .mutate(user_id, |record| record.delete_library(name, consent))
            .await?;

        tracing::info!(
            "User {} deleted library '{}' with {} books",
            user_id,
            removed.name,
            removed.book_ids().len()
        );

        Ok(stored)
    }

    /// Moves books from one library onto the first shelf of another.
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - Ids moved; empty when none were in the source
    pub async fn move_books(
        &self,
        user_id: i32,
        from: &str,
        to: &str,
        book_ids: &[i32],
    ) -> Result<Vec<i32>, AppError> {
        let (_, moved) = self
            .mutate(user_id, |record| record.move_books(from, to, book_ids))
            .await?;

        Ok(moved)
    }
}
