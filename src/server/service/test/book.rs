use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{
    model::book::{IndustryIdentifierDto, VolumeDto, VolumeInfoDto, VolumesDto},
    server::{
        model::book::UpsertBookParams,
        service::{book::BookService, catalog::CatalogProvider},
    },
};

/// Catalog double returning a fixed set of volumes and counting calls.
#[derive(Default)]
struct StubCatalog {
    volumes: Vec<UpsertBookParams>,
    calls: AtomicUsize,
}

impl StubCatalog {
    fn with(volumes: Vec<UpsertBookParams>) -> Self {
        Self {
            volumes,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogProvider for StubCatalog {
    async fn by_isbn(&self, isbn: &str) -> Result<Vec<UpsertBookParams>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .volumes
            .iter()
            .filter(|v| v.isbns.iter().any(|i| i == isbn))
            .cloned()
            .collect())
    }

    async fn search(&self, _text: &str) -> Result<Vec<UpsertBookParams>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.volumes.clone())
    }
}

fn volume(title: &str, isbns: &[&str]) -> UpsertBookParams {
    UpsertBookParams {
        isbns: isbns.iter().map(|i| i.to_string()).collect(),
        title: title.to_string(),
        authors: vec!["Bibhutibhushan Bandyopadhyay".to_string()],
        publisher: "Indiana University Press".to_string(),
        publication_year: Some(1929),
        genres: vec!["Fiction".to_string()],
        description: String::new(),
        cover_image: String::new(),
        languages: vec!["bn".to_string()],
        rating: 4.0,
    }
}

/// Tests the cache-aside ISBN lookup.
///
/// Expected: the first lookup fetches from the catalog and stores the book, the
/// second is served locally
#[tokio::test]
async fn isbn_lookup_falls_back_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let catalog = StubCatalog::with(vec![volume("Pather Panchali", &["9780253201935"])]);
    let service = BookService::new(db, &catalog);

    let fetched = service.get_by_isbn("9780253201935").await?;
    let cached = service.get_by_isbn("9780253201935").await?;

    assert_eq!(fetched.id, cached.id);
    assert_eq!(catalog.calls(), 1);

    Ok(())
}

/// Tests an ISBN neither source knows.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn unknown_isbn_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let catalog = StubCatalog::default();

    let result = BookService::new(db, &catalog).get_by_isbn("0000000000").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that importing a volume sharing an ISBN refreshes the stored book.
///
/// Expected: same id, the new ISBN is added and the title updated
#[tokio::test]
async fn import_merges_by_shared_isbn() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::book::BookFactory::new(db)
        .title("Aparajito")
        .isbn("9780253201942")
        .build()
        .await?;
    let catalog = StubCatalog::default();
    let volumes = VolumesDto {
        items: vec![VolumeDto {
            volume_info: VolumeInfoDto {
                title: Some("Aparajito (Revised)".to_string()),
                industry_identifiers: Some(vec![
                    IndustryIdentifierDto {
                        kind: "ISBN_13".to_string(),
                        identifier: "9780253201942".to_string(),
                    },
                    IndustryIdentifierDto {
                        kind: "ISBN_10".to_string(),
                        identifier: "0253201942".to_string(),
                    },
                ]),
                ..Default::default()
            },
        }],
    };

    let imported = BookService::new(db, &catalog).import(volumes).await?;

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].id, existing.id);
    assert_eq!(imported[0].title, "Aparajito (Revised)");
    assert!(imported[0].isbns.contains(&"0253201942".to_string()));

    Ok(())
}

/// Tests importing a page with nothing usable.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn import_without_usable_volumes_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let catalog = StubCatalog::default();
    let volumes = VolumesDto {
        items: vec![VolumeDto {
            volume_info: VolumeInfoDto::default(),
        }],
    };

    let result = BookService::new(db, &catalog).import(volumes).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests searching when neither source has a match.
///
/// Expected: an empty list rather than an error
#[tokio::test]
async fn empty_search_is_empty_list() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let catalog = StubCatalog::default();

    let books = BookService::new(db, &catalog).search("nothing here").await?;

    assert!(books.is_empty());
    assert_eq!(catalog.calls(), 1);

    Ok(())
}

/// Tests that a soft deleted book is hidden from lookups.
///
/// Expected: Err(AppError::NotFound) after deletion
#[tokio::test]
async fn deleted_book_is_hidden() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let book = factory::create_book(db).await?;
    let catalog = StubCatalog::default();
    let service = BookService::new(db, &catalog);

    service.delete(book.id, "admin:1".to_string()).await?;

    assert!(matches!(
        service.get_by_id(book.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
