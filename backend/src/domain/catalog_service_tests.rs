//! Tests for the catalog service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockBookMetadataSource, MockBookRepository};
use crate::domain::NotFoundScope;

type TestService = CatalogService<MockBookRepository, MockBookMetadataSource>;

fn make_service(repo: MockBookRepository, metadata: MockBookMetadataSource) -> TestService {
    CatalogService::new(Arc::new(repo), Arc::new(metadata))
}

#[fixture]
fn isbn() -> Isbn {
    Isbn::new("9780345391803").expect("valid ISBN")
}

#[fixture]
fn hitchhiker(isbn: Isbn) -> Book {
    Book::new("The Hitchhiker's Guide to the Galaxy", "Douglas Adams", isbn)
}

#[rstest]
#[tokio::test]
async fn add_resolves_and_inserts_new_book(isbn: Isbn, hitchhiker: Book) {
    let mut repo = MockBookRepository::new();
    repo.expect_find_by_isbn()
        .with(eq(isbn.clone()))
        .times(1)
        .return_once(|_| Ok(None));
    let expected = hitchhiker.clone();
    repo.expect_insert()
        .withf(move |book| book == &expected)
        .times(1)
        .return_once(|_| Ok(()));
    let mut metadata = MockBookMetadataSource::new();
    let resolved = hitchhiker.clone();
    metadata
        .expect_resolve()
        .times(1)
        .return_once(move |_| Ok(resolved));

    let service = make_service(repo, metadata);
    let book = service.add(&isbn).await.expect("add succeeds");

    assert_eq!(book, hitchhiker);
}

#[rstest]
#[tokio::test]
async fn add_rejects_duplicate_without_resolving(isbn: Isbn, hitchhiker: Book) {
    let mut repo = MockBookRepository::new();
    repo.expect_find_by_isbn()
        .times(1)
        .return_once(move |_| Ok(Some(hitchhiker)));
    repo.expect_insert().never();
    let mut metadata = MockBookMetadataSource::new();
    metadata.expect_resolve().never();

    let service = make_service(repo, metadata);
    let error = service.add(&isbn).await.expect_err("duplicate");

    assert_eq!(error, CatalogError::already_exists(isbn));
}

#[rstest]
#[tokio::test]
async fn add_reports_metadata_miss_without_inserting(isbn: Isbn) {
    let mut repo = MockBookRepository::new();
    repo.expect_find_by_isbn().return_once(|_| Ok(None));
    repo.expect_insert().never();
    let mut metadata = MockBookMetadataSource::new();
    metadata
        .expect_resolve()
        .return_once(|isbn| Err(BookMetadataSourceError::not_found(isbn.as_str())));

    let service = make_service(repo, metadata);
    let error = service.add(&isbn).await.expect_err("not found");

    assert!(matches!(
        error,
        CatalogError::NotFound {
            scope: NotFoundScope::MetadataSource,
            ..
        }
    ));
}

#[rstest]
#[tokio::test]
async fn add_reports_unreachable_source_without_inserting(isbn: Isbn) {
    let mut repo = MockBookRepository::new();
    repo.expect_find_by_isbn().return_once(|_| Ok(None));
    repo.expect_insert().never();
    let mut metadata = MockBookMetadataSource::new();
    metadata
        .expect_resolve()
        .return_once(|_| Err(BookMetadataSourceError::unreachable("connection refused")));

    let service = make_service(repo, metadata);
    let error = service.add(&isbn).await.expect_err("unreachable");

    assert_eq!(error, CatalogError::unreachable("connection refused"));
}

#[rstest]
#[tokio::test]
async fn add_maps_insert_collision_to_already_exists(isbn: Isbn, hitchhiker: Book) {
    let mut repo = MockBookRepository::new();
    repo.expect_find_by_isbn().return_once(|_| Ok(None));
    repo.expect_insert()
        .return_once(|book| Err(BookRepositoryError::duplicate_isbn(book.isbn.as_str())));
    let mut metadata = MockBookMetadataSource::new();
    metadata
        .expect_resolve()
        .return_once(move |_| Ok(hitchhiker));

    let service = make_service(repo, metadata);
    let error = service.add(&isbn).await.expect_err("concurrent duplicate");

    assert_eq!(error, CatalogError::already_exists(isbn));
}

#[rstest]
#[tokio::test]
async fn add_maps_lookup_failure_to_storage(isbn: Isbn) {
    let mut repo = MockBookRepository::new();
    repo.expect_find_by_isbn()
        .return_once(|_| Err(BookRepositoryError::connection("pool exhausted")));
    let mut metadata = MockBookMetadataSource::new();
    metadata.expect_resolve().never();

    let service = make_service(repo, metadata);
    let error = service.add(&isbn).await.expect_err("storage failure");

    assert!(matches!(error, CatalogError::Storage { .. }));
}

#[rstest]
#[tokio::test]
async fn remove_returns_deleted_book(isbn: Isbn, hitchhiker: Book) {
    let mut repo = MockBookRepository::new();
    let stored = hitchhiker.clone();
    repo.expect_delete_by_isbn()
        .with(eq(isbn.clone()))
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let service = make_service(repo, MockBookMetadataSource::new());
    let removed = service.remove(&isbn).await.expect("remove succeeds");

    assert_eq!(removed, hitchhiker);
}

#[rstest]
#[tokio::test]
async fn remove_reports_missing_book(isbn: Isbn) {
    let mut repo = MockBookRepository::new();
    repo.expect_delete_by_isbn().return_once(|_| Ok(None));

    let service = make_service(repo, MockBookMetadataSource::new());
    let error = service.remove(&isbn).await.expect_err("missing");

    assert_eq!(error, CatalogError::not_in_catalog(isbn));
}

#[rstest]
#[tokio::test]
async fn find_returns_none_for_unknown_isbn(isbn: Isbn) {
    let mut repo = MockBookRepository::new();
    repo.expect_find_by_isbn().return_once(|_| Ok(None));

    let service = make_service(repo, MockBookMetadataSource::new());
    let found = service.find(&isbn).await.expect("find succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn list_forwards_page_window(hitchhiker: Book) {
    let page = Page::new(5, Some(10));
    let mut repo = MockBookRepository::new();
    repo.expect_list()
        .with(eq(page))
        .times(1)
        .return_once(move |_| Ok(vec![hitchhiker]));

    let service = make_service(repo, MockBookMetadataSource::new());
    let books = service.list(page).await.expect("list succeeds");

    assert_eq!(books.len(), 1);
}

#[rstest]
#[tokio::test]
async fn list_maps_query_failure_to_storage() {
    let mut repo = MockBookRepository::new();
    repo.expect_list()
        .return_once(|_| Err(BookRepositoryError::query("relation missing")));

    let service = make_service(repo, MockBookMetadataSource::new());
    let error = service.list(Page::all()).await.expect_err("query failure");

    assert_eq!(
        error,
        CatalogError::storage("book repository query failed: relation missing")
    );
}
