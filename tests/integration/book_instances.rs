use axum::http::StatusCode;
use uuid::Uuid;

use catalog_server::models::BookInstanceStatus;

use crate::support::{id_from_location, TestApp};

async fn app_with_book() -> (TestApp, catalog_server::models::Book) {
    let app = TestApp::new();
    let author = app.seed_author("Frank", "Herbert").await;
    let book = app.seed_book("Dune", &author, &[]).await;
    (app, book)
}

#[tokio::test]
async fn test_create_trims_and_defaults_status() {
    let (app, book) = app_with_book().await;
    let book_id = book.id.to_string();

    let response = app
        .post(
            "/catalog/bookinstance/create",
            &[("book", &book_id), ("imprint", " Penguin "), ("due_back", "")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let location = response.location.expect("redirect location");
    let id = id_from_location(&location);
    assert_eq!(location, format!("/catalog/bookinstance/{}", id));

    let stored = app.store.book_instance(id).await.expect("record persisted");
    assert_eq!(stored.book_id, book.id);
    assert_eq!(stored.imprint, "Penguin");
    assert_eq!(stored.status, BookInstanceStatus::Maintenance);
    assert_eq!(stored.due_back, None);

    let detail = app.get(&location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Penguin"));
    assert!(detail.body.contains("Dune"));
}

#[tokio::test]
async fn test_create_escapes_markup() {
    let (app, book) = app_with_book().await;
    let book_id = book.id.to_string();

    let response = app
        .post(
            "/catalog/bookinstance/create",
            &[("book", &book_id), ("imprint", "<b>Ace</b>"), ("status", "Loaned"), ("due_back", "2024-03-01")],
        )
        .await;

    let id = id_from_location(&response.location.expect("redirect location"));
    let stored = app.store.book_instance(id).await.expect("record persisted");
    assert_eq!(stored.imprint, "&lt;b&gt;Ace&lt;&#x2F;b&gt;");
    assert_eq!(stored.status, BookInstanceStatus::Loaned);

    let detail = app.get(&format!("/catalog/bookinstance/{}", id)).await;
    assert!(!detail.body.contains("<b>Ace"));
    assert!(detail.body.contains("March 1st, 2024"));
}

#[tokio::test]
async fn test_create_without_book_rerenders_form() {
    let (app, _) = app_with_book().await;

    let response = app
        .post("/catalog/bookinstance/create", &[("book", ""), ("imprint", "Penguin")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Book must be specified"));
    assert!(response.body.contains("value=\"Penguin\""));
    assert_eq!(app.store.book_instance_total().await, 0);
}

#[tokio::test]
async fn test_create_missing_fields_reports_each() {
    let (app, _) = app_with_book().await;

    let response = app
        .post("/catalog/bookinstance/create", &[("imprint", "   ")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let book_error = response.body.find("Book must be specified").expect("book error");
    let imprint_error = response.body.find("Imprint must be specified").expect("imprint error");
    assert!(book_error < imprint_error);
    assert_eq!(app.store.book_instance_total().await, 0);
}

#[tokio::test]
async fn test_create_rejects_unparseable_due_date() {
    let (app, book) = app_with_book().await;
    let book_id = book.id.to_string();

    let response = app
        .post(
            "/catalog/bookinstance/create",
            &[("book", &book_id), ("imprint", "Penguin"), ("due_back", "next tuesday")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid date"));
    assert_eq!(app.store.book_instance_total().await, 0);
}

#[tokio::test]
async fn test_detail_missing_is_not_found() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/catalog/bookinstance/{}", Uuid::now_v7()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Book instance not found"));

    let response = app.get("/catalog/bookinstance/not-an-id").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_confirm_missing_redirects_to_list() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/catalog/bookinstance/{}/delete", Uuid::now_v7()))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog/bookinstances"));
}

#[tokio::test]
async fn test_delete_removes_record() {
    let (app, book) = app_with_book().await;
    let instance = app.seed_book_instance(&book, "Penguin").await;
    let path = format!("{}/delete", instance.url());

    let confirm = app.get(&path).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains(&instance.id.to_string()));

    let response = app
        .post(&path, &[("instanceid", &instance.id.to_string())])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog/bookinstances"));
    assert!(app.store.book_instance(instance.id).await.is_none());

    // Already gone
    let response = app.post(&path, &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_delete_with_mismatched_body_id_is_rejected() {
    let (app, book) = app_with_book().await;
    let instance = app.seed_book_instance(&book, "Penguin").await;

    let response = app
        .post(
            &format!("{}/delete", instance.url()),
            &[("instanceid", &Uuid::now_v7().to_string())],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.book_instance(instance.id).await.is_some());
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let (app, book) = app_with_book().await;
    let instance = app.seed_book_instance(&book, "Penguin").await;
    let book_id = book.id.to_string();

    let form = app.get(&format!("{}/update", instance.url())).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("value=\"Penguin\""));

    let response = app
        .post(
            &format!("{}/update", instance.url()),
            &[("book", &book_id), ("imprint", "Vintage"), ("due_back", "2024-05-01"), ("status", "Loaned")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location, Some(instance.url()));

    let stored = app.store.book_instance(instance.id).await.expect("still present");
    assert_eq!(stored.imprint, "Vintage");
    assert_eq!(stored.status, BookInstanceStatus::Loaned);
    assert_eq!(stored.due_back, chrono::NaiveDate::from_ymd_opt(2024, 5, 1));
    assert_eq!(app.store.book_instance_total().await, 1);
}

#[tokio::test]
async fn test_update_requires_every_field() {
    let (app, book) = app_with_book().await;
    let instance = app.seed_book_instance(&book, "Penguin").await;
    let book_id = book.id.to_string();

    let response = app
        .post(
            &format!("{}/update", instance.url()),
            &[("book", &book_id), ("imprint", "Vintage")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Due date must be specified"));
    assert!(response.body.contains("Status must be specified"));

    let stored = app.store.book_instance(instance.id).await.expect("still present");
    assert_eq!(stored.imprint, "Penguin");
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let (app, book) = app_with_book().await;
    let book_id = book.id.to_string();

    let response = app
        .post(
            &format!("/catalog/bookinstance/{}/update", Uuid::now_v7()),
            &[("book", &book_id), ("imprint", "Vintage"), ("due_back", "2024-05-01"), ("status", "Loaned")],
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.book_instance_total().await, 0);
}

#[tokio::test]
async fn test_list_in_creation_order() {
    let (app, book) = app_with_book().await;
    app.seed_book_instance(&book, "First Imprint").await;
    app.seed_book_instance(&book, "Second Imprint").await;

    let response = app.get("/catalog/bookinstances").await;
    assert_eq!(response.status, StatusCode::OK);
    let first = response.body.find("First Imprint").expect("first listed");
    let second = response.body.find("Second Imprint").expect("second listed");
    assert!(first < second);
}

#[tokio::test]
async fn test_store_failure_renders_error_page() {
    let app = TestApp::new();
    app.store.fail();

    let response = app.get("/catalog/bookinstances").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Database error"));
    assert!(response.body.contains("<html"));
}
