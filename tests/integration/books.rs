use axum::http::StatusCode;

use crate::support::{id_from_location, TestApp};

#[tokio::test]
async fn test_create_with_genre_list() {
    let app = TestApp::new();
    let author = app.seed_author("Ursula", "Le Guin").await;
    let fantasy = app.seed_genre("Fantasy").await;
    let classic = app.seed_genre("Classic").await;
    let author_id = author.id.to_string();
    let genre_list = format!("{}; {}", fantasy.id, classic.id);
    let fantasy_id = fantasy.id.to_string();

    let response = app
        .post(
            "/catalog/book/create",
            &[
                ("title", "A Wizard of Earthsea"),
                ("author", &author_id),
                ("summary", "A young mage"),
                ("isbn", "9780547773742"),
                ("genre", &genre_list),
                ("genre", &fantasy_id),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let location = response.location.expect("redirect location");

    let book = app
        .store
        .book(id_from_location(&location))
        .await
        .expect("book persisted");
    assert_eq!(book.genre_ids, vec![fantasy.id, classic.id]);

    let detail = app.get(&location).await;
    assert!(detail.body.contains("Le Guin, Ursula"));
    assert!(detail.body.contains("Fantasy"));
    assert!(detail.body.contains("Classic"));
}

#[tokio::test]
async fn test_missing_fields_rerender_with_choices() {
    let app = TestApp::new();
    let author = app.seed_author("Ursula", "Le Guin").await;

    let response = app
        .post("/catalog/book/create", &[("title", "Untitled"), ("genre", "not-a-genre")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Author must not be empty."));
    assert!(response.body.contains("Summary must not be empty."));
    assert!(response.body.contains("ISBN must not be empty."));
    assert!(response.body.contains("Invalid genre"));
    assert!(response.body.contains(&author.id.to_string()));
}

#[tokio::test]
async fn test_update_form_marks_current_choices() {
    let app = TestApp::new();
    let author = app.seed_author("Ursula", "Le Guin").await;
    let genre = app.seed_genre("Fantasy").await;
    let book = app.seed_book("Earthsea", &author, &[&genre]).await;

    let response = app.get(&format!("{}/update", book.url())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(&format!("value=\"{}\" selected", author.id)));
    assert!(response.body.contains(&format!("value=\"{}\" checked", genre.id)));
}

#[tokio::test]
async fn test_delete_blocked_while_copies_exist() {
    let app = TestApp::new();
    let author = app.seed_author("Ursula", "Le Guin").await;
    let book = app.seed_book("Earthsea", &author, &[]).await;
    app.seed_book_instance(&book, "Parnassus").await;

    let response = app
        .post(&format!("{}/delete", book.url()), &[("bookid", &book.id.to_string())])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Parnassus"));
    assert!(app.store.book(book.id).await.is_some());
}
