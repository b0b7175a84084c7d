//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{delete_target, record_id};
use crate::{
    error::AppResult,
    models::BookForm,
    services::{books::NOT_FOUND, Removal, Submission},
    validation::{parse_id, FieldError},
    views::pages,
    AppState,
};

const LIST_URL: &str = "/catalog/books";
const CREATE_TITLE: &str = "Create Book";
const UPDATE_TITLE: &str = "Update Book";

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub bookid: Option<String>,
}

/// Render the form with fresh author and genre choices
async fn render_form(
    state: &AppState,
    title: &str,
    form: &BookForm,
    errors: &[FieldError],
) -> AppResult<Response> {
    let (authors, genres) = state.services.books.choices().await?;
    Ok(state
        .views
        .render(
            "book_form.html",
            &pages::book_form(title, form, &authors, &genres, errors),
        )?
        .into_response())
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list().await?;
    state.views.render("book_list.html", &pages::book_list(&books))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = record_id(&id, NOT_FOUND)?;
    let (book, instances) = state.services.books.get(id).await?;
    state
        .views
        .render("book_detail.html", &pages::book_detail(&book, &instances))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Response> {
    render_form(&state, CREATE_TITLE, &BookForm::default(), &[]).await
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(form).await? {
        Submission::Saved(book) => Ok(Redirect::to(&book.url()).into_response()),
        Submission::Rejected { form, errors } => {
            render_form(&state, CREATE_TITLE, &form, &errors).await
        }
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.books.find(id).await? {
        Some((book, instances)) => Ok(state
            .views
            .render("book_delete.html", &pages::book_delete(&book, &instances))?
            .into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteForm>,
) -> AppResult<Response> {
    let Some(id) = delete_target(&id, body.bookid.as_deref())? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.books.delete(id).await? {
        Removal::Removed => Ok(Redirect::to(LIST_URL).into_response()),
        Removal::Blocked((book, instances)) => Ok(state
            .views
            .render("book_delete.html", &pages::book_delete(&book, &instances))?
            .into_response()),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = record_id(&id, NOT_FOUND)?;
    let (book, authors, genres) = state.services.books.edit(id).await?;
    let form = BookForm::from(&book.book);
    state.views.render(
        "book_form.html",
        &pages::book_form(UPDATE_TITLE, &form, &authors, &genres, &[]),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let id = record_id(&id, NOT_FOUND)?;
    match state.services.books.update(id, form).await? {
        Submission::Saved(book) => Ok(Redirect::to(&book.url()).into_response()),
        Submission::Rejected { form, errors } => {
            render_form(&state, UPDATE_TITLE, &form, &errors).await
        }
    }
}
