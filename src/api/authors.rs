//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{delete_target, record_id};
use crate::{
    error::AppResult,
    models::AuthorForm,
    services::{authors::NOT_FOUND, Removal, Submission},
    validation::parse_id,
    views::pages,
    AppState,
};

const LIST_URL: &str = "/catalog/authors";
const CREATE_TITLE: &str = "Create Author";
const UPDATE_TITLE: &str = "Update Author";

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub authorid: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    state.views.render("author_list.html", &pages::author_list(&authors))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = record_id(&id, NOT_FOUND)?;
    let (author, books) = state.services.authors.get(id).await?;
    state
        .views
        .render("author_detail.html", &pages::author_detail(&author, &books))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render(
        "author_form.html",
        &pages::author_form(CREATE_TITLE, &AuthorForm::default(), &[]),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(form).await? {
        Submission::Saved(author) => Ok(Redirect::to(&author.url()).into_response()),
        Submission::Rejected { form, errors } => Ok(state
            .views
            .render("author_form.html", &pages::author_form(CREATE_TITLE, &form, &errors))?
            .into_response()),
    }
}

pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.authors.find(id).await? {
        Some((author, books)) => Ok(state
            .views
            .render("author_delete.html", &pages::author_delete(&author, &books))?
            .into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteForm>,
) -> AppResult<Response> {
    let Some(id) = delete_target(&id, body.authorid.as_deref())? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.authors.delete(id).await? {
        Removal::Removed => Ok(Redirect::to(LIST_URL).into_response()),
        Removal::Blocked((author, books)) => Ok(state
            .views
            .render("author_delete.html", &pages::author_delete(&author, &books))?
            .into_response()),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = record_id(&id, NOT_FOUND)?;
    let author = state.services.authors.edit(id).await?;
    state.views.render(
        "author_form.html",
        &pages::author_form(UPDATE_TITLE, &AuthorForm::from(&author), &[]),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let id = record_id(&id, NOT_FOUND)?;
    match state.services.authors.update(id, form).await? {
        Submission::Saved(author) => Ok(Redirect::to(&author.url()).into_response()),
        Submission::Rejected { form, errors } => Ok(state
            .views
            .render("author_form.html", &pages::author_form(UPDATE_TITLE, &form, &errors))?
            .into_response()),
    }
}
