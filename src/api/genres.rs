//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{delete_target, record_id};
use crate::{
    error::AppResult,
    models::GenreForm,
    services::{genres::NOT_FOUND, Removal, Submission},
    validation::parse_id,
    views::pages,
    AppState,
};

const LIST_URL: &str = "/catalog/genres";
const CREATE_TITLE: &str = "Create Genre";
const UPDATE_TITLE: &str = "Update Genre";

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub genreid: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    state.views.render("genre_list.html", &pages::genre_list(&genres))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = record_id(&id, NOT_FOUND)?;
    let (genre, books) = state.services.genres.get(id).await?;
    state
        .views
        .render("genre_detail.html", &pages::genre_detail(&genre, &books))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render(
        "genre_form.html",
        &pages::genre_form(CREATE_TITLE, &GenreForm::default(), &[]),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(form).await? {
        Submission::Saved(genre) => Ok(Redirect::to(&genre.url()).into_response()),
        Submission::Rejected { form, errors } => Ok(state
            .views
            .render("genre_form.html", &pages::genre_form(CREATE_TITLE, &form, &errors))?
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
    match state.services.genres.find(id).await? {
        Some((genre, books)) => Ok(state
            .views
            .render("genre_delete.html", &pages::genre_delete(&genre, &books))?
            .into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteForm>,
) -> AppResult<Response> {
    let Some(id) = delete_target(&id, body.genreid.as_deref())? else {
        return Ok(Redirect::to(LIST_URL).into_response());
    };
    match state.services.genres.delete(id).await? {
        Removal::Removed => Ok(Redirect::to(LIST_URL).into_response()),
        Removal::Blocked((genre, books)) => Ok(state
            .views
            .render("genre_delete.html", &pages::genre_delete(&genre, &books))?
            .into_response()),
    }
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = record_id(&id, NOT_FOUND)?;
    let genre = state.services.genres.edit(id).await?;
    state.views.render(
        "genre_form.html",
        &pages::genre_form(UPDATE_TITLE, &GenreForm::from(&genre), &[]),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let id = record_id(&id, NOT_FOUND)?;
    match state.services.genres.update(id, form).await? {
        Submission::Saved(genre) => Ok(Redirect::to(&genre.url()).into_response()),
        Submission::Rejected { form, errors } => Ok(state
            .views
            .render("genre_form.html", &pages::genre_form(UPDATE_TITLE, &form, &errors))?
            .into_response()),
    }
}
