//! Book instance pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use super::{delete_target, record_id};
use crate::{
    error::AppResult,
    models::{BookInstanceForm, BookTitle},
    services::{book_instances::NOT_FOUND, Submission},
    validation::{parse_id, FieldError},
    views::pages,
    AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";
const CREATE_TITLE: &str = "Create Book Instance";
const UPDATE_TITLE: &str = "Update Book Instance";

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub instanceid: Option<String>,
}

fn render_form(
    state: &AppState,
    title: &str,
    form: &BookInstanceForm,
    books: &[BookTitle],
    errors: &[FieldError],
) -> AppResult<Response> {
    Ok(state
        .views
        .render("bookinstance_form.html", &pages::book_instance_form(title, form, books, errors))?
        .into_response())
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.book_instances.list().await?;
    state
        .views
        .render("bookinstance_list.html", &pages::book_instance_list(&instances))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = record_id(&id, NOT_FOUND)?;
    let instance = state.services.book_instances.get(id).await?;
    state
        .views
        .render("bookinstance_detail.html", &pages::book_instance_detail(&instance))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Response> {
    let books = state.services.book_instances.book_choices().await?;
    render_form(&state, CREATE_TITLE, &BookInstanceForm::default(), &books, &[])
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(form).await? {
        Submission::Saved(instance) => Ok(Redirect::to(&instance.url()).into_response()),
        Submission::Rejected { form, errors } => {
            let books = state.services.book_instances.book_choices().await?;
            render_form(&state, CREATE_TITLE, &form, &books, &errors)
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
    match state.services.book_instances.find(id).await? {
        Some(instance) => Ok(state
            .views
            .render("bookinstance_delete.html", &pages::book_instance_delete(&instance))?
            .into_response()),
        None => Ok(Redirect::to(LIST_URL).into_response()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteForm>,
) -> AppResult<Redirect> {
    if let Some(id) = delete_target(&id, body.instanceid.as_deref())? {
        state.services.book_instances.delete(id).await?;
    }
    Ok(Redirect::to(LIST_URL))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = record_id(&id, NOT_FOUND)?;
    let (instance, books) = state.services.book_instances.edit(id).await?;
    let form = BookInstanceForm::from(&instance.instance);
    render_form(&state, UPDATE_TITLE, &form, &books, &[])
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let id = record_id(&id, NOT_FOUND)?;
    match state.services.book_instances.update(id, form).await? {
        Submission::Saved(instance) => Ok(Redirect::to(&instance.url()).into_response()),
        Submission::Rejected { form, errors } => {
            let books = state.services.book_instances.book_choices().await?;
            render_form(&state, UPDATE_TITLE, &form, &books, &errors)
        }
    }
}
