//! Site pages: root redirect, about, catalog home

use axum::{extract::State, response::{Html, Redirect}};

use crate::{error::AppResult, views::pages, AppState};

pub async fn index() -> Redirect {
    Redirect::to("/catalog")
}

pub async fn about(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render("about.html", &pages::about())
}

/// Catalog home with record counts
pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    state.views.render("index.html", &pages::home(&counts))
}
