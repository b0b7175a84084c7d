//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorReport},
    validation::parse_id,
    views::pages,
    AppState,
};

/// Identifier from a path segment; malformed identifiers name no record.
pub(crate) fn record_id(raw: &str, not_found: &str) -> AppResult<Uuid> {
    parse_id(raw).ok_or_else(|| AppError::NotFound(not_found.to_string()))
}

/// Record targeted by a delete submission.
///
/// The path identifier is authoritative. A confirmation form also posts the
/// identifier it was rendered for; when present it must name the same record.
pub(crate) fn delete_target(path_id: &str, body_id: Option<&str>) -> AppResult<Option<Uuid>> {
    let target = parse_id(path_id);
    if let Some(body_id) = body_id.map(str::trim).filter(|v| !v.is_empty()) {
        if parse_id(body_id) != target {
            return Err(AppError::BadRequest(
                "Submitted identifier does not match the requested record".to_string(),
            ));
        }
    }
    Ok(target)
}

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Render the error page for any response produced from an [`AppError`].
pub async fn error_boundary(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let detail = state
        .config
        .server
        .is_development()
        .then_some(report.detail.as_str());

    match state
        .views
        .render("error.html", &pages::error(&report.message, detail))
    {
        Ok(html) => (report.status, html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}
