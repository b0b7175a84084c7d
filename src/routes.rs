//! Application router

use axum::{
    http::{header, HeaderName, HeaderValue},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{api, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(api::catalog::home))
        // Book instances
        .route("/bookinstances", get(api::book_instances::list))
        .route(
            "/bookinstance/create",
            get(api::book_instances::create_form).post(api::book_instances::create),
        )
        .route("/bookinstance/:id", get(api::book_instances::detail))
        .route(
            "/bookinstance/:id/delete",
            get(api::book_instances::delete_form).post(api::book_instances::delete),
        )
        .route(
            "/bookinstance/:id/update",
            get(api::book_instances::update_form).post(api::book_instances::update),
        )
        // Books
        .route("/books", get(api::books::list))
        .route(
            "/book/create",
            get(api::books::create_form).post(api::books::create),
        )
        .route("/book/:id", get(api::books::detail))
        .route(
            "/book/:id/delete",
            get(api::books::delete_form).post(api::books::delete),
        )
        .route(
            "/book/:id/update",
            get(api::books::update_form).post(api::books::update),
        )
        // Authors
        .route("/authors", get(api::authors::list))
        .route(
            "/author/create",
            get(api::authors::create_form).post(api::authors::create),
        )
        .route("/author/:id", get(api::authors::detail))
        .route(
            "/author/:id/delete",
            get(api::authors::delete_form).post(api::authors::delete),
        )
        .route(
            "/author/:id/update",
            get(api::authors::update_form).post(api::authors::update),
        )
        // Genres
        .route("/genres", get(api::genres::list))
        .route(
            "/genre/create",
            get(api::genres::create_form).post(api::genres::create),
        )
        .route("/genre/:id", get(api::genres::detail))
        .route(
            "/genre/:id/delete",
            get(api::genres::delete_form).post(api::genres::delete),
        )
        .route(
            "/genre/:id/update",
            get(api::genres::update_form).post(api::genres::update),
        );

    let app = Router::new()
        .route("/", get(api::catalog::index))
        .route("/about", get(api::catalog::about))
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .nest("/catalog", catalog)
        .nest_service("/public", ServeDir::new(&state.config.assets.dir))
        .fallback(api::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::error_boundary,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    with_security_headers(app)
}

/// Browser hardening headers, added to every response that does not set them
fn with_security_headers(router: Router) -> Router {
    [
        (header::X_DNS_PREFETCH_CONTROL, "off"),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (
            header::STRICT_TRANSPORT_SECURITY,
            "max-age=15552000; includeSubDomains",
        ),
        (HeaderName::from_static("x-download-options"), "noopen"),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_XSS_PROTECTION, "0"),
    ]
    .into_iter()
    .fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            name,
            HeaderValue::from_static(value),
        ))
    })
}
