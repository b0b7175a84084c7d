//! HTML rendering.
//!
//! Handlers hand a page name and a plain data object (see [`pages`]) to the
//! [`TemplateEngine`]; templates are compiled into the binary.

pub mod pages;

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("about.html", include_str!("../../templates/about.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("form_errors.html", include_str!("../../templates/form_errors.html")),
    ("genre_list.html", include_str!("../../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../../templates/genre_delete.html")),
    ("author_list.html", include_str!("../../templates/author_list.html")),
    ("author_detail.html", include_str!("../../templates/author_detail.html")),
    ("author_form.html", include_str!("../../templates/author_form.html")),
    ("author_delete.html", include_str!("../../templates/author_delete.html")),
    ("book_list.html", include_str!("../../templates/book_list.html")),
    ("book_detail.html", include_str!("../../templates/book_detail.html")),
    ("book_form.html", include_str!("../../templates/book_form.html")),
    ("book_delete.html", include_str!("../../templates/book_delete.html")),
    ("bookinstance_list.html", include_str!("../../templates/bookinstance_list.html")),
    ("bookinstance_detail.html", include_str!("../../templates/bookinstance_detail.html")),
    ("bookinstance_form.html", include_str!("../../templates/bookinstance_form.html")),
    ("bookinstance_delete.html", include_str!("../../templates/bookinstance_delete.html")),
];

/// Template engine wrapper
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Compile the bundled templates
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Render a page with the given data object
    pub fn render(&self, template_name: &str, context: &Context) -> AppResult<Html<String>> {
        let html = self.tera.render(template_name, context)?;
        Ok(Html(html))
    }
}
