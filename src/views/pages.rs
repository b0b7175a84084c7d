//! Page data objects.
//!
//! Each function returns the context for one template. Records are exposed
//! as plain objects with these keys:
//!
//! - genre: `id`, `name`, `url`
//! - author: `id`, `first_name`, `family_name`, `name`, `lifespan`,
//!   `date_of_birth`, `date_of_death` (ISO or empty), `url`
//! - book: `id`, `title`, `summary`, `isbn`, `url`, and when populated
//!   `author` (author object or null) and `genres` (genre objects)
//! - bookinstance: `id`, `imprint`, `status`, `due_back` (ISO or empty),
//!   `due_back_formatted`, `url`, `book` (book object or null)
//!
//! Every page also gets `title`. Form pages get `form` (the submitted or
//! stored values), `errors` (ordered `{field, rule, message}` list) and
//! their selector choices.
//!
//! Text fields were escaped when they were submitted, so templates print
//! them with `safe`.

use serde_json::{json, Value};
use tera::Context;

use crate::{
    models::{
        Author, AuthorForm, Book, BookDetail, BookForm, BookInstance, BookInstanceDetail,
        BookInstanceForm, BookInstanceStatus, BookTitle, BookWithAuthor, CatalogCounts, Genre,
        GenreForm,
    },
    validation::FieldError,
};

fn page(title: &str) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context
}

fn iso(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn genre_view(genre: &Genre) -> Value {
    json!({
        "id": genre.id,
        "name": genre.name,
        "url": genre.url(),
    })
}

pub fn author_view(author: &Author) -> Value {
    json!({
        "id": author.id,
        "first_name": author.first_name,
        "family_name": author.family_name,
        "name": author.name(),
        "lifespan": author.lifespan(),
        "date_of_birth": iso(author.date_of_birth),
        "date_of_death": iso(author.date_of_death),
        "url": author.url(),
    })
}

pub fn book_view(book: &Book) -> Value {
    json!({
        "id": book.id,
        "title": book.title,
        "summary": book.summary,
        "isbn": book.isbn,
        "url": book.url(),
    })
}

fn book_with_author_view(entry: &BookWithAuthor) -> Value {
    let mut view = book_view(&entry.book);
    view["author"] = entry.author.as_ref().map(author_view).unwrap_or(Value::Null);
    view
}

fn book_detail_view(detail: &BookDetail) -> Value {
    let mut view = book_view(&detail.book);
    view["author"] = detail.author.as_ref().map(author_view).unwrap_or(Value::Null);
    view["genres"] = detail.genres.iter().map(genre_view).collect();
    view
}

pub fn book_instance_view(instance: &BookInstance, book: Option<&Book>) -> Value {
    json!({
        "id": instance.id,
        "imprint": instance.imprint,
        "status": instance.status.as_str(),
        "due_back": iso(instance.due_back),
        "due_back_formatted": instance.due_back_formatted(),
        "url": instance.url(),
        "book": book.map(book_view),
    })
}

fn populated_instance_view(detail: &BookInstanceDetail) -> Value {
    book_instance_view(&detail.instance, detail.book.as_ref())
}

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

pub fn home(counts: &CatalogCounts) -> Context {
    let mut context = page("Local Library Home");
    context.insert(
        "counts",
        &json!({
            "books": counts.books,
            "book_instances": counts.book_instances,
            "book_instances_available": counts.book_instances_available,
            "authors": counts.authors,
            "genres": counts.genres,
        }),
    );
    context
}

pub fn about() -> Context {
    page("About")
}

/// Error page; `detail` is only passed in development
pub fn error(message: &str, detail: Option<&str>) -> Context {
    let mut context = page("Error");
    context.insert("message", message);
    context.insert("detail", &detail);
    context
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

pub fn genre_list(genres: &[Genre]) -> Context {
    let mut context = page("Genre List");
    context.insert("genre_list", &genres.iter().map(genre_view).collect::<Vec<_>>());
    context
}

pub fn genre_detail(genre: &Genre, books: &[Book]) -> Context {
    let mut context = page("Genre Detail");
    context.insert("genre", &genre_view(genre));
    context.insert("genre_books", &books.iter().map(book_view).collect::<Vec<_>>());
    context
}

pub fn genre_form(title: &str, form: &GenreForm, errors: &[FieldError]) -> Context {
    let mut context = page(title);
    context.insert("form", form);
    context.insert("errors", errors);
    context
}

pub fn genre_delete(genre: &Genre, books: &[Book]) -> Context {
    let mut context = page("Delete Genre");
    context.insert("genre", &genre_view(genre));
    context.insert("genre_books", &books.iter().map(book_view).collect::<Vec<_>>());
    context
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

pub fn author_list(authors: &[Author]) -> Context {
    let mut context = page("Author List");
    context.insert("author_list", &authors.iter().map(author_view).collect::<Vec<_>>());
    context
}

pub fn author_detail(author: &Author, books: &[Book]) -> Context {
    let mut context = page("Author Detail");
    context.insert("author", &author_view(author));
    context.insert("author_books", &books.iter().map(book_view).collect::<Vec<_>>());
    context
}

pub fn author_form(title: &str, form: &AuthorForm, errors: &[FieldError]) -> Context {
    let mut context = page(title);
    context.insert("form", form);
    context.insert("errors", errors);
    context
}

pub fn author_delete(author: &Author, books: &[Book]) -> Context {
    let mut context = page("Delete Author");
    context.insert("author", &author_view(author));
    context.insert("author_books", &books.iter().map(book_view).collect::<Vec<_>>());
    context
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

pub fn book_list(books: &[BookWithAuthor]) -> Context {
    let mut context = page("Book List");
    context.insert(
        "book_list",
        &books.iter().map(book_with_author_view).collect::<Vec<_>>(),
    );
    context
}

pub fn book_detail(book: &BookDetail, instances: &[BookInstance]) -> Context {
    let mut context = page(&book.book.title);
    context.insert("book", &book_detail_view(book));
    context.insert(
        "book_instances",
        &instances
            .iter()
            .map(|i| book_instance_view(i, None))
            .collect::<Vec<_>>(),
    );
    context
}

pub fn book_form(
    title: &str,
    form: &BookForm,
    authors: &[Author],
    genres: &[Genre],
    errors: &[FieldError],
) -> Context {
    let authors: Vec<Value> = authors
        .iter()
        .map(|a| {
            let mut view = author_view(a);
            view["selected"] = json!(form.author == a.id.to_string());
            view
        })
        .collect();
    let genres: Vec<Value> = genres
        .iter()
        .map(|g| {
            let mut view = genre_view(g);
            view["checked"] = json!(form.has_genre(g.id));
            view
        })
        .collect();

    let mut context = page(title);
    context.insert("form", form);
    context.insert("authors", &authors);
    context.insert("genres", &genres);
    context.insert("errors", errors);
    context
}

pub fn book_delete(book: &BookDetail, instances: &[BookInstance]) -> Context {
    let mut context = page("Delete Book");
    context.insert("book", &book_detail_view(book));
    context.insert(
        "book_instances",
        &instances
            .iter()
            .map(|i| book_instance_view(i, None))
            .collect::<Vec<_>>(),
    );
    context
}

// ---------------------------------------------------------------------------
// Book instances
// ---------------------------------------------------------------------------

pub fn book_instance_list(instances: &[BookInstanceDetail]) -> Context {
    let mut context = page("Book Instance List");
    context.insert(
        "bookinstance_list",
        &instances.iter().map(populated_instance_view).collect::<Vec<_>>(),
    );
    context
}

pub fn book_instance_detail(instance: &BookInstanceDetail) -> Context {
    let mut context = page("Book Instance Detail");
    context.insert("bookinstance", &populated_instance_view(instance));
    context
}

/// Create/update form; `selected_book` and `selected_status` drive the selectors
pub fn book_instance_form(
    title: &str,
    form: &BookInstanceForm,
    books: &[BookTitle],
    errors: &[FieldError],
) -> Context {
    let book_list: Vec<Value> = books
        .iter()
        .map(|b| {
            json!({
                "id": b.id,
                "title": b.title,
                "url": b.url(),
                "selected": form.book == b.id.to_string(),
            })
        })
        .collect();
    let selected_status = form
        .status
        .clone()
        .unwrap_or_else(|| BookInstanceStatus::default().to_string());
    let statuses: Vec<Value> = BookInstanceStatus::ALL
        .iter()
        .map(|s| json!({ "value": s.as_str(), "selected": s.as_str() == selected_status }))
        .collect();

    let mut context = page(title);
    context.insert("form", form);
    context.insert("selected_book", &form.book);
    context.insert("selected_status", &selected_status);
    context.insert("book_list", &book_list);
    context.insert("statuses", &statuses);
    context.insert("errors", errors);
    context
}

pub fn book_instance_delete(instance: &BookInstanceDetail) -> Context {
    let mut context = page("Delete Book Instance");
    context.insert("bookinstance", &populated_instance_view(instance));
    context
}
