use axum::{
    Router,
    body::Body,
    extract::{Form, Path as AxumPath, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use std::path::Path;

use crate::errors::CmsError;
use crate::services::MarkdownService;
use crate::session::Session;
use crate::templates;
use crate::types::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/new", get(handle_new_form).post(handle_create))
        .route("/sign_in", get(handle_sign_in_form).post(handle_sign_in))
        .route("/sign_up", get(handle_sign_up_form).post(handle_sign_up))
        .route("/sign_out", post(handle_sign_out))
        .route("/:file", get(handle_view))
        .route("/:file/edit", get(handle_edit_form).post(handle_update))
        .route("/:file/delete", post(handle_delete))
        .with_state(state)
}

#[derive(Deserialize)]
pub struct NewDocumentForm {
    #[serde(default)]
    pub new_file: String,
}

#[derive(Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct AuthForm {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub pass: String,
}

/// 302 back to the document listing
fn redirect_home() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, HeaderValue::from_static("/"))],
    )
        .into_response()
}

/// Reject an anonymous request to a gated route
fn deny_anonymous(mut session: Session, jar: PrivateCookieJar) -> Response {
    session.set_message("You must be signed in to do that.");
    (session.write(jar), redirect_home()).into_response()
}

fn is_markdown(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Document listing
pub async fn handle_index(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);

    let entries: Vec<(String, Option<String>)> = state
        .files
        .list()?
        .into_iter()
        .map(|name| {
            let modified = state.files.modified(&name);
            (name, modified)
        })
        .collect();

    let message = session.take_message();
    let page = templates::index_page(&entries, message.as_deref(), session.user());
    Ok((session.write(jar), Html(page)).into_response())
}

/// Display a document: rendered HTML for markdown, raw text otherwise
pub async fn handle_view(
    State(state): State<AppState>,
    AxumPath(file): AxumPath<String>,
    jar: PrivateCookieJar,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    log::info!("View request for document: '{}'", file);

    if is_markdown(&file) {
        match state.files.read_to_string(&file) {
            Ok(source) => {
                let rendered = MarkdownService::new().render(&source);
                let message = session.take_message();
                let page =
                    templates::document_page(&file, &rendered, message.as_deref(), session.user());
                return Ok((session.write(jar), Html(page)).into_response());
            }
            Err(CmsError::NotFound) => {}
            Err(e) => return Err(e),
        }
    } else if state.files.exists(&file) {
        let bytes = state.files.read(&file)?;
        let mut response = Response::new(Body::from(bytes));
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        return Ok((session.write(jar), response).into_response());
    }

    log::warn!("Document not found: '{}'", file);
    session.set_message(format!("{} does not exist.", file));
    Ok((session.write(jar), redirect_home()).into_response())
}

/// New-document form
pub async fn handle_new_form(jar: PrivateCookieJar) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    if session.user().is_none() {
        return Ok(deny_anonymous(session, jar));
    }

    let message = session.take_message();
    let page = templates::new_document_page(message.as_deref(), session.user());
    Ok((session.write(jar), Html(page)).into_response())
}

/// Create an empty document after validating its name
pub async fn handle_create(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<NewDocumentForm>,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    if session.user().is_none() {
        return Ok(deny_anonymous(session, jar));
    }

    let name = form.new_file;

    if name.is_empty() {
        session.set_message("A name is required");
        let message = session.take_message();
        let page = templates::new_document_page(message.as_deref(), session.user());
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            session.write(jar),
            Html(page),
        )
            .into_response());
    }

    if Path::new(&name).extension().is_none() {
        session.set_message("Need file extension for valid file");
        let message = session.take_message();
        let page = templates::new_document_page(message.as_deref(), session.user());
        return Ok((session.write(jar), Html(page)).into_response());
    }

    state.files.create(&name)?;
    session.set_message(format!("{} was created", name));
    Ok((session.write(jar), redirect_home()).into_response())
}

/// Edit form, pre-filled with the document's current content
pub async fn handle_edit_form(
    State(state): State<AppState>,
    AxumPath(file): AxumPath<String>,
    jar: PrivateCookieJar,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    if session.user().is_none() {
        return Ok(deny_anonymous(session, jar));
    }

    let content = match state.files.read_to_string(&file) {
        Ok(content) => content,
        Err(CmsError::NotFound) => {
            session.set_message(format!("{} does not exist.", file));
            return Ok((session.write(jar), redirect_home()).into_response());
        }
        Err(e) => return Err(e),
    };

    let message = session.take_message();
    let page = templates::edit_page(&file, &content, message.as_deref(), session.user());
    Ok((session.write(jar), Html(page)).into_response())
}

/// Overwrite a document with the submitted content
pub async fn handle_update(
    State(state): State<AppState>,
    AxumPath(file): AxumPath<String>,
    jar: PrivateCookieJar,
    Form(form): Form<EditForm>,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    if session.user().is_none() {
        return Ok(deny_anonymous(session, jar));
    }

    state.files.write(&file, &form.content)?;
    session.set_message(format!("{} has been updated.", file));
    Ok((session.write(jar), redirect_home()).into_response())
}

/// Delete a document
pub async fn handle_delete(
    State(state): State<AppState>,
    AxumPath(file): AxumPath<String>,
    jar: PrivateCookieJar,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    if session.user().is_none() {
        return Ok(deny_anonymous(session, jar));
    }

    state.files.delete(&file)?;
    session.set_message(format!("{} was deleted", file));
    Ok((session.write(jar), redirect_home()).into_response())
}

/// Sign-in form
pub async fn handle_sign_in_form(jar: PrivateCookieJar) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    let message = session.take_message();
    let page = templates::sign_in_page(message.as_deref(), session.user());
    Ok((session.write(jar), Html(page)).into_response())
}

/// Verify credentials and start a signed-in session
pub async fn handle_sign_in(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<AuthForm>,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);

    if state.credentials.verify(&form.user, &form.pass)? {
        log::info!("Sign-in succeeded for '{}'", form.user);
        session.set_user(&form.user);
        session.set_message("Welcome!");
        Ok((session.write(jar), redirect_home()).into_response())
    } else {
        log::warn!("Sign-in failed for '{}'", form.user);
        session.set_message("Invalid Credentials");
        let message = session.take_message();
        let page = templates::sign_in_page(message.as_deref(), session.user());
        Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            session.write(jar),
            Html(page),
        )
            .into_response())
    }
}

/// Sign-up form
pub async fn handle_sign_up_form(jar: PrivateCookieJar) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    let message = session.take_message();
    let page = templates::sign_up_page(message.as_deref(), session.user());
    Ok((session.write(jar), Html(page)).into_response())
}

/// Register a new credential record.
///
/// Rejected when the username exists or the candidate password matches any
/// existing user's password; the credential store documents that rule.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<AuthForm>,
) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);

    if state.credentials.is_taken(&form.user, &form.pass)? {
        log::warn!("Sign-up rejected for '{}'", form.user);
        session.set_message("Username or password already exists");
        let message = session.take_message();
        let page = templates::sign_up_page(message.as_deref(), session.user());
        return Ok((session.write(jar), Html(page)).into_response());
    }

    state.credentials.register(&form.user, &form.pass)?;
    log::info!("Registered new user '{}'", form.user);
    session.set_message("Welcome new user!");
    Ok((session.write(jar), redirect_home()).into_response())
}

/// End the signed-in session
pub async fn handle_sign_out(jar: PrivateCookieJar) -> Result<Response, CmsError> {
    let mut session = Session::from_jar(&jar);
    session.clear_user();
    session.set_message("You have been signed out");
    Ok((session.write(jar), redirect_home()).into_response())
}
