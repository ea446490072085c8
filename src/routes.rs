use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::{StatusCode, header, request::Parts},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
    AppState,
    error::{AppError, AppResult, ErrorMessage},
    flash,
    models::MovieForm,
    store::MovieStore,
    templates::{self, PageContext},
    validation::validate_movie,
};

/// Movie id taken from the path. Only plain digit runs match; signs,
/// whitespace and anything else are treated as an unmatched route.
#[derive(Debug, PartialEq, Eq)]
pub struct MovieId(pub i32);

impl MovieId {
    pub fn parse(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse().ok().map(Self)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MovieId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        Self::parse(&segment).ok_or(AppError::NotFound)
    }
}

pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let (jar, ctx) = page_context(&state.store, jar).await?;
    let movies = state.store.list_movies().await?;
    Ok((jar, Html(templates::index_page(&ctx, &movies))))
}

pub async fn create(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: MovieForm,
) -> AppResult<(SignedCookieJar, Response)> {
    let movie = match validate_movie(&form.title, &form.year) {
        Ok(movie) => movie,
        Err(err) => {
            tracing::debug!(error = %err, "rejected new movie");
            return Ok((flash::push(jar, flash::INVALID_INPUT), found("/")));
        }
    };

    let created = state.store.insert_movie(&movie.title, &movie.year).await?;
    tracing::info!(movie_id = created.id, title = %created.title, "movie created");

    Ok((flash::push(jar, flash::ITEM_CREATED), found("/")))
}

pub async fn edit_form(
    State(state): State<AppState>,
    MovieId(id): MovieId,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movie = state.store.get_movie(id).await?;
    let (jar, ctx) = page_context(&state.store, jar).await?;
    Ok((jar, Html(templates::edit_page(&ctx, &movie))))
}

pub async fn update(
    State(state): State<AppState>,
    MovieId(id): MovieId,
    jar: SignedCookieJar,
    form: MovieForm,
) -> AppResult<(SignedCookieJar, Response)> {
    state.store.get_movie(id).await?;

    let movie = match validate_movie(&form.title, &form.year) {
        Ok(movie) => movie,
        Err(err) => {
            tracing::debug!(movie_id = id, error = %err, "rejected movie edit");
            let back = format!("/movie/edit/{id}");
            return Ok((flash::push(jar, flash::INVALID_INPUT), found(&back)));
        }
    };

    let updated = state.store.update_movie(id, &movie.title, &movie.year).await?;
    tracing::info!(movie_id = updated.id, title = %updated.title, "movie updated");

    Ok((flash::push(jar, flash::ITEM_UPDATED), found("/")))
}

pub async fn delete(
    State(state): State<AppState>,
    MovieId(id): MovieId,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Response)> {
    let deleted = state.store.delete_movie(id).await?;
    tracing::info!(movie_id = deleted.id, title = %deleted.title, "movie deleted");

    Ok((flash::push(jar, flash::ITEM_DELETED), found("/")))
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Swaps bare 404 and 500 responses for full pages carrying the user and any
/// pending flash messages.
pub async fn render_error_pages(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    request: Request,
    next: Next,
) -> Response {
    let resp = next.run(request).await;
    let status = resp.status();
    if status != StatusCode::NOT_FOUND && status != StatusCode::INTERNAL_SERVER_ERROR {
        return resp;
    }

    let (jar, ctx) = match page_context(&state.store, jar.clone()).await {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!(error = %err, "failed to load page context");
            (jar, PageContext::default())
        }
    };

    let body = if status == StatusCode::NOT_FOUND {
        templates::not_found_page(&ctx)
    } else {
        let message = resp
            .extensions()
            .get::<ErrorMessage>()
            .map(|m| m.0.as_str())
            .unwrap_or("Internal Server Error");
        templates::error_page(&ctx, message)
    };

    (status, jar, Html(body)).into_response()
}

async fn page_context(
    store: &MovieStore,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, PageContext)> {
    let user = store.first_user().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, PageContext { user, flashes }))
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
