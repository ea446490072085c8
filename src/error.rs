use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Message carried on a 500 response so the error page can show it.
#[derive(Clone, Debug)]
pub struct ErrorMessage(pub String);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // The page itself is rendered by `routes::render_error_pages`,
            // which has access to the store and the flash cookie.
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            err => {
                tracing::error!(error = %err, "request failed");
                let mut resp = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                resp.extensions_mut().insert(ErrorMessage(err.to_string()));
                resp
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
