use std::convert::Infallible;

use axum::extract::{Form, FromRequest, Request};

/// Body of the add and edit forms. A body that is missing, has the wrong
/// content type or cannot be decoded reads as empty fields, so it fails
/// validation like any other missing input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
}

impl MovieForm {
    /// Takes the first value of each field; later repeats are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut title = None;
        let mut year = None;
        for (key, value) in pairs {
            match key.as_str() {
                "title" if title.is_none() => title = Some(value),
                "year" if year.is_none() => year = Some(value),
                _ => {}
            }
        }
        Self { title: title.unwrap_or_default(), year: year.unwrap_or_default() }
    }
}

impl<S: Send + Sync> FromRequest<S> for MovieForm {
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => pairs,
            Err(rejection) => {
                tracing::debug!(error = %rejection, "unreadable movie form");
                Vec::new()
            }
        };
        Ok(Self::from_pairs(pairs))
    }
}

/// A title/year pair that passed `validate_movie`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidMovie {
    pub title: String,
    pub year: String,
}
