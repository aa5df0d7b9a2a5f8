use crate::error::Result;
use crate::model::AddUrlForm;
use crate::state::AppState;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use tracing::debug;
use urlshortener_core::url::with_default_scheme;
use urlshortener_core::RepositoryError;

pub async fn add_url_handler(
    State(state): State<AppState>,
    form: std::result::Result<Form<AddUrlForm>, FormRejection>,
) -> Result<Response> {
    let AddUrlForm {
        short_url,
        long_url,
    } = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable add url form, treating fields as empty");
            AddUrlForm::default()
        }
    };

    let location = with_default_scheme(&long_url).into_owned();
    let repository = state.repository().clone();
    tokio::task::spawn_blocking(move || repository.add_url(&short_url, &long_url)).await??;

    found(location)
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    // a path that doesn't decode to UTF-8 can't name a stored key
    let short_url = match path {
        Ok(Path(short_url)) => short_url,
        Err(rejection) => {
            debug!(error = %rejection, "undecodable short url path");
            return Err(RepositoryError::NotFound.into());
        }
    };

    let repository = state.repository().clone();
    let long_url = tokio::task::spawn_blocking(move || repository.read_url(&short_url)).await??;

    found(with_default_scheme(&long_url).into_owned())
}

fn found(location: String) -> Result<Response> {
    let location = HeaderValue::try_from(location)?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
