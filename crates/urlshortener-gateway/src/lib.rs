//! HTTP front end for the URL shortener.
//!
//! `GET /` serves the landing page, `POST /` stores a new short URL from a
//! form and `/{short_url}` redirects to the stored long URL. All storage
//! rules live in `urlshortener-storage`; this crate only translates between
//! HTTP and repository calls.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
