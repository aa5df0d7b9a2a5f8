use axum::routing::{any, get};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{add_url_handler, landing_page_handler, redirect_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route(
                "/",
                get(landing_page_handler)
                    .post(add_url_handler)
                    .fallback(landing_page_handler),
            )
            .route("/{*short_url}", any(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
