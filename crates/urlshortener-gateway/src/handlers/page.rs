use axum::response::Html;

/// The landing page, compiled into the binary.
pub const LANDING_PAGE: &str = include_str!("../../static/index.html");

pub async fn landing_page_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
