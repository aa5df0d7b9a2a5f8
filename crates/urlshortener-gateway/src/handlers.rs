mod page;
mod url;

pub use page::{landing_page_handler, LANDING_PAGE};
pub use url::{add_url_handler, redirect_handler};
