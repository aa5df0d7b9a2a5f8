use serde::Deserialize;

/// Form posted by the landing page.
///
/// Missing fields deserialize as empty strings so that they are reported by
/// the repository's input validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddUrlForm {
    #[serde(rename = "shortURL")]
    pub short_url: String,
    #[serde(rename = "longURL")]
    pub long_url: String,
}
