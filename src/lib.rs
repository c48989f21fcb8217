//! Typed client for the mangadex REST API.
//!
//! ```no_run
//! # async fn run() -> mangadex_rest::Result<()> {
//! use mangadex_rest::{MangaListQuery, MangadexClient};
//!
//! let client = MangadexClient::new()?;
//! let query = MangaListQuery::builder().title("Yotsuba").limit(5u32).build()?;
//! for manga in client.search_manga(&query).await? {
//!     println!("{} {}", manga.id(), manga.display_title());
//! }
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod at_home;
mod client;
mod config;
mod entity;
mod options;
mod query;
mod response;
mod session;
mod site_url;
mod transport;

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

pub use aggregate::{AggregateChapter, AggregateQuery, GetChapters, Volume};
pub use at_home::{build_image_urls, ImageQuality};
pub use client::MangadexClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use entity::{
    collection_from_json, list_from_json, Author, Chapter, ContentRating, Demographic, FromJson,
    LocalizedString, Manga, MangaStatus, Relationship, ScanlationGroup, Tag, User,
};
pub use options::{
    AuthorListQuery, AuthorListQueryBuilder, ChapterListQuery, ChapterListQueryBuilder,
    MangaFeedQuery, MangaFeedQueryBuilder, MangaListQuery, MangaListQueryBuilder, Pagination,
    PaginationBuilder, TagMode,
};
pub use query::{QueryParams, QueryValue, Scalar, ToQueryParams};
pub use response::check_api_error;
pub use session::Session;
pub use site_url::{chapter_id_from_url, manga_id_from_url};

pub type Result<T> = std::result::Result<T, MangadexError>;

#[derive(Debug, thiserror::Error)]
pub enum MangadexError {
    #[error(transparent)]
    TransportError(#[from] reqwest::Error),
    #[error("response is not valid json: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("mangadex returned an error: {0}")]
    ApiError(ApiErrors),
    #[error("malformed {entity}: {reason}")]
    MalformedEntityError { entity: &'static str, reason: String },
    #[error("this operation needs a session, call login first")]
    AuthRequiredError,
    #[error("invalid url '{0}'")]
    UrlParseError(String),
    #[error("session token is not a valid header value: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),
    #[error("invalid query: {0}")]
    BuilderError(String),
}

impl MangadexError {
    pub(crate) fn malformed(entity: &'static str, reason: impl fmt::Display) -> Self {
        Self::MalformedEntityError {
            entity,
            reason: reason.to_string(),
        }
    }
}

impl From<derive_builder::UninitializedFieldError> for MangadexError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::BuilderError(e.to_string())
    }
}

/// The `errors` list of a mangadex error envelope, kept as sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiErrors(pub Vec<Value>);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrors {
    pub fn errors(&self) -> &[Value] {
        &self.0
    }

    pub fn details(&self) -> Vec<ApiErrorDetail> {
        self.0
            .iter()
            .filter_map(|e| serde_json::from_value(e.clone()).ok())
            .collect()
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self.details();
        if details.is_empty() {
            return write!(f, "{} error(s)", self.0.len());
        }
        let messages: Vec<String> = details
            .iter()
            .map(|d| {
                let status = d.status.map(|s| format!("[{s}] ")).unwrap_or_default();
                match (&d.title, &d.detail) {
                    (Some(title), Some(detail)) => format!("{status}{title}: {detail}"),
                    (Some(text), None) | (None, Some(text)) => format!("{status}{text}"),
                    (None, None) => format!("{status}unknown error"),
                }
            })
            .collect();
        f.write_str(&messages.join("; "))
    }
}
