//! Typed query options for the list endpoints.
//!
//! List-valued options use mangadex's `name[]` keys. Dates are
//! `YYYY-MM-DDTHH:MM:SS` strings.

use crate::entity::{ContentRating, Demographic, MangaStatus};
use crate::query::{QueryParams, ToQueryParams};
use derive_builder::Builder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMode {
    And,
    Or,
}

impl TagMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagMode::And => "AND",
            TagMode::Or => "OR",
        }
    }
}

/// Options of `GET /manga`.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(
    pattern = "owned",
    default,
    setter(into, strip_option),
    build_fn(error = "crate::MangadexError")
)]
pub struct MangaListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub artists: Vec<String>,
    pub year: Option<u32>,
    pub included_tags: Vec<String>,
    pub included_tags_mode: Option<TagMode>,
    pub excluded_tags: Vec<String>,
    pub excluded_tags_mode: Option<TagMode>,
    pub status: Vec<MangaStatus>,
    pub original_language: Vec<String>,
    pub publication_demographic: Vec<Demographic>,
    /// At most 100 per request.
    pub ids: Vec<String>,
    pub content_rating: Vec<ContentRating>,
    pub created_at_since: Option<String>,
    pub updated_at_since: Option<String>,
}

impl MangaListQuery {
    pub fn builder() -> MangaListQueryBuilder {
        MangaListQueryBuilder::default()
    }
}

impl ToQueryParams for MangaListQuery {
    fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("limit", self.limit)
            .with("offset", self.offset)
            .with("title", self.title.as_deref())
            .with("authors[]", self.authors.as_slice())
            .with("artists[]", self.artists.as_slice())
            .with("year", self.year)
            .with("includedTags[]", self.included_tags.as_slice())
            .with("includedTagsMode", self.included_tags_mode.map(|m| m.as_str()))
            .with("excludedTags[]", self.excluded_tags.as_slice())
            .with("excludedTagsMode", self.excluded_tags_mode.map(|m| m.as_str()))
            .with("status[]", names(&self.status, MangaStatus::as_str))
            .with("originalLanguage[]", self.original_language.as_slice())
            .with(
                "publicationDemographic[]",
                names(&self.publication_demographic, Demographic::as_str),
            )
            .with("ids[]", self.ids.as_slice())
            .with("contentRating[]", names(&self.content_rating, ContentRating::as_str))
            .with("createdAtSince", self.created_at_since.as_deref())
            .with("updatedAtSince", self.updated_at_since.as_deref())
    }
}

/// Options of `GET /manga/{id}/feed`.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(
    pattern = "owned",
    default,
    setter(into, strip_option),
    build_fn(error = "crate::MangadexError")
)]
pub struct MangaFeedQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub translated_language: Vec<String>,
    pub created_at_since: Option<String>,
    pub updated_at_since: Option<String>,
    pub publish_at_since: Option<String>,
}

impl MangaFeedQuery {
    pub fn builder() -> MangaFeedQueryBuilder {
        MangaFeedQueryBuilder::default()
    }
}

impl ToQueryParams for MangaFeedQuery {
    fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("limit", self.limit)
            .with("offset", self.offset)
            .with("translatedLanguage[]", self.translated_language.as_slice())
            .with("createdAtSince", self.created_at_since.as_deref())
            .with("updatedAtSince", self.updated_at_since.as_deref())
            .with("publishAtSince", self.publish_at_since.as_deref())
    }
}

/// Options of `GET /chapter`. Set `manga` to restrict to one title.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(
    pattern = "owned",
    default,
    setter(into, strip_option),
    build_fn(error = "crate::MangadexError")
)]
pub struct ChapterListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub title: Option<String>,
    pub groups: Vec<String>,
    pub uploader: Option<String>,
    pub manga: Option<String>,
    pub volume: Option<String>,
    pub chapter: Option<String>,
    pub translated_language: Vec<String>,
    pub created_at_since: Option<String>,
    pub updated_at_since: Option<String>,
    pub publish_at_since: Option<String>,
}

impl ChapterListQuery {
    pub fn builder() -> ChapterListQueryBuilder {
        ChapterListQueryBuilder::default()
    }
}

impl ToQueryParams for ChapterListQuery {
    fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("limit", self.limit)
            .with("offset", self.offset)
            .with("title", self.title.as_deref())
            .with("groups[]", self.groups.as_slice())
            .with("uploader", self.uploader.as_deref())
            .with("manga", self.manga.as_deref())
            .with("volume", self.volume.as_deref())
            .with("chapter", self.chapter.as_deref())
            .with("translatedLanguage[]", self.translated_language.as_slice())
            .with("createdAtSince", self.created_at_since.as_deref())
            .with("updatedAtSince", self.updated_at_since.as_deref())
            .with("publishAtSince", self.publish_at_since.as_deref())
    }
}

/// Options of `GET /author`.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(
    pattern = "owned",
    default,
    setter(into, strip_option),
    build_fn(error = "crate::MangadexError")
)]
pub struct AuthorListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub name: Option<String>,
    pub ids: Vec<String>,
}

impl AuthorListQuery {
    pub fn builder() -> AuthorListQueryBuilder {
        AuthorListQueryBuilder::default()
    }
}

impl ToQueryParams for AuthorListQuery {
    fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("limit", self.limit)
            .with("offset", self.offset)
            .with("name", self.name.as_deref())
            .with("ids[]", self.ids.as_slice())
    }
}

/// Options of the `/user/follows/*` lists.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(
    pattern = "owned",
    default,
    setter(into, strip_option),
    build_fn(error = "crate::MangadexError")
)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    pub fn builder() -> PaginationBuilder {
        PaginationBuilder::default()
    }
}

impl ToQueryParams for Pagination {
    fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("limit", self.limit)
            .with("offset", self.offset)
    }
}

fn names<T>(values: &[T], name: fn(&T) -> &'static str) -> Vec<&'static str> {
    values.iter().map(name).collect()
}
