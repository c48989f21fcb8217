use super::{
    decode, localized, localized_list, null_as_default, pick_text, related_ids, FromJson,
    LocalizedString, Relationship, Tag,
};
use crate::Result;
use getset::Getters;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MangaStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl MangaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MangaStatus::Ongoing => "ongoing",
            MangaStatus::Completed => "completed",
            MangaStatus::Hiatus => "hiatus",
            MangaStatus::Cancelled => "cancelled",
            MangaStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demographic {
    Shounen,
    Shoujo,
    Josei,
    Seinen,
    None,
    #[serde(other)]
    Unknown,
}

impl Demographic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Demographic::Shounen => "shounen",
            Demographic::Shoujo => "shoujo",
            Demographic::Josei => "josei",
            Demographic::Seinen => "seinen",
            Demographic::None => "none",
            Demographic::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRating {
    Safe,
    Suggestive,
    Erotica,
    Pornographic,
    #[serde(other)]
    Unknown,
}

impl ContentRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentRating::Safe => "safe",
            ContentRating::Suggestive => "suggestive",
            ContentRating::Erotica => "erotica",
            ContentRating::Pornographic => "pornographic",
            ContentRating::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Manga {
    id: String,
    title: LocalizedString,
    alt_titles: Vec<LocalizedString>,
    description: LocalizedString,
    status: Option<MangaStatus>,
    /// Never null; a manga without tags has an empty list.
    tags: Vec<Tag>,
    original_language: Option<String>,
    last_volume: Option<String>,
    last_chapter: Option<String>,
    publication_demographic: Option<Demographic>,
    content_rating: Option<ContentRating>,
    year: Option<u32>,
    created_at: Option<String>,
    updated_at: Option<String>,
    relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MangaAttributes {
    #[serde(deserialize_with = "localized")]
    title: LocalizedString,
    #[serde(default, deserialize_with = "localized_list")]
    alt_titles: Vec<LocalizedString>,
    #[serde(default, deserialize_with = "localized")]
    description: LocalizedString,
    #[serde(default)]
    status: Option<MangaStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<Value>,
    #[serde(default)]
    original_language: Option<String>,
    #[serde(default)]
    last_volume: Option<String>,
    #[serde(default)]
    last_chapter: Option<String>,
    #[serde(default)]
    publication_demographic: Option<Demographic>,
    #[serde(default)]
    content_rating: Option<ContentRating>,
    #[serde(default)]
    year: Option<u32>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl FromJson for Manga {
    const KIND: &'static str = "manga";

    fn from_json(value: Value) -> Result<Self> {
        let raw = decode::<MangaAttributes>(Self::KIND, value)?;
        let attributes = raw.attributes;
        let tags = attributes
            .tags
            .into_iter()
            .map(Tag::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: raw.id,
            title: attributes.title,
            alt_titles: attributes.alt_titles,
            description: attributes.description,
            status: attributes.status,
            tags,
            original_language: attributes.original_language,
            last_volume: attributes.last_volume,
            last_chapter: attributes.last_chapter,
            publication_demographic: attributes.publication_demographic,
            content_rating: attributes.content_rating,
            year: attributes.year,
            created_at: attributes.created_at,
            updated_at: attributes.updated_at,
            relationships: raw.relationships,
        })
    }
}

impl Manga {
    /// English title, else the first available one.
    pub fn display_title(&self) -> &str {
        pick_text(&self.title)
    }

    pub fn author_ids(&self) -> Vec<String> {
        related_ids(&self.relationships, "author")
    }

    pub fn artist_ids(&self) -> Vec<String> {
        related_ids(&self.relationships, "artist")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{list_from_json, MangadexError};
    use serde_json::json;

    fn yotsuba() -> Value {
        json!({
            "result": "ok",
            "data": {
                "id": "58be6aa6-06cb-4ca5-bd20-f1392ce451fb",
                "type": "manga",
                "attributes": {
                    "title": {"en": "Yotsuba&!"},
                    "altTitles": [{"ja": "よつばと！"}, []],
                    "description": {"en": "Yotsuba is a strange little girl."},
                    "status": "ongoing",
                    "originalLanguage": "ja",
                    "lastVolume": null,
                    "lastChapter": null,
                    "publicationDemographic": "seinen",
                    "contentRating": "safe",
                    "year": 2003,
                    "tags": [
                        {"id": "t-comedy", "type": "tag", "attributes": {"name": {"en": "Comedy"}, "group": "genre"}},
                        {"id": "t-sol", "type": "tag", "attributes": {"name": {"en": "Slice of Life"}, "group": "genre"}}
                    ]
                }
            },
            "relationships": [
                {"id": "a-azuma", "type": "author"},
                {"id": "a-azuma", "type": "artist"}
            ]
        })
    }

    #[test]
    fn test_minimal_manga() {
        let manga =
            Manga::from_json(json!({"id": "abc", "attributes": {"title": {"en": "Test"}}})).unwrap();
        assert_eq!(manga.id(), "abc");
        assert_eq!(manga.display_title(), "Test");
        assert!(manga.tags().is_empty());
        assert!(manga.description().is_empty());
        assert_eq!(manga.status(), &None);
    }

    #[test]
    fn test_full_manga() {
        let manga = Manga::from_json(yotsuba()).unwrap();
        assert_eq!(manga.id(), "58be6aa6-06cb-4ca5-bd20-f1392ce451fb");
        assert_eq!(manga.status(), &Some(MangaStatus::Ongoing));
        assert_eq!(manga.publication_demographic(), &Some(Demographic::Seinen));
        assert_eq!(manga.content_rating(), &Some(ContentRating::Safe));
        assert_eq!(manga.year(), &Some(2003));
        assert_eq!(manga.alt_titles().len(), 1);
        let tags: Vec<&str> = manga.tags().iter().map(|t| t.display_name()).collect();
        assert_eq!(tags, vec!["Comedy", "Slice of Life"]);
        assert_eq!(manga.author_ids(), vec!["a-azuma"]);
        assert_eq!(manga.artist_ids(), vec!["a-azuma"]);
    }

    #[test]
    fn test_null_tags_become_empty() {
        let manga = Manga::from_json(json!({
            "id": "abc",
            "attributes": {"title": {"en": "Test"}, "tags": null, "description": [], "status": "paused"}
        }))
        .unwrap();
        assert!(manga.tags().is_empty());
        assert_eq!(manga.status(), &Some(MangaStatus::Unknown));
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let err = Manga::from_json(json!({"id": "abc", "attributes": {}})).unwrap_err();
        assert!(matches!(
            err,
            MangadexError::MalformedEntityError { entity: "manga", .. }
        ));
    }

    #[test]
    fn test_list_keeps_order() {
        let envelope = json!({
            "results": [
                {"result": "ok", "data": {"id": "first", "attributes": {"title": {"en": "A"}}}},
                {"result": "ok", "data": {"id": "second", "attributes": {"title": {"en": "B"}}}}
            ],
            "limit": 10,
            "offset": 0,
            "total": 2
        });
        let list: Vec<Manga> = list_from_json(envelope).unwrap();
        let ids: Vec<&str> = list.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_list_without_results_is_malformed() {
        let err = list_from_json::<Manga>(json!({"data": []})).unwrap_err();
        assert!(matches!(
            err,
            MangadexError::MalformedEntityError { entity: "manga", .. }
        ));
    }

    #[test]
    fn test_malformed_tag_fails_the_manga() {
        let err = Manga::from_json(json!({
            "id": "abc",
            "attributes": {"title": {"en": "Test"}, "tags": [{"attributes": {"name": {}}}]}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            MangadexError::MalformedEntityError { entity: "tag", .. }
        ));
    }
}
