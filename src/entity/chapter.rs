use super::{decode, related_ids, FromJson, Relationship};
use crate::{MangadexError, Result};
use getset::Getters;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Chapter {
    id: String,
    title: Option<String>,
    volume: Option<String>,
    chapter: Option<String>,
    translated_language: String,
    /// Identifies the chapter's image folder on the at-home servers.
    hash: String,
    /// Page file names in reading order.
    data: Vec<String>,
    data_saver: Vec<String>,
    publish_at: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChapterAttributes {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    volume: Option<String>,
    #[serde(default)]
    chapter: Option<String>,
    translated_language: String,
    hash: String,
    data: Vec<String>,
    #[serde(default)]
    data_saver: Vec<String>,
    #[serde(default)]
    publish_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl FromJson for Chapter {
    const KIND: &'static str = "chapter";

    fn from_json(value: Value) -> Result<Self> {
        let raw = decode::<ChapterAttributes>(Self::KIND, value)?;
        let attributes = raw.attributes;
        if attributes.hash.is_empty() {
            return Err(MangadexError::malformed(Self::KIND, "empty `hash`"));
        }
        Ok(Self {
            id: raw.id,
            title: attributes.title,
            volume: attributes.volume,
            chapter: attributes.chapter,
            translated_language: attributes.translated_language,
            hash: attributes.hash,
            data: attributes.data,
            data_saver: attributes.data_saver,
            publish_at: attributes.publish_at,
            created_at: attributes.created_at,
            updated_at: attributes.updated_at,
            relationships: raw.relationships,
        })
    }
}

impl Chapter {
    pub fn manga_id(&self) -> Option<String> {
        related_ids(&self.relationships, "manga").into_iter().next()
    }

    pub fn group_ids(&self) -> Vec<String> {
        related_ids(&self.relationships, "scanlation_group")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::list_from_json;
    use serde_json::json;

    fn chapter_json(id: &str, number: &str) -> Value {
        json!({
            "result": "ok",
            "data": {
                "id": id,
                "type": "chapter",
                "attributes": {
                    "title": null,
                    "volume": "1",
                    "chapter": number,
                    "translatedLanguage": "en",
                    "hash": format!("hash-{id}"),
                    "data": ["x1-a.png", "x2-b.png", "x3-c.png"],
                    "dataSaver": ["x1-a.jpg", "x2-b.jpg", "x3-c.jpg"],
                    "publishAt": "2021-03-06T19:55:32+00:00"
                }
            },
            "relationships": [
                {"id": "g1", "type": "scanlation_group"},
                {"id": "m1", "type": "manga"},
                {"id": "u1", "type": "user"}
            ]
        })
    }

    #[test]
    fn test_chapter() {
        let chapter = Chapter::from_json(chapter_json("c1", "12.5")).unwrap();
        assert_eq!(chapter.id(), "c1");
        assert_eq!(chapter.hash(), "hash-c1");
        assert_eq!(chapter.data(), &vec!["x1-a.png", "x2-b.png", "x3-c.png"]);
        assert_eq!(chapter.chapter().as_deref(), Some("12.5"));
        assert_eq!(chapter.title(), &None);
        assert_eq!(chapter.manga_id().as_deref(), Some("m1"));
        assert_eq!(chapter.group_ids(), vec!["g1"]);
    }

    #[test]
    fn test_chapter_without_pages_is_malformed() {
        let err = Chapter::from_json(json!({
            "id": "c1",
            "attributes": {"translatedLanguage": "en", "hash": "h"}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            MangadexError::MalformedEntityError { entity: "chapter", .. }
        ));
    }

    #[test]
    fn test_feed_envelope() {
        let chapters: Vec<Chapter> = list_from_json(json!({
            "results": [chapter_json("c2", "2"), chapter_json("c1", "1")],
            "limit": 100,
            "offset": 0,
            "total": 2
        }))
        .unwrap();
        let ids: Vec<&str> = chapters.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["c2", "c1"]);
    }
}
