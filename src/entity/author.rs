use super::{decode, localized, related_ids, FromJson, LocalizedString};
use crate::Result;
use getset::Getters;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Author {
    id: String,
    name: String,
    image_url: Option<String>,
    biography: LocalizedString,
    manga_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorAttributes {
    name: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default, deserialize_with = "localized")]
    biography: LocalizedString,
}

impl FromJson for Author {
    const KIND: &'static str = "author";

    fn from_json(value: Value) -> Result<Self> {
        let raw = decode::<AuthorAttributes>(Self::KIND, value)?;
        Ok(Self {
            manga_ids: related_ids(&raw.relationships, "manga"),
            id: raw.id,
            name: raw.attributes.name,
            image_url: raw.attributes.image_url,
            biography: raw.attributes.biography,
        })
    }
}
