use super::{decode, localized, pick_text, FromJson, LocalizedString};
use crate::Result;
use getset::Getters;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Tag {
    id: String,
    name: LocalizedString,
    /// `genre`, `theme`, `format` or `content`.
    group: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagAttributes {
    #[serde(deserialize_with = "localized")]
    name: LocalizedString,
    #[serde(default)]
    group: Option<String>,
}

impl FromJson for Tag {
    const KIND: &'static str = "tag";

    fn from_json(value: Value) -> Result<Self> {
        let raw = decode::<TagAttributes>(Self::KIND, value)?;
        Ok(Self {
            id: raw.id,
            name: raw.attributes.name,
            group: raw.attributes.group,
        })
    }
}

impl Tag {
    pub fn display_name(&self) -> &str {
        pick_text(&self.name)
    }
}
