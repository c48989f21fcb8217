//! Mapping of mangadex JSON objects into domain entities.
//!
//! An entity arrives either bare, `{id, type, attributes, relationships}`, or
//! wrapped, `{result, data: {id, type, attributes}, relationships}`. Both are
//! accepted everywhere.

mod author;
mod chapter;
mod group;
mod manga;
mod tag;
mod user;

pub use author::Author;
pub use chapter::Chapter;
pub use group::ScanlationGroup;
pub use manga::{ContentRating, Demographic, Manga, MangaStatus};
pub use tag::Tag;
pub use user::User;

use crate::{MangadexError, Result};
use getset::Getters;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub type LocalizedString = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct Relationship {
    id: String,
    #[serde(rename = "type")]
    kind: String,
}

pub trait FromJson: Sized {
    /// Name used in [`MangadexError::MalformedEntityError`].
    const KIND: &'static str;

    fn from_json(value: Value) -> Result<Self>;
}

/// Maps every element of the `results` field of a list envelope, in order.
pub fn list_from_json<T: FromJson>(envelope: Value) -> Result<Vec<T>> {
    match envelope {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items.into_iter().map(T::from_json).collect(),
            Some(_) => Err(MangadexError::malformed(T::KIND, "`results` is not a list")),
            None => Err(MangadexError::malformed(T::KIND, "missing `results` field")),
        },
        _ => Err(MangadexError::malformed(T::KIND, "expected a list envelope")),
    }
}

/// Like [`list_from_json`] but also accepts a bare JSON array.
pub fn collection_from_json<T: FromJson>(value: Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items.into_iter().map(T::from_json).collect(),
        other => list_from_json(other),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEntity<A> {
    pub(crate) id: String,
    pub(crate) attributes: A,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) relationships: Vec<Relationship>,
}

/// Unwraps `data` if present and decodes the entity, requiring a non-empty id.
pub(crate) fn decode<A: DeserializeOwned>(kind: &'static str, value: Value) -> Result<RawEntity<A>> {
    let value = match value {
        Value::Object(mut outer) => match outer.remove("data") {
            Some(Value::Object(mut data)) => {
                if let Some(relationships) = outer.remove("relationships") {
                    data.insert("relationships".to_string(), relationships);
                }
                Value::Object(data)
            }
            Some(other) => {
                outer.insert("data".to_string(), other);
                Value::Object(outer)
            }
            None => Value::Object(outer),
        },
        _ => return Err(MangadexError::malformed(kind, "expected a json object")),
    };
    let raw: RawEntity<A> =
        serde_json::from_value(value).map_err(|e| MangadexError::malformed(kind, e))?;
    if raw.id.is_empty() {
        return Err(MangadexError::malformed(kind, "empty `id`"));
    }
    Ok(raw)
}

pub(crate) fn related_ids(relationships: &[Relationship], kind: &str) -> Vec<String> {
    relationships
        .iter()
        .filter(|r| r.kind == kind)
        .map(|r| r.id.clone())
        .collect()
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// mangadex sends an empty localized string as `[]` instead of `{}`.
pub(crate) fn localized<'de, D>(deserializer: D) -> std::result::Result<LocalizedString, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Map(LocalizedString),
        Empty([EmptyType; 0]),
        Null(()),
    }

    #[derive(Deserialize)]
    struct EmptyType;

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Map(map) => map,
        Repr::Empty(_) | Repr::Null(()) => LocalizedString::new(),
    })
}

/// Localized strings keyed by language; an empty list is treated as no entries.
pub(crate) fn localized_list<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<LocalizedString>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Item(#[serde(deserialize_with = "localized")] LocalizedString);

    let items: Option<Vec<Item>> = Deserialize::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(|Item(map)| map)
        .filter(|map| !map.is_empty())
        .collect())
}

pub(crate) fn pick_text(text: &LocalizedString) -> &str {
    text.get("en")
        .or_else(|| text.values().next())
        .map(String::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Attrs {
        #[serde(default, deserialize_with = "localized")]
        name: LocalizedString,
    }

    #[test]
    fn test_decode_wrapped_entity() {
        let raw: RawEntity<Attrs> = decode(
            "thing",
            json!({
                "result": "ok",
                "data": {"id": "t1", "type": "thing", "attributes": {"name": {"en": "One"}}},
                "relationships": [{"id": "m1", "type": "manga"}]
            }),
        )
        .unwrap();
        assert_eq!(raw.id, "t1");
        assert_eq!(raw.attributes.name["en"], "One");
        assert_eq!(related_ids(&raw.relationships, "manga"), vec!["m1"]);
    }

    #[test]
    fn test_decode_relationships_inside_data() {
        let raw: RawEntity<Attrs> = decode(
            "thing",
            json!({"data": {
                "id": "t1",
                "attributes": {"name": []},
                "relationships": [{"id": "u1", "type": "leader"}]
            }}),
        )
        .unwrap();
        assert!(raw.attributes.name.is_empty());
        assert_eq!(related_ids(&raw.relationships, "leader"), vec!["u1"]);
    }

    #[test]
    fn test_decode_rejects_missing_or_empty_id() {
        for value in [
            json!({"attributes": {}}),
            json!({"id": "", "attributes": {}}),
            json!({"id": 12, "attributes": {}}),
            json!("t1"),
        ] {
            let err = decode::<Attrs>("thing", value).unwrap_err();
            assert!(matches!(
                err,
                MangadexError::MalformedEntityError { entity: "thing", .. }
            ));
        }
    }

    #[test]
    fn test_pick_text() {
        let mut text = LocalizedString::new();
        assert_eq!(pick_text(&text), "");
        text.insert("ja".to_string(), "よつばと！".to_string());
        assert_eq!(pick_text(&text), "よつばと！");
        text.insert("en".to_string(), "Yotsuba&!".to_string());
        assert_eq!(pick_text(&text), "Yotsuba&!");
    }
}
