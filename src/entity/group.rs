use super::{decode, related_ids, FromJson, Relationship};
use crate::Result;
use getset::Getters;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct ScanlationGroup {
    id: String,
    name: String,
    relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize)]
struct GroupAttributes {
    name: String,
}

impl FromJson for ScanlationGroup {
    const KIND: &'static str = "scanlation group";

    fn from_json(value: Value) -> Result<Self> {
        let raw = decode::<GroupAttributes>(Self::KIND, value)?;
        Ok(Self {
            id: raw.id,
            name: raw.attributes.name,
            relationships: raw.relationships,
        })
    }
}

impl ScanlationGroup {
    pub fn leader_id(&self) -> Option<String> {
        related_ids(&self.relationships, "leader").into_iter().next()
    }
}
