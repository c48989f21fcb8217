use super::{decode, FromJson};
use crate::Result;
use getset::Getters;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct User {
    id: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct UserAttributes {
    username: String,
}

impl FromJson for User {
    const KIND: &'static str = "user";

    fn from_json(value: Value) -> Result<Self> {
        let raw = decode::<UserAttributes>(Self::KIND, value)?;
        Ok(Self {
            id: raw.id,
            username: raw.attributes.username,
        })
    }
}
