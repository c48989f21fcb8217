use super::{MangadexError, Result};
use crate::query::{QueryParams, ToQueryParams};
use crate::site_url::manga_id_from_url;
use getset::Getters;
use reqwest::IntoUrl;
use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;
use std::collections::HashMap;

/// Query of `GET /manga/{id}/aggregate`, the volume and chapter index of a
/// manga.
#[derive(Debug, Clone)]
pub struct AggregateQuery {
    pub(crate) id: String,
    pub(crate) groups: Vec<String>,
    pub(crate) translated_language: Vec<String>,
}

#[derive(Debug, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct Volume {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    volume: Option<f32>,
    count: usize,
    chapters: HashMap<String, AggregateChapter>,
}

#[derive(Debug, Deserialize, Getters, PartialEq, PartialOrd)]
#[getset(get = "pub")]
pub struct AggregateChapter {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    chapter: Option<f32>,
    id: String,
    count: usize,
    #[serde(default)]
    others: Vec<String>,
}

/// `"none"` and other non-numbers become `None`.
fn deserialize_number_from_string<'de, D>(deserializer: D) -> std::result::Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| raw.parse::<f32>().ok()))
}

impl AggregateQuery {
    pub fn new(id: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            groups: Vec::new(),
            translated_language: Vec::new(),
        }
    }

    /// Accepts `https://mangadex.org/title/{id}/...`.
    pub fn from_url(url: impl IntoUrl + Clone + ToString) -> Result<Self> {
        Ok(Self::new(manga_id_from_url(url)?))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn group(mut self, group: impl ToString) -> Self {
        self.groups.push(group.to_string());
        self
    }

    pub fn language(mut self, language: impl ToString) -> Self {
        self.translated_language.push(language.to_string());
        self
    }

    pub(crate) fn volumes_from_json(value: Value) -> Result<Vec<Volume>> {
        #[derive(Debug, Deserialize)]
        #[serde(untagged)]
        enum ResponseBody {
            #[allow(dead_code)]
            Empty { volumes: [EmptyType; 0] },
            NonEmpty { volumes: HashMap<String, Volume> },
        }

        #[derive(Debug, Deserialize)]
        struct EmptyType;

        let response: ResponseBody =
            serde_json::from_value(value).map_err(|e| MangadexError::malformed("aggregate", e))?;
        match response {
            ResponseBody::Empty { .. } => Ok(Vec::new()),
            ResponseBody::NonEmpty { volumes } => Ok(volumes.into_values().collect()),
        }
    }
}

impl ToQueryParams for AggregateQuery {
    fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("groups[]", self.groups.as_slice())
            .with("translatedLanguage[]", self.translated_language.as_slice())
    }
}

/// Flattens volumes into their chapters, ordered by chapter number with
/// unnumbered chapters first.
pub trait GetChapters<'a> {
    fn get_chapters(&self) -> Vec<&'a AggregateChapter>;
}

impl<'a, T> GetChapters<'a> for T
where
    T: IntoIterator<Item = &'a Volume> + Clone,
{
    fn get_chapters(&self) -> Vec<&'a AggregateChapter> {
        let mut chapters: Vec<&AggregateChapter> = self
            .clone()
            .into_iter()
            .flat_map(|v| v.chapters().values())
            .collect();
        chapters.sort_by(|x, y| match (x.chapter, y.chapter) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (Some(c1), Some(c2)) => c1.total_cmp(&c2),
        });
        chapters
    }
}
