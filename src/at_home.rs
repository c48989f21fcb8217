use crate::{MangadexError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Which rendition of the pages to link to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageQuality {
    #[default]
    Data,
    DataSaver,
}

impl ImageQuality {
    fn path(&self) -> &'static str {
        match self {
            ImageQuality::Data => "data",
            ImageQuality::DataSaver => "data-saver",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AtHomeServer {
    base_url: String,
}

impl AtHomeServer {
    pub(crate) fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| MangadexError::malformed("at-home server", e))
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// One URL per page, `{base_url}/{data|data-saver}/{hash}/{page}`, in the
/// order of `pages`.
///
/// Backslashes in `base_url` are dropped; the server sometimes sends the URL
/// with escaped slashes.
pub fn build_image_urls<S: AsRef<str>>(
    base_url: &str,
    hash: &str,
    pages: &[S],
    quality: ImageQuality,
) -> Vec<String> {
    let base_url = base_url.replace('\\', "");
    let quality = quality.path();
    pages
        .iter()
        .map(|page| format!("{base_url}/{quality}/{hash}/{}", page.as_ref()))
        .collect()
}
