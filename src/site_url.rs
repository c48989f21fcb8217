use crate::{MangadexError, Result};
use reqwest::IntoUrl;

/// Extracts the manga id from `https://mangadex.org/title/{id}/...`.
pub fn manga_id_from_url(url: impl IntoUrl + Clone + ToString) -> Result<String> {
    id_from_url(url, "title")
}

/// Extracts the chapter id from `https://mangadex.org/chapter/{id}/...`.
pub fn chapter_id_from_url(url: impl IntoUrl + Clone + ToString) -> Result<String> {
    id_from_url(url, "chapter")
}

fn id_from_url(url: impl IntoUrl + Clone + ToString, kind: &str) -> Result<String> {
    let url = url
        .clone()
        .into_url()
        .map_err(|_e| MangadexError::UrlParseError(url.to_string()))?;
    if !url
        .domain()
        .is_some_and(|x| x == "mangadex.org" || x == "www.mangadex.org")
    {
        return Err(MangadexError::UrlParseError(url.to_string()));
    }
    let mut segments = url
        .path_segments()
        .ok_or_else(|| MangadexError::UrlParseError(url.to_string()))?;
    match (segments.next(), segments.next()) {
        (Some(segment), Some(id)) if segment == kind && !id.is_empty() => Ok(id.to_string()),
        _ => Err(MangadexError::UrlParseError(url.to_string())),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_url_parse() {
        assert!(manga_id_from_url("https://mangadex.org/title/99b8eaeb-9041-4bfd-8eb7-d72addc88eb7/the-cafe-terrace-and-its-goddesses").is_ok());
        assert!(manga_id_from_url("https://mangadex.org/chapter/99b8eaeb-9041-4bfd-8eb7-d72addc88eb7/the-cafe-terrace-and-its-goddesses").is_err());
        assert!(manga_id_from_url("https://mangapark.com/title/99b8eaeb-9041-4bfd-8eb7-d72addc88eb7/the-cafe-terrace-and-its-goddesses").is_err());
        assert!(manga_id_from_url("https://mangadex.org/title/").is_err());
        assert!(manga_id_from_url("not a url").is_err());
    }

    #[test]
    fn test_chapter_url() {
        assert_eq!(
            chapter_id_from_url("https://mangadex.org/chapter/af456519-3791-47c3-af8a-23ed894b5dd8/1")
                .unwrap(),
            "af456519-3791-47c3-af8a-23ed894b5dd8"
        );
        assert!(chapter_id_from_url("https://mangadex.org/title/af456519").is_err());
    }
}
