use crate::{MangadexError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// A bearer session obtained from `/auth/login`.
///
/// Sessions are never refreshed by this crate; once the service stops
/// accepting the token, log in again.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    refresh: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: TokenPair,
}

#[derive(Debug, Deserialize)]
struct TokenPair {
    session: String,
    refresh: Option<String>,
}

impl Session {
    pub fn new(token: impl ToString) -> Self {
        Self {
            token: token.to_string(),
            refresh: None,
        }
    }

    pub(crate) fn from_login_response(value: Value) -> Result<Self> {
        let response: LoginResponse =
            serde_json::from_value(value).map_err(|e| MangadexError::malformed("session", e))?;
        if response.token.session.is_empty() {
            return Err(MangadexError::malformed("session", "empty session token"));
        }
        Ok(Self {
            token: response.token.session,
            refresh: response.token.refresh,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_deref()
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response() {
        let session = Session::from_login_response(json!({
            "result": "ok",
            "token": {"session": "abc.def", "refresh": "ghi.jkl"}
        }))
        .unwrap();
        assert_eq!(session.token(), "abc.def");
        assert_eq!(session.refresh_token(), Some("ghi.jkl"));
        assert_eq!(
            session.headers().unwrap().get(AUTHORIZATION).unwrap(),
            "Bearer abc.def"
        );
    }

    #[test]
    fn test_login_response_without_token() {
        let err = Session::from_login_response(json!({"result": "ok"})).unwrap_err();
        assert!(matches!(
            err,
            MangadexError::MalformedEntityError { entity: "session", .. }
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let printed = format!("{:?}", Session::new("secret-token"));
        assert!(!printed.contains("secret-token"));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let err = Session::new("bad\ntoken").headers().unwrap_err();
        assert!(matches!(err, MangadexError::HeaderError(_)));
    }
}
