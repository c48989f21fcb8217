use crate::config::ClientConfig;
use crate::query::QueryParams;
use crate::response::check_api_error;
use crate::Result;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: reqwest::Client,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Sends one request and returns the decoded, error-checked body.
    ///
    /// GET carries `params` in the query string, POST as a JSON object body,
    /// DELETE not at all.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: &str,
        params: &QueryParams,
        headers: HeaderMap,
    ) -> Result<Value> {
        let request = match method {
            Method::Get => self.client.get(params.append_to(url)),
            Method::Post => self.client.post(url).json(&params.to_json_body()),
            Method::Delete => {
                if !params.is_empty() {
                    warn!(url, "parameters are not sent with DELETE requests");
                }
                self.client.delete(url)
            }
        };
        debug!(%method, url, "sending request");

        let response = request.headers(headers).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%status, len = bytes.len(), "received response");

        let data: Value = serde_json::from_slice(&bytes)?;
        check_api_error(data)
    }
}
