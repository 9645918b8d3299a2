//! JSON-RPC 2.0 over HTTP transport

use crate::error::{Error, Result};
use crate::rpc::RpcTransport;
use crate::types::{SubmissionPayload, SubmissionResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Transport issuing `call` requests with reqwest
pub struct JsonRpcTransport {
    client: Client,
    base_url: Option<Url>,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct CallRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: &'a SubmissionPayload,
    id: u64,
}

#[derive(Deserialize)]
struct CallReply {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<CallError>,
}

#[derive(Deserialize)]
struct CallError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<CallErrorData>,
}

#[derive(Deserialize)]
struct CallErrorData {
    #[serde(default)]
    message: Option<String>,
}

impl JsonRpcTransport {
    /// Create a transport; relative endpoints are joined onto `base_url`
    pub fn new(base_url: Option<Url>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Resolve an endpoint to an absolute URL
    pub fn resolve(&self, endpoint: &str) -> Result<Url> {
        match Url::parse(endpoint) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base_url.as_ref().ok_or_else(|| {
                    Error::Config(format!("relative endpoint {endpoint} needs a base url"))
                })?;
                Ok(base.join(endpoint)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl RpcTransport for JsonRpcTransport {
    async fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionResponse> {
        let url = self.resolve(endpoint)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = CallRequest {
            jsonrpc: "2.0",
            method: "call",
            params: payload,
            id,
        };

        debug!(%url, id, "sending json-rpc call");

        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "{endpoint} returned HTTP {status}"
            )));
        }

        let reply: CallReply = response.json().await?;

        if let Some(error) = reply.error {
            let message = error
                .data
                .and_then(|d| d.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(error.message);
            return Err(Error::Rpc {
                code: error.code,
                message,
            });
        }

        let result = reply.result.ok_or_else(|| {
            Error::Transport(format!("{endpoint} replied without result or error"))
        })?;

        Ok(serde_json::from_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: Option<&str>) -> JsonRpcTransport {
        JsonRpcTransport::new(
            base.map(|b| Url::parse(b).unwrap()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let t = transport(Some("https://events.example.com/"));
        assert_eq!(
            t.resolve("/event/3/registration/new").unwrap().as_str(),
            "https://events.example.com/event/3/registration/new"
        );
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let t = transport(Some("https://events.example.com/"));
        assert_eq!(
            t.resolve("http://other.test/rpc").unwrap().as_str(),
            "http://other.test/rpc"
        );
    }

    #[test]
    fn test_resolve_relative_without_base() {
        let t = transport(None);
        assert!(matches!(t.resolve("/event/1"), Err(Error::Config(_))));
    }
}
