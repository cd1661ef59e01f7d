use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page descriptor as returned by `/resolve/{tenant}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPage {
    pub page_type_code: String,
    pub title: String,
    pub slug: String,
    pub language: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub category_slug: Option<String>,
    pub is_virtual: bool,
    #[serde(default)]
    pub custom_route_id: Option<String>,
    #[serde(default)]
    pub page_id: Option<String>,
}

/// One composed component. Configuration is left as JSON for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub variant: String,
    pub order: i64,
    pub scope: serde_json::Value,
    pub merged_config: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub page: ResolvedPage,
    pub components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The resolver answered with an error body.
    #[error("resolver returned {status} ({code}): {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },
}

impl ClientError {
    /// Stable error code (`route_not_found`, `entity_not_found`, ...), if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            ClientError::Http(_) => None,
        }
    }
}

pub struct ResolverClient {
    client: Client,
    base_url: String,
}

impl ResolverClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a tenant path. `params` are forwarded to dynamic components.
    pub async fn resolve(
        &self,
        tenant: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<ResolveResponse, ClientError> {
        let mut query = vec![("path", path)];
        query.extend_from_slice(params);

        let resp = self
            .client
            .get(format!("{}/resolve/{}", self.base_url, tenant))
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await?;
            let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => (body.error, body.message),
                Err(_) => ("unknown".to_string(), text),
            };
            return Err(ClientError::Api {
                status,
                code,
                message,
            });
        }

        Ok(resp.json::<ResolveResponse>().await?)
    }

    /// Liveness probe.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }
}
