use crate::errors::ApiError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Callback fired when the backend rejects the session token and the
/// calling operation did not suppress auth-failure side effects.
pub type InvalidTokenHook = Arc<dyn Fn() + Send + Sync>;

/// Authorization shapes understood by the backend. Token renewal is not
/// handled here; callers own their keys and tokens.
pub enum Authorization<'a> {
    /// Developer and project key only.
    AccessToken {
        developer_key: &'a str,
        project_key: &'a str,
    },
    /// Developer and project key plus the user's session token.
    AccessAndUserToken {
        developer_key: &'a str,
        project_key: &'a str,
        user_token: &'a str,
    },
}

/// Thin JSON transport over `reqwest`.
///
/// Maps non-success responses carrying a `{"code", "message"}` body to
/// `ApiError::BackendError` and everything else to transport errors. No
/// retry policy lives at this layer.
#[derive(Clone)]
pub struct JsonTransport {
    client: reqwest::Client,
    base_url: String,
    on_invalid_token: Option<InvalidTokenHook>,
}

impl JsonTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            on_invalid_token: None,
        })
    }

    /// Installs a hook invoked on invalid-token responses, unless the
    /// operation passes `filter_invalid_token_result = false`.
    pub fn with_invalid_token_hook(mut self, hook: InvalidTokenHook) -> Self {
        self.on_invalid_token = Some(hook);
        self
    }

    pub async fn get(
        &self,
        path: &str,
        authorization: &Authorization<'_>,
        filter_invalid_token_result: bool,
    ) -> Result<Value, ApiError> {
        self.execute(
            reqwest::Method::GET,
            path,
            authorization,
            None,
            filter_invalid_token_result,
        )
        .await
    }

    pub async fn post(
        &self,
        path: &str,
        authorization: &Authorization<'_>,
        body: Option<&Value>,
        filter_invalid_token_result: bool,
    ) -> Result<Value, ApiError> {
        self.execute(
            reqwest::Method::POST,
            path,
            authorization,
            body,
            filter_invalid_token_result,
        )
        .await
    }

    pub async fn put(
        &self,
        path: &str,
        authorization: &Authorization<'_>,
        body: Option<&Value>,
        filter_invalid_token_result: bool,
    ) -> Result<Value, ApiError> {
        self.execute(
            reqwest::Method::PUT,
            path,
            authorization,
            body,
            filter_invalid_token_result,
        )
        .await
    }

    async fn execute(
        &self,
        method: reqwest::Method,
        path: &str,
        authorization: &Authorization<'_>,
        body: Option<&Value>,
        filter_invalid_token_result: bool,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url);
        request = match authorization {
            Authorization::AccessToken {
                developer_key,
                project_key,
            } => request
                .header("Authorization", format!("Bearer {}", developer_key))
                .header("Project-Key", *project_key),
            Authorization::AccessAndUserToken {
                developer_key,
                project_key,
                user_token,
            } => request
                .header("Authorization", format!("Bearer {}", developer_key))
                .header("Project-Key", *project_key)
                .header("User-Token", *user_token),
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            if filter_invalid_token_result {
                if let Some(ref hook) = self.on_invalid_token {
                    hook();
                }
            }
            tracing::warn!("Session token rejected by {}", url);
            return Err(ApiError::Unauthorized(format!(
                "Token rejected by {}",
                url
            )));
        }
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Backend returned {} for {}: {}", status, url, error_body);
            // Backend failures carry a machine-readable code and message.
            if let Ok(parsed) = serde_json::from_str::<Value>(&error_body) {
                if let Some(code) = parsed.get("code").and_then(|c| c.as_i64()) {
                    return Err(ApiError::BackendError {
                        code,
                        reason: parsed
                            .get("message")
                            .and_then(|m| m.as_str())
                            .map(str::to_string),
                    });
                }
            }
            return Err(ApiError::Transport(format!(
                "Backend returned {}: {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::JsonError(format!("Failed to parse response body: {}", e)))
    }
}
