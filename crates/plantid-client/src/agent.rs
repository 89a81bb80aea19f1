//! Recognition agent client
//!
//! Talks to an agent server exposing the session and `run_sse` endpoints.
//! A recognition is two calls: make sure the user's session exists, then
//! submit the prompt together with the photo. The response body is returned
//! untouched for `plantid-extractor` to interpret.
//!
//! # Examples
//!
//! ```no_run
//! use plantid_client::{AgentClient, AgentConfig};
//!
//! # async fn run() -> Result<(), plantid_client::ClientError> {
//! let config = AgentConfig {
//!     user_id: "u-42".to_string(),
//!     session_id: "s-42".to_string(),
//!     ..Default::default()
//! };
//! let client = AgentClient::new(config)?;
//! let raw = client.recognize_async("/9j/4AAQSkZJRg...").await?;
//! println!("{}", raw);
//! # Ok(())
//! # }
//! ```

use crate::{ClientError, RECOGNITION_PROMPT};
use plantid_domain::traits::RecognitionClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Default agent server endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default agent application name
pub const DEFAULT_APP_NAME: &str = "multi_tool_agent";

/// Default timeout for agent requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const SESSION_EXISTS: &str = "Session already exists";

/// Connection settings for the agent server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Base URL of the agent server
    pub endpoint: String,

    /// Agent application name
    pub app_name: String,

    /// User the session belongs to
    pub user_id: String,

    /// Conversation session id
    pub session_id: String,

    /// Bearer token, sent when present
    pub token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            user_id: String::new(),
            session_id: String::new(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AgentConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.endpoint.trim().is_empty() {
            return Err(ClientError::Config("agent endpoint is not set".to_string()));
        }
        if self.app_name.trim().is_empty() {
            return Err(ClientError::Config("agent app_name is not set".to_string()));
        }
        if self.user_id.trim().is_empty() || self.session_id.trim().is_empty() {
            return Err(ClientError::Config(
                "agent user_id and session_id are required".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config(
                "agent timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of session creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// A new session was created
    Created,
    /// The server already had this session
    Existing,
}

#[derive(Serialize)]
struct SessionState {
    prefered_language: &'static str,
    visit_count: u32,
}

#[derive(Serialize)]
struct CreateSessionRequest {
    state: SessionState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    data: &'a str,
    display_name: &'static str,
    mime_type: &'static str,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessagePart<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
struct NewMessage<'a> {
    role: &'static str,
    parts: Vec<MessagePart<'a>>,
}

#[derive(Serialize)]
struct RunRequest<'a> {
    app_name: &'a str,
    user_id: &'a str,
    session_id: &'a str,
    new_message: NewMessage<'a>,
    streaming: bool,
}

/// HTTP client for the recognition agent
///
/// Requests are made once; there is no retry or token refresh.
pub struct AgentClient {
    config: AgentConfig,
    client: reqwest::Client,
}

impl AgentClient {
    /// Create a client after validating `config`
    pub fn new(config: AgentConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Active configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn session_url(&self) -> String {
        format!(
            "{}/apps/{}/users/{}/sessions/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.app_name,
            self.config.user_id,
            self.config.session_id
        )
    }

    fn run_url(&self) -> String {
        format!("{}/run_sse", self.config.endpoint.trim_end_matches('/'))
    }

    fn run_request<'a>(&'a self, image_base64: &'a str) -> RunRequest<'a> {
        RunRequest {
            app_name: &self.config.app_name,
            user_id: &self.config.user_id,
            session_id: &self.config.session_id,
            new_message: NewMessage {
                role: "user",
                parts: vec![
                    MessagePart::Text {
                        text: RECOGNITION_PROMPT,
                    },
                    MessagePart::Inline {
                        inline_data: InlineData {
                            data: image_base64,
                            display_name: "image.jpeg",
                            mime_type: "image/jpeg",
                        },
                    },
                ],
            },
            streaming: false,
        }
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.post(url);
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Create the configured session.
    ///
    /// A server reply saying the session already exists counts as success.
    pub async fn create_session(&self) -> Result<SessionStatus, ClientError> {
        let body = CreateSessionRequest {
            state: SessionState {
                prefered_language: "Vietnamese",
                visit_count: 1,
            },
        };

        let response = self
            .post(&self.session_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            info!("Created session {}", self.config.session_id);
            return Ok(SessionStatus::Created);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if text.contains(SESSION_EXISTS) {
            debug!("Session {} already exists", self.config.session_id);
            return Ok(SessionStatus::Existing);
        }

        Err(ClientError::Http {
            status: status.as_u16(),
            body: text,
        })
    }

    /// Submit the photo and return the raw response body
    pub async fn run_sse(&self, image_base64: &str) -> Result<String, ClientError> {
        let response = self
            .post(&self.run_url())
            .json(&self.run_request(image_base64))
            .send()
            .await
            .map_err(|e| ClientError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("Agent returned {} bytes", text.len());
        Ok(text)
    }

    /// Ensure the session exists, then run the recognition
    pub async fn recognize_async(&self, image_base64: &str) -> Result<String, ClientError> {
        self.create_session().await?;
        self.run_sse(image_base64).await
    }
}

impl RecognitionClient for AgentClient {
    type Error = ClientError;

    /// Blocking wrapper; must not be called from inside a Tokio runtime
    fn recognize(&self, image_base64: &str) -> Result<String, Self::Error> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Communication(format!("Failed to start runtime: {}", e)))?
            .block_on(self.recognize_async(image_base64))
    }
}
