//! plantid Recognition Client Layer
//!
//! Implementations of the `RecognitionClient` trait from `plantid-domain`.
//!
//! # Clients
//!
//! - `AgentClient`: HTTP client for the recognition agent server
//! - `MockClient`: Deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use plantid_client::MockClient;
//! use plantid_domain::traits::RecognitionClient;
//!
//! let client = MockClient::new(r#"{"scientificName": "Ochna integerrima"}"#);
//! let raw = client.recognize("/9j/4AAQ").unwrap();
//! assert!(raw.contains("Ochna"));
//! ```

#![warn(missing_docs)]

pub mod agent;

use plantid_domain::traits::RecognitionClient;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use agent::{AgentClient, AgentConfig, SessionStatus};

/// Instruction sent alongside every photo.
///
/// Asks for a bare JSON object with the eight record fields in Vietnamese.
pub const RECOGNITION_PROMPT: &str = r#"Identify the object in the image and provide information in Vietnamese (nếu có).
Return ONLY a valid JSON object with exactly these fields:
- name: tên phổ thông (Vietnamese common name)
- scientificName: tên khoa học (scientific name)
- type: loại sinh vật (e.g., thực vật, động vật, vật thể)
- classification: phân loại sinh học (nếu có)
- summary: tóm tắt sơ bộ
- description: mô tả chi tiết
- biology: đặc điểm sinh học, vòng đời, sinh thái, giải phẫu (nếu có)
- textbook: nguồn tham khảo SGK/bài học (nếu có)

Do NOT return markdown, NO explanations or commentary, just the JSON object.
If any field is unknown or not available, still include the key with empty string ("").
All fields are required.
Example:
{
  "name": "Mai vàng",
  "scientificName": "Ochna integerrima",
  "type": "thực vật",
  "classification": "Magnoliopsida, Malpighiales, Ochnaceae",
  "summary": "Mai vàng là loài hoa nổi bật ở Việt Nam.",
  "description": "Mai vàng là cây thân gỗ, hoa màu vàng, sống chủ yếu ở Nam bộ.",
  "biology": "Ra hoa cuối Đông, lá rụng mùa Thu...",
  "textbook": "Sinh học 11 cơ bản"
}"#;

/// Errors that can occur while talking to the recognition service
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response could not be read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client settings are incomplete
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Mock recognition client for deterministic testing
///
/// Returns a fixed body without any network calls. Clones share the call
/// log, so a clone handed to the code under test can be inspected afterwards.
#[derive(Debug, Clone)]
pub struct MockClient {
    response: String,
    fail: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockClient {
    /// Create a MockClient answering every call with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: Arc::new(Mutex::new(false)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make subsequent calls fail (or succeed again)
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    /// Get the number of times recognize was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Image payload of the most recent call
    pub fn last_image(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl RecognitionClient for MockClient {
    type Error = ClientError;

    fn recognize(&self, image_base64: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(image_base64.to_string());

        if *self.fail.lock().unwrap() {
            return Err(ClientError::Http {
                status: 500,
                body: "Mock error".to_string(),
            });
        }
        Ok(self.response.clone())
    }
}
