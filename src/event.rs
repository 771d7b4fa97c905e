use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// HTTP-shaped event delivered by the function runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayEvent {
    #[serde(default = "default_http_method")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

fn default_http_method() -> String {
    "GET".to_string()
}

impl ApiGatewayEvent {
    /// Returns a GET query parameter by name, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

/// Response mapping returned to the function runtime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

fn json_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers
}

impl ApiGatewayResponse {
    /// Builds a JSON response with the standard CORS headers.
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self {
                status_code,
                headers: json_headers(),
                body,
                is_base64_encoded: false,
            },
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    /// Builds an `{"error": ...}` response.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            headers: json_headers(),
            body: serde_json::json!({ "error": message }).to_string(),
            is_base64_encoded: false,
        }
    }

    /// CORS preflight short-circuit. Empty body, no database access.
    pub fn preflight() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            "GET, POST, PUT, DELETE, OPTIONS".to_string(),
        );
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type, X-User-Id, X-Auth-Token".to_string(),
        );
        headers.insert("Access-Control-Max-Age".to_string(), "86400".to_string());
        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }
}
