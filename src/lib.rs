use sqlx::PgPool;

pub mod config;
pub mod event;
pub mod handlers;
pub mod models;
pub mod repositories;

use event::{ApiGatewayEvent, ApiGatewayResponse};
use handlers::{category_handlers, post_handlers, topic_handlers, user_handlers};
use models::{CreatePostPayload, CreateTopicPayload, ToggleTopicPayload};

/// Shared application state, created once at cold start.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
}

/// Entry point for a single invocation: dispatch on HTTP method and
/// action selector, returning a JSON response envelope.
pub async fn handle_event(state: &AppState, event: ApiGatewayEvent) -> ApiGatewayResponse {
    if event.http_method == "OPTIONS" {
        return ApiGatewayResponse::preflight();
    }

    match event.http_method.as_str() {
        "GET" => handle_get(state, &event).await,
        "POST" | "PUT" => handle_mutation(state, &event).await,
        _ => ApiGatewayResponse::error(404, "Invalid action"),
    }
}

async fn handle_get(state: &AppState, event: &ApiGatewayEvent) -> ApiGatewayResponse {
    match event.query_param("action").unwrap_or("topics") {
        "topics" => topic_handlers::list_topics_handler(state).await,
        "categories" => category_handlers::list_categories_handler(state).await,
        "top_users" => user_handlers::top_users_handler(state).await,
        "topic" => topic_handlers::get_topic_handler(state, event).await,
        _ => ApiGatewayResponse::error(404, "Invalid action"),
    }
}

async fn handle_mutation(
    state: &AppState,
    event: &ApiGatewayEvent,
) -> ApiGatewayResponse {
    // A missing body behaves like an empty object; a body that is not
    // valid JSON is a processing failure.
    let raw_body = event.body.as_deref().unwrap_or("{}");
    let body: serde_json::Value = match serde_json::from_str(raw_body) {
        Ok(body) => body,
        Err(e) => return ApiGatewayResponse::error(500, &e.to_string()),
    };

    let action = body
        .get("action")
        .and_then(|a| a.as_str())
        .unwrap_or_default()
        .to_string();

    match (event.http_method.as_str(), action.as_str()) {
        ("POST", "create_topic") => {
            match serde_json::from_value::<CreateTopicPayload>(body) {
                Ok(payload) => post_handlers::create_topic_handler(state, payload).await,
                Err(e) => ApiGatewayResponse::error(500, &e.to_string()),
            }
        }
        ("POST", "create_post") => {
            match serde_json::from_value::<CreatePostPayload>(body) {
                Ok(payload) => post_handlers::create_post_handler(state, payload).await,
                Err(e) => ApiGatewayResponse::error(500, &e.to_string()),
            }
        }
        ("PUT", "toggle_pin") => {
            match serde_json::from_value::<ToggleTopicPayload>(body) {
                Ok(payload) => {
                    topic_handlers::toggle_pin_handler(state, payload.topic_id).await
                }
                Err(e) => ApiGatewayResponse::error(500, &e.to_string()),
            }
        }
        ("PUT", "toggle_lock") => {
            match serde_json::from_value::<ToggleTopicPayload>(body) {
                Ok(payload) => {
                    topic_handlers::toggle_lock_handler(state, payload.topic_id).await
                }
                Err(e) => ApiGatewayResponse::error(500, &e.to_string()),
            }
        }
        _ => ApiGatewayResponse::error(404, "Invalid action"),
    }
}
