use tracing::{error, info, warn};

use crate::event::{ApiGatewayEvent, ApiGatewayResponse};
use crate::models::{MessageResponse, TopicDetailResponse, TopicListResponse};
use crate::repositories::topic_repository;
use crate::AppState;

/// Handler for the `topics` action: list all topics, pinned first,
/// then most recently updated.
pub async fn list_topics_handler(state: &AppState) -> ApiGatewayResponse {
    match topic_repository::list_topics(&state.db_pool).await {
        Ok(topics) => ApiGatewayResponse::json(200, &TopicListResponse { topics }),
        Err(e) => {
            error!(error = %e, "Failed to fetch topics");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}

/// Handler for the `topic` action: fetch one topic with its posts and
/// attachments, incrementing the topic's view counter.
pub async fn get_topic_handler(
    state: &AppState,
    event: &ApiGatewayEvent,
) -> ApiGatewayResponse {
    let Some(raw_id) = event.query_param("id") else {
        return ApiGatewayResponse::error(400, "Topic ID required");
    };
    let topic_id: i32 = match raw_id.parse() {
        Ok(id) => id,
        Err(_) => return ApiGatewayResponse::error(400, "Invalid topic ID"),
    };

    match topic_repository::fetch_topic_with_posts(&state.db_pool, topic_id).await {
        Ok(Some(page)) => ApiGatewayResponse::json(
            200,
            &TopicDetailResponse {
                topic: page.topic,
                posts: page.posts,
            },
        ),
        Ok(None) => ApiGatewayResponse::error(404, "Topic not found"),
        Err(e) => {
            error!(error = %e, topic_id, "Failed to fetch topic");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}

/// Handler for the `toggle_pin` action.
pub async fn toggle_pin_handler(state: &AppState, topic_id: i32) -> ApiGatewayResponse {
    match topic_repository::toggle_pinned(&state.db_pool, topic_id).await {
        Ok(0) => {
            warn!(topic_id, "Toggled pin on nonexistent topic");
            ApiGatewayResponse::json(200, &MessageResponse { message: "Topic pin toggled" })
        }
        Ok(_) => {
            info!(topic_id, "Toggled topic pin");
            ApiGatewayResponse::json(200, &MessageResponse { message: "Topic pin toggled" })
        }
        Err(e) => {
            error!(error = %e, topic_id, "Failed to toggle topic pin");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}

/// Handler for the `toggle_lock` action.
pub async fn toggle_lock_handler(state: &AppState, topic_id: i32) -> ApiGatewayResponse {
    match topic_repository::toggle_locked(&state.db_pool, topic_id).await {
        Ok(0) => {
            warn!(topic_id, "Toggled lock on nonexistent topic");
            ApiGatewayResponse::json(200, &MessageResponse { message: "Topic lock toggled" })
        }
        Ok(_) => {
            info!(topic_id, "Toggled topic lock");
            ApiGatewayResponse::json(200, &MessageResponse { message: "Topic lock toggled" })
        }
        Err(e) => {
            error!(error = %e, topic_id, "Failed to toggle topic lock");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}
