use tracing::{error, info};

use crate::event::ApiGatewayResponse;
use crate::models::{
    CreatePostPayload, CreatePostResponse, CreateTopicPayload, CreateTopicResponse,
};
use crate::repositories::{post_repository, topic_repository};
use crate::AppState;

/// Handler for the `create_topic` action: insert a topic with its
/// first post and bump the author's post count.
pub async fn create_topic_handler(
    state: &AppState,
    payload: CreateTopicPayload,
) -> ApiGatewayResponse {
    match topic_repository::create_topic_with_initial_post(&state.db_pool, &payload)
        .await
    {
        Ok(topic_id) => {
            info!(topic_id, author_id = payload.author_id, "Created topic");
            ApiGatewayResponse::json(
                201,
                &CreateTopicResponse {
                    topic_id,
                    message: "Topic created",
                },
            )
        }
        Err(e) => {
            error!(error = %e, "Failed to create topic");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}

/// Handler for the `create_post` action: insert a reply and bump the
/// topic's reply count and the author's post count.
pub async fn create_post_handler(
    state: &AppState,
    payload: CreatePostPayload,
) -> ApiGatewayResponse {
    match post_repository::create_post(&state.db_pool, &payload).await {
        Ok(post_id) => {
            info!(
                post_id,
                topic_id = payload.topic_id,
                author_id = payload.author_id,
                "Created post"
            );
            ApiGatewayResponse::json(
                201,
                &CreatePostResponse {
                    post_id,
                    message: "Post created",
                },
            )
        }
        Err(e) => {
            error!(error = %e, topic_id = payload.topic_id, "Failed to create post");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}
