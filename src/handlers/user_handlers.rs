use tracing::error;

use crate::event::ApiGatewayResponse;
use crate::models::TopUsersResponse;
use crate::repositories::user_repository;
use crate::AppState;

/// Handler for the `top_users` action.
pub async fn top_users_handler(state: &AppState) -> ApiGatewayResponse {
    match user_repository::top_users(&state.db_pool).await {
        Ok(users) => ApiGatewayResponse::json(200, &TopUsersResponse { users }),
        Err(e) => {
            error!(error = %e, "Failed to fetch top users");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}
