use tracing::error;

use crate::event::ApiGatewayResponse;
use crate::models::CategoryListResponse;
use crate::repositories::category_repository;
use crate::AppState;

/// Handler for the `categories` action.
pub async fn list_categories_handler(state: &AppState) -> ApiGatewayResponse {
    match category_repository::list_categories(&state.db_pool).await {
        Ok(categories) => {
            ApiGatewayResponse::json(200, &CategoryListResponse { categories })
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch categories");
            ApiGatewayResponse::error(500, &e.to_string())
        }
    }
}
