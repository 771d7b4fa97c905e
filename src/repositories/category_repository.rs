use sqlx::PgPool;

use crate::models::Category;

/// Fetches all categories ordered by display order.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, icon, display_order
        FROM categories
        ORDER BY display_order
        "#,
    )
    .fetch_all(pool)
    .await
}
