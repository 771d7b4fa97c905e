use sqlx::PgPool;

use crate::models::TopUser;

/// Fetches the top 10 users by reputation descending.
pub async fn top_users(pool: &PgPool) -> Result<Vec<TopUser>, sqlx::Error> {
    sqlx::query_as::<_, TopUser>(
        r#"
        SELECT id, username, avatar_url, reputation, post_count
        FROM users
        ORDER BY reputation DESC
        LIMIT 10
        "#,
    )
    .fetch_all(pool)
    .await
}
