use sqlx::{PgPool, Row};

use crate::models::CreatePostPayload;

/// Inserts a reply into a topic, bumps the topic's reply count and
/// `updated_at`, and increments the author's post count, as one
/// transaction. Returns the new post id.
pub async fn create_post(
    pool: &PgPool,
    data: &CreatePostPayload,
) -> Result<i32, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r#"
        INSERT INTO posts (topic_id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(data.topic_id)
    .bind(data.author_id)
    .bind(&data.content)
    .fetch_one(&mut *tx)
    .await?;
    let post_id: i32 = row.get("id");

    sqlx::query(
        r#"
        UPDATE topics
        SET reply_count = reply_count + 1, updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        "#,
    )
    .bind(data.topic_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE users SET post_count = post_count + 1 WHERE id = $1")
        .bind(data.author_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(post_id)
}
