use sqlx::{PgPool, Row};

use crate::models::{
    Attachment, CreateTopicPayload, PostDetail, PostWithAuthor, TopicDetail,
    TopicSummary,
};

/// A topic together with its posts, loaded by the detail view.
pub struct TopicWithPosts {
    pub topic: TopicDetail,
    pub posts: Vec<PostDetail>,
}

/// Fetches all topics joined with author and category display fields,
/// pinned topics first, then most recently updated.
pub async fn list_topics(pool: &PgPool) -> Result<Vec<TopicSummary>, sqlx::Error> {
    sqlx::query_as::<_, TopicSummary>(
        r#"
        SELECT
            t.id, t.title, t.category_id, t.author_id,
            t.is_pinned, t.is_locked, t.views, t.reply_count,
            t.created_at, t.updated_at,
            u.username as author_name,
            u.avatar_url as author_avatar,
            u.reputation as author_reputation,
            c.name as category_name,
            c.icon as category_icon
        FROM topics t
        JOIN users u ON t.author_id = u.id
        JOIN categories c ON t.category_id = c.id
        ORDER BY t.is_pinned DESC, t.updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Loads a topic with its posts and attachments, incrementing the view
/// counter. Runs as one transaction so the counter bump and the reads
/// commit together. Returns `None` if the topic does not exist.
///
/// The returned topic carries the view count from before this call's
/// increment.
pub async fn fetch_topic_with_posts(
    pool: &PgPool,
    topic_id: i32,
) -> Result<Option<TopicWithPosts>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let topic = sqlx::query_as::<_, TopicDetail>(
        r#"
        SELECT
            t.id, t.title, t.category_id, t.author_id,
            t.is_pinned, t.is_locked, t.views, t.reply_count,
            t.created_at, t.updated_at,
            u.username as author_name,
            u.avatar_url as author_avatar,
            u.reputation as author_reputation,
            c.name as category_name
        FROM topics t
        JOIN users u ON t.author_id = u.id
        JOIN categories c ON t.category_id = c.id
        WHERE t.id = $1
        "#,
    )
    .bind(topic_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(topic) = topic else {
        return Ok(None);
    };

    sqlx::query("UPDATE topics SET views = views + 1 WHERE id = $1")
        .bind(topic_id)
        .execute(&mut *tx)
        .await?;

    let post_rows = sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT
            p.id, p.topic_id, p.author_id, p.content, p.created_at,
            u.username as author_name,
            u.avatar_url as author_avatar,
            u.reputation as author_reputation,
            u.is_admin,
            u.is_moderator
        FROM posts p
        JOIN users u ON p.author_id = u.id
        WHERE p.topic_id = $1
        ORDER BY p.created_at ASC
        "#,
    )
    .bind(topic_id)
    .fetch_all(&mut *tx)
    .await?;

    let mut posts = Vec::with_capacity(post_rows.len());
    for post in post_rows {
        let attachments = sqlx::query_as::<_, Attachment>(
            r#"
            SELECT id, post_id, file_name, file_url, file_size, created_at
            FROM attachments
            WHERE post_id = $1
            "#,
        )
        .bind(post.id)
        .fetch_all(&mut *tx)
        .await?;

        posts.push(PostDetail { post, attachments });
    }

    tx.commit().await?;

    Ok(Some(TopicWithPosts { topic, posts }))
}

/// Inserts a new topic with its first post and increments the author's
/// post count, as one transaction. Returns the new topic id.
pub async fn create_topic_with_initial_post(
    pool: &PgPool,
    data: &CreateTopicPayload,
) -> Result<i32, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r#"
        INSERT INTO topics (title, category_id, author_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&data.title)
    .bind(data.category_id)
    .bind(data.author_id)
    .fetch_one(&mut *tx)
    .await?;
    let topic_id: i32 = row.get("id");

    sqlx::query(
        r#"
        INSERT INTO posts (topic_id, author_id, content)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(topic_id)
    .bind(data.author_id)
    .bind(&data.content)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE users SET post_count = post_count + 1 WHERE id = $1")
        .bind(data.author_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(topic_id)
}

/// Flips a topic's pinned flag. Returns the number of rows affected.
pub async fn toggle_pinned(pool: &PgPool, topic_id: i32) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("UPDATE topics SET is_pinned = NOT is_pinned WHERE id = $1")
            .bind(topic_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

/// Flips a topic's locked flag. Returns the number of rows affected.
pub async fn toggle_locked(pool: &PgPool, topic_id: i32) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("UPDATE topics SET is_locked = NOT is_locked WHERE id = $1")
            .bind(topic_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}
