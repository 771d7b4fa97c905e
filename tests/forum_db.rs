//! Database property tests. They need a live Postgres pointed to by
//! DATABASE_URL (a scratch database — the schema is created here) and
//! run with `cargo test -- --ignored`.

mod common;

use common::{body_event, dispatch, get_event, live_state};
use forum_api::AppState;
use sqlx::Row;

async fn create_schema(state: &AppState) {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id           SERIAL PRIMARY KEY,
            username     TEXT NOT NULL,
            avatar_url   TEXT,
            reputation   INT4 NOT NULL DEFAULT 0,
            post_count   INT4 NOT NULL DEFAULT 0,
            is_admin     BOOL NOT NULL DEFAULT FALSE,
            is_moderator BOOL NOT NULL DEFAULT FALSE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id            SERIAL PRIMARY KEY,
            name          TEXT NOT NULL,
            icon          TEXT,
            display_order INT4 NOT NULL DEFAULT 0
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS topics (
            id          SERIAL PRIMARY KEY,
            title       TEXT NOT NULL,
            category_id INT4 NOT NULL REFERENCES categories(id),
            author_id   INT4 NOT NULL REFERENCES users(id),
            is_pinned   BOOL NOT NULL DEFAULT FALSE,
            is_locked   BOOL NOT NULL DEFAULT FALSE,
            views       INT4 NOT NULL DEFAULT 0,
            reply_count INT4 NOT NULL DEFAULT 0,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id         SERIAL PRIMARY KEY,
            topic_id   INT4 NOT NULL REFERENCES topics(id),
            author_id  INT4 NOT NULL REFERENCES users(id),
            content    TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS attachments (
            id         SERIAL PRIMARY KEY,
            post_id    INT4 NOT NULL REFERENCES posts(id),
            file_name  TEXT NOT NULL,
            file_url   TEXT NOT NULL,
            file_size  INT8,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(&state.db_pool)
            .await
            .expect("failed to create test schema");
    }
}

async fn seed_user(state: &AppState, username: &str, reputation: i32) -> i32 {
    sqlx::query("INSERT INTO users (username, reputation) VALUES ($1, $2) RETURNING id")
        .bind(username)
        .bind(reputation)
        .fetch_one(&state.db_pool)
        .await
        .expect("failed to seed user")
        .get("id")
}

async fn seed_category(state: &AppState, name: &str) -> i32 {
    sqlx::query("INSERT INTO categories (name, display_order) VALUES ($1, 0) RETURNING id")
        .bind(name)
        .fetch_one(&state.db_pool)
        .await
        .expect("failed to seed category")
        .get("id")
}

async fn create_topic(state: &AppState, author_id: i32, category_id: i32, title: &str) -> i64 {
    let body = serde_json::json!({
        "action": "create_topic",
        "title": title,
        "category_id": category_id,
        "author_id": author_id,
        "content": "initial post",
    });
    let (status, response) =
        dispatch(state, body_event("POST", Some(&body.to_string()))).await;
    assert_eq!(status, 201, "create_topic failed: {response}");
    response["topic_id"].as_i64().expect("topic_id in response")
}

async fn insert_post(
    state: &AppState,
    topic_id: i32,
    author_id: i32,
    content: &str,
    hours_from_now: i32,
) -> i32 {
    sqlx::query(
        r#"
        INSERT INTO posts (topic_id, author_id, content, created_at)
        VALUES ($1, $2, $3, NOW() + make_interval(hours => $4::int))
        RETURNING id
        "#,
    )
    .bind(topic_id)
    .bind(author_id)
    .bind(content)
    .bind(hours_from_now)
    .fetch_one(&state.db_pool)
    .await
    .expect("failed to insert post")
    .get("id")
}

async fn insert_attachment(state: &AppState, post_id: i32, file_name: &str) {
    sqlx::query(
        r#"
        INSERT INTO attachments (post_id, file_name, file_url, file_size)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(post_id)
    .bind(file_name)
    .bind(format!("https://files.example/{file_name}"))
    .bind(1024_i64)
    .execute(&state.db_pool)
    .await
    .expect("failed to insert attachment");
}

async fn topic_flags(state: &AppState, topic_id: i32) -> (bool, bool) {
    let row = sqlx::query("SELECT is_pinned, is_locked FROM topics WHERE id = $1")
        .bind(topic_id)
        .fetch_one(&state.db_pool)
        .await
        .expect("failed to read topic flags");
    (row.get("is_pinned"), row.get("is_locked"))
}

async fn user_post_count(state: &AppState, user_id: i32) -> i32 {
    sqlx::query("SELECT post_count FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&state.db_pool)
        .await
        .expect("failed to read post_count")
        .get("post_count")
}

#[tokio::test]
#[ignore]
async fn topic_detail_increments_views_by_one_per_call() {
    let state = live_state().await;
    create_schema(&state).await;
    let author = seed_user(&state, "viewer", 5).await;
    let category = seed_category(&state, "general").await;
    let topic_id = create_topic(&state, author, category, "view counting").await;

    let id = topic_id.to_string();
    let (status, first) =
        dispatch(&state, get_event(&[("action", "topic"), ("id", &id)])).await;
    assert_eq!(status, 200);
    let (status, second) =
        dispatch(&state, get_event(&[("action", "topic"), ("id", &id)])).await;
    assert_eq!(status, 200);

    // The response shows the pre-increment count, so the second read
    // is exactly one ahead of the first.
    assert_eq!(
        second["topic"]["views"].as_i64().unwrap(),
        first["topic"]["views"].as_i64().unwrap() + 1
    );
}

#[tokio::test]
#[ignore]
async fn create_topic_creates_initial_post_and_bumps_author() {
    let state = live_state().await;
    create_schema(&state).await;
    let author = seed_user(&state, "founder", 10).await;
    let category = seed_category(&state, "announcements").await;

    let count_before = user_post_count(&state, author).await;
    let topic_id = create_topic(&state, author, category, "welcome").await;

    let post_count: i64 =
        sqlx::query("SELECT COUNT(*) AS n FROM posts WHERE topic_id = $1")
            .bind(topic_id as i32)
            .fetch_one(&state.db_pool)
            .await
            .unwrap()
            .get("n");
    assert_eq!(post_count, 1);
    assert_eq!(user_post_count(&state, author).await, count_before + 1);
}

#[tokio::test]
#[ignore]
async fn create_post_bumps_reply_count_and_author() {
    let state = live_state().await;
    create_schema(&state).await;
    let author = seed_user(&state, "replier", 3).await;
    let category = seed_category(&state, "help").await;
    let topic_id = create_topic(&state, author, category, "question").await;

    let count_before = user_post_count(&state, author).await;
    let body = serde_json::json!({
        "action": "create_post",
        "topic_id": topic_id,
        "author_id": author,
        "content": "hi",
    });
    let (status, response) =
        dispatch(&state, body_event("POST", Some(&body.to_string()))).await;
    assert_eq!(status, 201);
    assert!(response["post_id"].as_i64().is_some());

    let reply_count: i32 = sqlx::query("SELECT reply_count FROM topics WHERE id = $1")
        .bind(topic_id as i32)
        .fetch_one(&state.db_pool)
        .await
        .unwrap()
        .get("reply_count");
    assert_eq!(reply_count, 1);
    assert_eq!(user_post_count(&state, author).await, count_before + 1);
}

#[tokio::test]
#[ignore]
async fn topic_detail_orders_posts_and_groups_attachments() {
    let state = live_state().await;
    create_schema(&state).await;
    let author = seed_user(&state, "poster", 4).await;
    let category = seed_category(&state, "files").await;
    let topic_id = create_topic(&state, author, category, "release notes").await as i32;

    // Replies are inserted newest-first so the response order cannot
    // come from insertion order alone.
    let _second = insert_post(&state, topic_id, author, "second reply", 2).await;
    let first = insert_post(&state, topic_id, author, "first reply", 1).await;
    insert_attachment(&state, first, "notes.txt").await;

    let id = topic_id.to_string();
    let (status, response) =
        dispatch(&state, get_event(&[("action", "topic"), ("id", &id)])).await;
    assert_eq!(status, 200);

    let posts = response["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 3);
    let contents: Vec<&str> = posts
        .iter()
        .map(|p| p["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, ["initial post", "first reply", "second reply"]);

    for post in posts {
        let attachments = post["attachments"].as_array().unwrap();
        if post["id"].as_i64() == Some(first as i64) {
            assert_eq!(attachments.len(), 1);
            assert_eq!(attachments[0]["file_name"], "notes.txt");
            assert_eq!(attachments[0]["post_id"].as_i64(), Some(first as i64));
        } else {
            assert!(
                attachments.is_empty(),
                "attachment grouped under the wrong post"
            );
        }
    }
}

#[tokio::test]
#[ignore]
async fn toggle_pin_and_lock_are_involutions() {
    let state = live_state().await;
    create_schema(&state).await;
    let author = seed_user(&state, "mod", 50).await;
    let category = seed_category(&state, "meta").await;
    let topic_id = create_topic(&state, author, category, "sticky").await;

    let initial = topic_flags(&state, topic_id as i32).await;

    for action in ["toggle_pin", "toggle_lock"] {
        for _ in 0..2 {
            let body =
                serde_json::json!({ "action": action, "topic_id": topic_id });
            let (status, _) =
                dispatch(&state, body_event("PUT", Some(&body.to_string()))).await;
            assert_eq!(status, 200);
        }
    }

    assert_eq!(topic_flags(&state, topic_id as i32).await, initial);
}

#[tokio::test]
#[ignore]
async fn topic_listing_puts_pinned_topics_first() {
    let state = live_state().await;
    create_schema(&state).await;
    let author = seed_user(&state, "lister", 7).await;
    let category = seed_category(&state, "discussions").await;

    let _plain = create_topic(&state, author, category, "ordinary").await;
    let pinned = create_topic(&state, author, category, "important").await;

    let body = serde_json::json!({ "action": "toggle_pin", "topic_id": pinned });
    let (status, _) =
        dispatch(&state, body_event("PUT", Some(&body.to_string()))).await;
    assert_eq!(status, 200);

    let (status, response) = dispatch(&state, get_event(&[("action", "topics")])).await;
    assert_eq!(status, 200);

    let topics = response["topics"].as_array().unwrap();
    assert!(topics.len() >= 2);
    let mut seen_unpinned = false;
    for topic in topics {
        let is_pinned = topic["is_pinned"].as_bool().unwrap();
        if !is_pinned {
            seen_unpinned = true;
        }
        assert!(
            !(is_pinned && seen_unpinned),
            "pinned topic appeared after an unpinned one"
        );
    }
}

#[tokio::test]
#[ignore]
async fn missing_topic_is_a_404() {
    let state = live_state().await;
    create_schema(&state).await;

    let (status, body) = dispatch(
        &state,
        get_event(&[("action", "topic"), ("id", "2147483646")]),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "Topic not found");
}
