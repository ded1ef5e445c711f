use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Chat {
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Message {
    pub id: i32,
    pub chat_id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a chat. The caller has already validated the title.
pub async fn create_chat(pool: &PgPool, title: &str) -> sqlx::Result<Chat> {
    sqlx::query_as::<_, Chat>(
        "INSERT INTO chat (title) VALUES ($1) RETURNING id, title, created_at",
    )
    .bind(title)
    .fetch_one(pool)
    .await
}

pub async fn get_chat(pool: &PgPool, chat_id: i32) -> sqlx::Result<Option<Chat>> {
    sqlx::query_as::<_, Chat>("SELECT id, title, created_at FROM chat WHERE id = $1")
        .bind(chat_id)
        .fetch_optional(pool)
        .await
}

/// Insert a message into an existing chat. The caller has already checked
/// the chat exists and validated the text.
pub async fn create_message(pool: &PgPool, chat_id: i32, text: &str) -> sqlx::Result<Message> {
    sqlx::query_as::<_, Message>(
        "INSERT INTO message (chat_id, text) VALUES ($1, $2)
         RETURNING id, chat_id, text, created_at",
    )
    .bind(chat_id)
    .bind(text)
    .fetch_one(pool)
    .await
}

/// The `limit` most recent messages of a chat, returned in ascending
/// creation order. Insertion order breaks created_at ties.
pub async fn recent_messages(
    pool: &PgPool,
    chat_id: i32,
    limit: i64,
) -> sqlx::Result<Vec<Message>> {
    let mut messages = sqlx::query_as::<_, Message>(
        "SELECT id, chat_id, text, created_at FROM message
         WHERE chat_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2",
    )
    .bind(chat_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    messages.reverse();
    Ok(messages)
}

/// Delete a chat; its messages go with it via the cascade. Returns false
/// when no such chat existed.
pub async fn delete_chat(pool: &PgPool, chat_id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM chat WHERE id = $1")
        .bind(chat_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
