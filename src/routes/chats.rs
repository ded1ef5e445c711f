use actix_web::{delete, get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::databases::chats::{self, Message};
use crate::errors::ApiError;
use crate::validation;

#[derive(Deserialize)]
pub struct ChatCreate {
    pub title: String,
}

#[derive(Deserialize)]
pub struct MessageCreate {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ChatQuery {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct ChatWithMessages {
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

#[post("/chats/")]
pub async fn create_chat(
    pool: web::Data<PgPool>,
    payload: web::Json<ChatCreate>,
) -> Result<HttpResponse, ApiError> {
    let title = validation::chat_title(&payload.title)?;
    let chat = chats::create_chat(pool.get_ref(), &title).await?;
    info!("created chat {}", chat.id);
    Ok(HttpResponse::Created().json(chat))
}

#[post("/chats/{chat_id}/messages/")]
pub async fn create_message(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
    payload: web::Json<MessageCreate>,
) -> Result<HttpResponse, ApiError> {
    let chat_id = path.into_inner();

    // Unknown chat wins over an invalid payload.
    if chats::get_chat(pool.get_ref(), chat_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("chat {} not found", chat_id)));
    }

    let text = validation::message_text(&payload.text)?;
    let message = chats::create_message(pool.get_ref(), chat_id, &text).await?;
    info!("created message {} in chat {}", message.id, chat_id);
    Ok(HttpResponse::Created().json(message))
}

#[get("/chats/{chat_id}")]
pub async fn get_chat(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
    query: web::Query<ChatQuery>,
) -> Result<HttpResponse, ApiError> {
    let chat_id = path.into_inner();
    let limit = validation::message_limit(query.limit)?;

    let chat = chats::get_chat(pool.get_ref(), chat_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("chat {} not found", chat_id)))?;

    let messages = chats::recent_messages(pool.get_ref(), chat_id, limit).await?;
    info!("fetched {} messages in chat {}", messages.len(), chat_id);

    Ok(HttpResponse::Ok().json(ChatWithMessages {
        id: chat.id,
        title: chat.title,
        created_at: chat.created_at,
        messages,
    }))
}

#[delete("/chats/{chat_id}")]
pub async fn delete_chat(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let chat_id = path.into_inner();

    if !chats::delete_chat(pool.get_ref(), chat_id).await? {
        return Err(ApiError::NotFound(format!("chat {} not found", chat_id)));
    }

    info!("deleted chat {}", chat_id);
    Ok(HttpResponse::NoContent().finish())
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(create_chat);
    cfg.service(create_message);
    cfg.service(get_chat);
    cfg.service(delete_chat);
}
