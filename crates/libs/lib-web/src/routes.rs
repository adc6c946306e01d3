//! # Route Table
//!
//! Every browser-facing route lives under `/api`.

use crate::handlers;
use crate::server::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/conversations",
            post(handlers::conversations::create_conversation)
                .get(handlers::conversations::list_conversations),
        )
        .route(
            "/conversations/{id}",
            get(handlers::conversations::get_history)
                .patch(handlers::conversations::rename_conversation)
                .delete(handlers::conversations::delete_conversation),
        )
        .route("/messages", post(handlers::messages::create_message))
        .route("/chat", post(handlers::chat::chat))
        .route("/title", post(handlers::title::generate_title))
        .route("/hospitals", post(handlers::hospitals::find_hospitals))
}
