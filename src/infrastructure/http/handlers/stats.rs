//! Aggregate HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{CountBooks, TopAuthors, TopBooks};
use crate::infrastructure::http::dto::{TopAuthorResponse, TopBookResponse, TotalBooksResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn total_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TotalBooksResponse>, ApiError> {
    let total_books = state.count_books_handler.handle(CountBooks).await?;
    Ok(Json(TotalBooksResponse { total_books }))
}

/// 按标题汇总销量，取前 5
pub async fn top_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TopBookResponse>>, ApiError> {
    let top = state.top_books_handler.handle(TopBooks).await?;
    Ok(Json(top.into_iter().map(TopBookResponse::from).collect()))
}

/// 按作者统计图书数量，取前 5
pub async fn top_authors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TopAuthorResponse>>, ApiError> {
    let top = state.top_authors_handler.handle(TopAuthors).await?;
    Ok(Json(top.into_iter().map(TopAuthorResponse::from).collect()))
}
