//! Book HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    CreateBook, DeleteBook, GetBook, ListBooks, ReplaceBook, SearchBooks, SellBook, SetStock,
};
use crate::domain::book::BookId;
use crate::infrastructure::http::dto::{
    BookPayload, BookResponse, SearchParams, StockParams, SuccessResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

fn parse_book_id(raw: &str) -> Result<BookId, ApiError> {
    Ok(raw.parse::<BookId>()?)
}

/// 列出所有图书
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = state.list_books_handler.handle(ListBooks).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// 获取单本图书
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = parse_book_id(&id)?;
    let book = state.get_book_handler.handle(GetBook { book_id }).await?;
    Ok(Json(book.into()))
}

/// 创建图书
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let Json(payload) = payload?;

    let command = CreateBook {
        title: payload.title,
        author: payload.author,
        description: payload.description,
        price: payload.price,
        stock: payload.stock,
        items_sold: payload.items_sold,
    };

    let book = state.create_book_handler.handle(command).await?;
    Ok(Json(book.into()))
}

/// 整体替换图书
pub async fn replace_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = parse_book_id(&id)?;
    let Json(payload) = payload?;

    let command = ReplaceBook {
        book_id,
        title: payload.title,
        author: payload.author,
        description: payload.description,
        price: payload.price,
        stock: payload.stock,
        items_sold: payload.items_sold,
    };

    let book = state.replace_book_handler.handle(command).await?;
    Ok(Json(book.into()))
}

/// 删除图书
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let book_id = parse_book_id(&id)?;
    state
        .delete_book_handler
        .handle(DeleteBook { book_id })
        .await?;

    Ok(Json(SuccessResponse::new("Book deleted")))
}

/// 条件搜索
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let Query(params) = params?;

    let query = SearchBooks {
        title: params.title,
        author: params.author,
        min_price: params.min_price,
        max_price: params.max_price,
    };

    let books = state.search_books_handler.handle(query).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// 售出一本
pub async fn sell_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let book_id = parse_book_id(&id)?;
    state.sell_book_handler.handle(SellBook { book_id }).await?;
    Ok(Json(SuccessResponse::new("Book sold")))
}

/// 设置库存 `?new_stock=N`
pub async fn set_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    params: Result<Query<StockParams>, QueryRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let book_id = parse_book_id(&id)?;
    let Query(params) = params?;

    let book = state
        .set_stock_handler
        .handle(SetStock {
            book_id,
            new_stock: params.new_stock,
        })
        .await?;

    Ok(Json(book.into()))
}
