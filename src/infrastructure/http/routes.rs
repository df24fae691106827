//! HTTP Routes
//!
//! API Endpoints:
//! - /books                 GET   列出所有图书
//! - /books                 POST  创建图书
//! - /books/:id             GET   获取图书
//! - /books/:id             PUT   整体替换图书
//! - /books/:id             DELETE 删除图书
//! - /books/:id/sell        PUT   售出一本
//! - /books/:id/stock       PUT   设置库存 (?new_stock=N)
//! - /search                GET   条件搜索 (title, author, min_price, max_price)
//! - /total_books           GET   图书总数
//! - /top_books             GET   销量前 5
//! - /top_authors           GET   图书最多的 5 位作者
//! - /ping                  GET   存活探针

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(book_routes())
        .route("/search", get(handlers::search_books))
        .route("/total_books", get(handlers::total_books))
        .route("/top_books", get(handlers::top_books))
        .route("/top_authors", get(handlers::top_authors))
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(handlers::list_books).post(handlers::create_book))
        .route(
            "/books/:id",
            get(handlers::get_book)
                .put(handlers::replace_book)
                .delete(handlers::delete_book),
        )
        .route("/books/:id/sell", put(handlers::sell_book))
        .route("/books/:id/stock", put(handlers::set_stock))
}
