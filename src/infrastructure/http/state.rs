//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateBookHandler, DeleteBookHandler, ReplaceBookHandler, SellBookHandler, SetStockHandler,
    // Query handlers
    CountBooksHandler, GetBookHandler, ListBooksHandler, SearchBooksHandler, TopAuthorsHandler,
    TopBooksHandler,
    // Ports
    BookRepositoryPort,
};

/// 应用状态
///
/// 所有 handler 共享同一个仓储实例（进程级连接池）
pub struct AppState {
    // ========== Command Handlers ==========
    pub create_book_handler: CreateBookHandler,
    pub replace_book_handler: ReplaceBookHandler,
    pub delete_book_handler: DeleteBookHandler,
    pub sell_book_handler: SellBookHandler,
    pub set_stock_handler: SetStockHandler,

    // ========== Query Handlers ==========
    pub get_book_handler: GetBookHandler,
    pub list_books_handler: ListBooksHandler,
    pub search_books_handler: SearchBooksHandler,
    pub count_books_handler: CountBooksHandler,
    pub top_books_handler: TopBooksHandler,
    pub top_authors_handler: TopAuthorsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self {
            // Command handlers
            create_book_handler: CreateBookHandler::new(book_repo.clone()),
            replace_book_handler: ReplaceBookHandler::new(book_repo.clone()),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone()),
            sell_book_handler: SellBookHandler::new(book_repo.clone()),
            set_stock_handler: SetStockHandler::new(book_repo.clone()),

            // Query handlers
            get_book_handler: GetBookHandler::new(book_repo.clone()),
            list_books_handler: ListBooksHandler::new(book_repo.clone()),
            search_books_handler: SearchBooksHandler::new(book_repo.clone()),
            count_books_handler: CountBooksHandler::new(book_repo.clone()),
            top_books_handler: TopBooksHandler::new(book_repo.clone()),
            top_authors_handler: TopAuthorsHandler::new(book_repo),
        }
    }
}
