//! Book Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRecord, BookRepositoryPort, BookSearch, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE,
};
use crate::application::queries::{GetBook, ListBooks, SearchBooks};

/// GetBook Handler
pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, query: GetBook) -> Result<BookRecord, ApplicationError> {
        self.book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))
    }
}

/// ListBooks Handler
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookRecord>, ApplicationError> {
        Ok(self.book_repo.find_all().await?)
    }
}

/// SearchBooks Handler
pub struct SearchBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl SearchBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, query: SearchBooks) -> Result<Vec<BookRecord>, ApplicationError> {
        let criteria = BookSearch {
            title: query.title,
            author: query.author,
            min_price: query.min_price.unwrap_or(DEFAULT_MIN_PRICE),
            max_price: query.max_price.unwrap_or(DEFAULT_MAX_PRICE),
        };

        if !criteria.min_price.is_finite() || !criteria.max_price.is_finite() {
            return Err(ApplicationError::validation("Price bounds must be finite numbers"));
        }

        // 区间为空时无需访问存储
        if criteria.min_price > criteria.max_price {
            return Ok(Vec::new());
        }

        let books = self.book_repo.search(&criteria).await?;

        tracing::debug!(
            title = ?criteria.title_filter(),
            author = ?criteria.author_filter(),
            min_price = criteria.min_price,
            max_price = criteria.max_price,
            matches = books.len(),
            "Book search"
        );

        Ok(books)
    }
}
