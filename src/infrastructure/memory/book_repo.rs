//! In-Memory Book Repository Implementation

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::collections::HashMap;

use crate::application::ports::{
    AuthorCount, BookRecord, BookRepositoryPort, BookSearch, RepositoryError, SellOutcome,
    TitleSales,
};
use crate::domain::book::{BookDetails, BookId, Stock, MAX_COUNT};

/// 内存图书仓储
///
/// 单条记录的读改写在 DashMap 分片锁内完成
pub struct InMemoryBookRepository {
    books: DashMap<BookId, BookRecord>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
        }
    }

    fn snapshot(&self) -> Vec<BookRecord> {
        self.books.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// 按聚合值降序取前 limit 个，值相同时按 key 升序
fn top_n(groups: HashMap<String, i64>, limit: usize) -> Vec<(String, i64)> {
    let mut groups: Vec<(String, i64)> = groups.into_iter().collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    groups.truncate(limit);
    groups
}

#[async_trait]
impl BookRepositoryPort for InMemoryBookRepository {
    async fn insert(&self, book: &BookRecord) -> Result<(), RepositoryError> {
        self.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookRecord>, RepositoryError> {
        Ok(self.books.get(&id).map(|b| b.clone()))
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError> {
        let mut books = self.snapshot();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(books)
    }

    async fn replace(
        &self,
        id: BookId,
        details: &BookDetails,
    ) -> Result<Option<BookRecord>, RepositoryError> {
        Ok(self.books.get_mut(&id).map(|mut book| {
            book.apply(details);
            book.clone()
        }))
    }

    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        Ok(self.books.remove(&id).is_some())
    }

    async fn search(&self, criteria: &BookSearch) -> Result<Vec<BookRecord>, RepositoryError> {
        let mut books: Vec<BookRecord> = self
            .books
            .iter()
            .filter(|entry| criteria.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(books)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.books.len() as u64)
    }

    async fn top_titles_by_sales(&self, limit: usize) -> Result<Vec<TitleSales>, RepositoryError> {
        let mut groups: HashMap<String, i64> = HashMap::new();
        for entry in self.books.iter() {
            let sales = groups.entry(entry.title.clone()).or_default();
            *sales = sales.saturating_add(entry.items_sold);
        }

        Ok(top_n(groups, limit)
            .into_iter()
            .map(|(title, sales)| TitleSales { title, sales })
            .collect())
    }

    async fn top_authors_by_count(
        &self,
        limit: usize,
    ) -> Result<Vec<AuthorCount>, RepositoryError> {
        let mut groups: HashMap<String, i64> = HashMap::new();
        for entry in self.books.iter() {
            *groups.entry(entry.author.clone()).or_default() += 1;
        }

        Ok(top_n(groups, limit)
            .into_iter()
            .map(|(author, count)| AuthorCount { author, count })
            .collect())
    }

    async fn sell_one(&self, id: BookId) -> Result<SellOutcome, RepositoryError> {
        let Some(mut book) = self.books.get_mut(&id) else {
            return Ok(SellOutcome::NotFound);
        };

        if book.stock <= 0 {
            return Ok(SellOutcome::OutOfStock);
        }

        let Some(items_sold) = book
            .items_sold
            .checked_add(1)
            .filter(|sold| *sold <= MAX_COUNT)
        else {
            return Ok(SellOutcome::SalesLimitReached);
        };

        book.stock -= 1;
        book.items_sold = items_sold;
        book.updated_at = Utc::now();
        Ok(SellOutcome::Sold(book.clone()))
    }

    async fn set_stock(
        &self,
        id: BookId,
        stock: Stock,
    ) -> Result<Option<BookRecord>, RepositoryError> {
        Ok(self.books.get_mut(&id).map(|mut book| {
            book.stock = stock.value();
            book.updated_at = Utc::now();
            book.clone()
        }))
    }
}
