//! Aggregate Query Handlers - 总数、畅销书、热门作者

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AuthorCount, BookRepositoryPort, TitleSales};
use crate::application::queries::{CountBooks, TopAuthors, TopBooks};

/// 排行榜条目数
pub const TOP_LIMIT: usize = 5;

/// CountBooks Handler
pub struct CountBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl CountBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, _query: CountBooks) -> Result<u64, ApplicationError> {
        Ok(self.book_repo.count().await?)
    }
}

/// TopBooks Handler
///
/// 按标题分组汇总 items_sold，同名的不同记录会被合并
pub struct TopBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl TopBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, _query: TopBooks) -> Result<Vec<TitleSales>, ApplicationError> {
        Ok(self.book_repo.top_titles_by_sales(TOP_LIMIT).await?)
    }
}

/// TopAuthors Handler
pub struct TopAuthorsHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl TopAuthorsHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, _query: TopAuthors) -> Result<Vec<AuthorCount>, ApplicationError> {
        Ok(self.book_repo.top_authors_by_count(TOP_LIMIT).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::BookRecord;
    use crate::domain::book::BookDetails;
    use crate::infrastructure::memory::InMemoryBookRepository;

    async fn seeded() -> Arc<dyn BookRepositoryPort> {
        let repo: Arc<dyn BookRepositoryPort> = Arc::new(InMemoryBookRepository::new());
        let books = [
            ("A", "Ann", 1),
            ("B", "Ann", 7),
            ("C", "Ann", 3),
            ("D", "Bob", 9),
            ("E", "Bob", 2),
            ("F", "Cat", 4),
            ("G", "Dan", 5),
            ("H", "Eve", 6),
            ("I", "Fay", 8),
            // 同名记录的销量会被合并
            ("A", "Gus", 20),
        ];
        for (title, author, sold) in books {
            let details = BookDetails::new(title, author, "", 1.0, 10, sold).unwrap();
            repo.insert(&BookRecord::new(&details)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_count_books() {
        let handler = CountBooksHandler::new(seeded().await);
        assert_eq!(handler.handle(CountBooks).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_top_books_limited_and_sorted() {
        let handler = TopBooksHandler::new(seeded().await);
        let top = handler.handle(TopBooks).await.unwrap();

        assert_eq!(top.len(), TOP_LIMIT);
        assert_eq!(
            top[0],
            TitleSales {
                title: "A".to_string(),
                sales: 21
            }
        );
        assert!(top.windows(2).all(|w| w[0].sales >= w[1].sales));
        let titles: Vec<_> = top.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "D", "I", "B", "H"]);
    }

    #[tokio::test]
    async fn test_top_authors_limited_and_sorted() {
        let handler = TopAuthorsHandler::new(seeded().await);
        let top = handler.handle(TopAuthors).await.unwrap();

        assert_eq!(top.len(), TOP_LIMIT);
        assert_eq!(top[0].author, "Ann");
        assert_eq!(top[0].count, 3);
        assert_eq!(top[1].author, "Bob");
        assert_eq!(top[1].count, 2);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[tokio::test]
    async fn test_top_on_empty_store() {
        let repo: Arc<dyn BookRepositoryPort> = Arc::new(InMemoryBookRepository::new());
        assert!(TopBooksHandler::new(repo.clone())
            .handle(TopBooks)
            .await
            .unwrap()
            .is_empty());
        assert!(TopAuthorsHandler::new(repo)
            .handle(TopAuthors)
            .await
            .unwrap()
            .is_empty());
    }
}
