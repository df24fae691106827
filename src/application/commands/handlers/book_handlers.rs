//! Book Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateBook, DeleteBook, ReplaceBook, SellBook, SetStock};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRecord, BookRepositoryPort, SellOutcome};
use crate::domain::book::{BookDetails, Stock, MAX_COUNT};

// ============================================================================
// CreateBook
// ============================================================================

/// CreateBook Handler
pub struct CreateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl CreateBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: CreateBook) -> Result<BookRecord, ApplicationError> {
        let details = BookDetails::new(
            &command.title,
            &command.author,
            &command.description,
            command.price,
            command.stock,
            command.items_sold,
        )?;

        let book = BookRecord::new(&details);
        self.book_repo.insert(&book).await?;

        tracing::info!(
            book_id = %book.id,
            title = %book.title,
            author = %book.author,
            "Book created"
        );

        Ok(book)
    }
}

// ============================================================================
// ReplaceBook
// ============================================================================

/// ReplaceBook Handler
pub struct ReplaceBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ReplaceBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: ReplaceBook) -> Result<BookRecord, ApplicationError> {
        let details = BookDetails::new(
            &command.title,
            &command.author,
            &command.description,
            command.price,
            command.stock,
            command.items_sold,
        )?;

        let book = self
            .book_repo
            .replace(command.book_id, &details)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.book_id))?;

        tracing::info!(book_id = %book.id, title = %book.title, "Book replaced");

        Ok(book)
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        if !self.book_repo.delete(command.book_id).await? {
            return Err(ApplicationError::not_found("Book", command.book_id));
        }

        tracing::info!(book_id = %command.book_id, "Book deleted");

        Ok(())
    }
}

// ============================================================================
// SellBook
// ============================================================================

/// SellBook Handler
///
/// 库存扣减在存储层单条语句内完成，并发售出不会丢失更新，也不会超卖
pub struct SellBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl SellBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: SellBook) -> Result<BookRecord, ApplicationError> {
        match self.book_repo.sell_one(command.book_id).await? {
            SellOutcome::Sold(book) => {
                tracing::info!(
                    book_id = %book.id,
                    stock = book.stock,
                    items_sold = book.items_sold,
                    "Book sold"
                );
                Ok(book)
            }
            SellOutcome::OutOfStock => {
                tracing::warn!(book_id = %command.book_id, "Sell rejected: out of stock");
                Err(ApplicationError::conflict(format!(
                    "Book {} is out of stock",
                    command.book_id
                )))
            }
            SellOutcome::SalesLimitReached => {
                tracing::warn!(book_id = %command.book_id, "Sell rejected: items_sold at maximum");
                Err(ApplicationError::conflict(format!(
                    "Book {} has reached the maximum items_sold of {}",
                    command.book_id, MAX_COUNT
                )))
            }
            SellOutcome::NotFound => Err(ApplicationError::not_found("Book", command.book_id)),
        }
    }
}

// ============================================================================
// SetStock
// ============================================================================

/// SetStock Handler
pub struct SetStockHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl SetStockHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: SetStock) -> Result<BookRecord, ApplicationError> {
        let stock = Stock::new(command.new_stock)?;

        let book = self
            .book_repo
            .set_stock(command.book_id, stock)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.book_id))?;

        tracing::info!(book_id = %book.id, stock = book.stock, "Book stock updated");

        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::BookId;
    use crate::infrastructure::memory::InMemoryBookRepository;

    fn repo() -> Arc<dyn BookRepositoryPort> {
        Arc::new(InMemoryBookRepository::new())
    }

    fn create_command(stock: i64) -> CreateBook {
        CreateBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: "Desert planet".to_string(),
            price: 12.5,
            stock,
            items_sold: 0,
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = repo();
        let created = CreateBookHandler::new(repo.clone())
            .handle(create_command(3))
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let mut command = create_command(3);
        command.price = -1.0;

        let result = CreateBookHandler::new(repo()).handle(command).await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_replace_unknown_book() {
        let command = ReplaceBook {
            book_id: BookId::new(),
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            description: String::new(),
            price: 4.0,
            stock: 1,
            items_sold: 0,
        };

        let result = ReplaceBookHandler::new(repo()).handle(command).await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_replace_with_identical_content_succeeds() {
        let repo = repo();
        let created = CreateBookHandler::new(repo.clone())
            .handle(create_command(3))
            .await
            .unwrap();

        let command = ReplaceBook {
            book_id: created.id,
            title: created.title.clone(),
            author: created.author.clone(),
            description: created.description.clone(),
            price: created.price,
            stock: created.stock,
            items_sold: created.items_sold,
        };

        let replaced = ReplaceBookHandler::new(repo).handle(command).await.unwrap();
        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.title, created.title);
        assert_eq!(replaced.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = repo();
        let created = CreateBookHandler::new(repo.clone())
            .handle(create_command(1))
            .await
            .unwrap();
        let handler = DeleteBookHandler::new(repo.clone());

        handler
            .handle(DeleteBook { book_id: created.id })
            .await
            .unwrap();
        let second = handler.handle(DeleteBook { book_id: created.id }).await;

        assert!(matches!(second, Err(ApplicationError::NotFound { .. })));
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sell_until_out_of_stock() {
        let repo = repo();
        let created = CreateBookHandler::new(repo.clone())
            .handle(create_command(3))
            .await
            .unwrap();
        let handler = SellBookHandler::new(repo.clone());

        let first = handler
            .handle(SellBook { book_id: created.id })
            .await
            .unwrap();
        assert_eq!(first.stock, 2);
        assert_eq!(first.items_sold, 1);

        for _ in 0..2 {
            handler
                .handle(SellBook { book_id: created.id })
                .await
                .unwrap();
        }

        let result = handler.handle(SellBook { book_id: created.id }).await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));

        let book = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(book.stock, 0);
        assert_eq!(book.items_sold, 3);
    }

    #[tokio::test]
    async fn test_sell_at_sales_limit_is_conflict() {
        let repo = repo();
        let mut command = create_command(2);
        command.items_sold = MAX_COUNT;
        let created = CreateBookHandler::new(repo.clone())
            .handle(command)
            .await
            .unwrap();

        let result = SellBookHandler::new(repo.clone())
            .handle(SellBook { book_id: created.id })
            .await;
        assert!(matches!(result, Err(ApplicationError::Conflict(_))));

        let book = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(book.stock, 2);
        assert_eq!(book.items_sold, MAX_COUNT);
    }

    #[tokio::test]
    async fn test_create_rejects_counts_above_limit() {
        let mut command = create_command(1);
        command.items_sold = i64::MAX;

        let result = CreateBookHandler::new(repo()).handle(command).await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_sell_unknown_book() {
        let result = SellBookHandler::new(repo())
            .handle(SellBook {
                book_id: BookId::new(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_set_stock() {
        let repo = repo();
        let created = CreateBookHandler::new(repo.clone())
            .handle(create_command(3))
            .await
            .unwrap();
        let handler = SetStockHandler::new(repo.clone());

        let updated = handler
            .handle(SetStock {
                book_id: created.id,
                new_stock: 42,
            })
            .await
            .unwrap();
        assert_eq!(updated.stock, 42);
        assert_eq!(repo.find_by_id(created.id).await.unwrap().unwrap().stock, 42);

        let negative = handler
            .handle(SetStock {
                book_id: created.id,
                new_stock: -1,
            })
            .await;
        assert!(matches!(negative, Err(ApplicationError::ValidationError(_))));

        let missing = handler
            .handle(SetStock {
                book_id: BookId::new(),
                new_stock: 1,
            })
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound { .. })));
    }
}
