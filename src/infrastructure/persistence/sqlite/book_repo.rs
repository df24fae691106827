//! SQLite Book Repository

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{
    AuthorCount, BookRecord, BookRepositoryPort, BookSearch, RepositoryError, SellOutcome,
    TitleSales,
};
use crate::domain::book::{BookDetails, BookId, Stock, MAX_COUNT};

const BOOK_COLUMNS: &str =
    "id, title, author, description, price, stock, items_sold, created_at, updated_at";

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    title: String,
    author: String,
    description: String,
    price: f64,
    stock: i64,
    items_sold: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BookRow> for BookRecord {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(BookRecord {
            id: row
                .id
                .parse::<BookId>()
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            title: row.title,
            author: row.author,
            description: row.description,
            price: row.price,
            stock: row.stock,
            items_sold: row.items_sold,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct TitleSalesRow {
    title: String,
    sales: i64,
}

#[derive(FromRow)]
struct AuthorCountRow {
    author: String,
    count: i64,
}

/// 固定宽度的 RFC 3339 时间戳，字符串顺序即时间顺序
fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn insert(&self, book: &BookRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, description, price, stock, items_sold, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book.id.to_string())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.price)
        .bind(book.stock)
        .bind(book.items_sold)
        .bind(format_timestamp(book.created_at))
        .bind(format_timestamp(book.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(&format!(
            "SELECT {} FROM books ORDER BY created_at DESC",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(BookRecord::try_from).collect()
    }

    async fn replace(
        &self,
        id: BookId,
        details: &BookDetails,
    ) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(&format!(
            r#"
            UPDATE books
            SET title = ?, author = ?, description = ?, price = ?, stock = ?, items_sold = ?, updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(details.title())
        .bind(details.author())
        .bind(details.description())
        .bind(details.price().value())
        .bind(details.stock().value())
        .bind(details.items_sold())
        .bind(format_timestamp(Utc::now()))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(BookRecord::try_from).transpose()
    }

    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn search(&self, criteria: &BookSearch) -> Result<Vec<BookRecord>, RepositoryError> {
        // 价格区间在 SQL 中过滤；SQLite 的 LIKE 只折叠 ASCII 大小写，
        // 标题 / 作者子串匹配交给 BookSearch::matches 完成
        let rows: Vec<BookRow> = sqlx::query_as(&format!(
            "SELECT {} FROM books WHERE price >= ? AND price <= ? ORDER BY created_at DESC",
            BOOK_COLUMNS
        ))
        .bind(criteria.min_price)
        .bind(criteria.max_price)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            let book = BookRecord::try_from(row)?;
            if criteria.matches(&book) {
                books.push(book);
            }
        }
        Ok(books)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }

    async fn top_titles_by_sales(&self, limit: usize) -> Result<Vec<TitleSales>, RepositoryError> {
        let rows: Vec<TitleSalesRow> = sqlx::query_as(
            r#"
            SELECT title, SUM(items_sold) AS sales
            FROM books
            GROUP BY title
            ORDER BY sales DESC, title ASC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| TitleSales {
                title: row.title,
                sales: row.sales,
            })
            .collect())
    }

    async fn top_authors_by_count(
        &self,
        limit: usize,
    ) -> Result<Vec<AuthorCount>, RepositoryError> {
        let rows: Vec<AuthorCountRow> = sqlx::query_as(
            r#"
            SELECT author, COUNT(*) AS count
            FROM books
            GROUP BY author
            ORDER BY count DESC, author ASC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| AuthorCount {
                author: row.author,
                count: row.count,
            })
            .collect())
    }

    async fn sell_one(&self, id: BookId) -> Result<SellOutcome, RepositoryError> {
        // 单条语句完成检查与扣减，并发售出不会丢失更新
        // items_sold 上限保证 +1 不会溢出为 REAL
        let row: Option<BookRow> = sqlx::query_as(&format!(
            r#"
            UPDATE books
            SET stock = stock - 1, items_sold = items_sold + 1, updated_at = ?
            WHERE id = ? AND stock > 0 AND items_sold < ?
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(format_timestamp(Utc::now()))
        .bind(id.to_string())
        .bind(MAX_COUNT)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        if let Some(row) = row {
            return Ok(SellOutcome::Sold(BookRecord::try_from(row)?));
        }

        let current: Option<(i64, i64)> =
            sqlx::query_as("SELECT stock, items_sold FROM books WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(match current {
            None => SellOutcome::NotFound,
            Some((stock, _)) if stock <= 0 => SellOutcome::OutOfStock,
            Some(_) => SellOutcome::SalesLimitReached,
        })
    }

    async fn set_stock(
        &self,
        id: BookId,
        stock: Stock,
    ) -> Result<Option<BookRecord>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(&format!(
            "UPDATE books SET stock = ?, updated_at = ? WHERE id = ? RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(stock.value())
        .bind(format_timestamp(Utc::now()))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(BookRecord::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteBookRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteBookRepository::new(pool)
    }

    async fn insert(
        repo: &SqliteBookRepository,
        title: &str,
        author: &str,
        price: f64,
        stock: i64,
        items_sold: i64,
    ) -> BookRecord {
        let details = BookDetails::new(title, author, "desc", price, stock, items_sold).unwrap();
        let book = BookRecord::new(&details);
        repo.insert(&book).await.unwrap();
        book
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo().await;
        let book = insert(&repo, "Dune", "Frank Herbert", 12.5, 3, 0).await;

        let found = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(found.id, book.id);
        assert_eq!(found.title, "Dune");
        assert_eq!(found.author, "Frank Herbert");
        assert_eq!(found.description, "desc");
        assert_eq!(found.price, 12.5);
        assert_eq!(found.stock, 3);
        assert_eq!(found.items_sold, 0);

        assert!(repo.find_by_id(BookId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_and_delete() {
        let repo = repo().await;
        let book = insert(&repo, "Dune", "Frank Herbert", 12.5, 3, 0).await;
        let details = BookDetails::new("Dune Messiah", "Frank Herbert", "", 14.0, 5, 1).unwrap();

        let replaced = repo.replace(book.id, &details).await.unwrap().unwrap();
        assert_eq!(replaced.title, "Dune Messiah");
        assert_eq!(replaced.stock, 5);
        assert_eq!(replaced.created_at, book.created_at);

        // 内容不变时替换仍然成功
        assert!(repo.replace(book.id, &details).await.unwrap().is_some());
        assert!(repo.replace(BookId::new(), &details).await.unwrap().is_none());

        assert!(repo.delete(book.id).await.unwrap());
        assert!(!repo.delete(book.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search() {
        let repo = repo().await;
        insert(&repo, "Dune", "Frank Herbert", 15.0, 1, 0).await;
        insert(&repo, "Emma", "Jane Austen", 8.0, 1, 0).await;
        insert(&repo, "Persuasion", "Jane Austen", 20.0, 1, 0).await;
        insert(&repo, "100% Rust", "Ferris", 10.0, 1, 0).await;

        let in_range = repo
            .search(&BookSearch {
                min_price: 10.0,
                max_price: 20.0,
                ..BookSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(in_range.len(), 3);
        assert!(in_range.iter().all(|b| (10.0..=20.0).contains(&b.price)));

        let by_author = repo
            .search(&BookSearch {
                author: Some("AUSTEN".to_string()),
                ..BookSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);

        let literal = repo
            .search(&BookSearch {
                title: Some("0%".to_string()),
                ..BookSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(literal.len(), 1);
        assert_eq!(literal[0].title, "100% Rust");

        let combined = repo
            .search(&BookSearch {
                title: Some("su".to_string()),
                author: Some("jane".to_string()),
                min_price: 0.0,
                max_price: 10.0,
            })
            .await
            .unwrap();
        assert!(combined.is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let repo = repo().await;
        insert(&repo, "Émile", "Jean-Jacques Rousseau", 9.0, 1, 0).await;
        insert(&repo, "Straße", "Ödön von Horváth", 9.0, 1, 0).await;

        let by_title = repo
            .search(&BookSearch {
                title: Some("émile".to_string()),
                ..BookSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Émile");

        let by_author = repo
            .search(&BookSearch {
                author: Some("ÖDÖN".to_string()),
                ..BookSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "Straße");
    }

    #[tokio::test]
    async fn test_aggregates() {
        let repo = repo().await;
        insert(&repo, "Dune", "Frank Herbert", 1.0, 1, 4).await;
        insert(&repo, "Dune", "Other", 1.0, 1, 6).await;
        insert(&repo, "Emma", "Jane Austen", 1.0, 1, 7).await;
        insert(&repo, "Persuasion", "Jane Austen", 1.0, 1, 1).await;

        assert_eq!(repo.count().await.unwrap(), 4);

        let top = repo.top_titles_by_sales(5).await.unwrap();
        assert_eq!(
            top,
            vec![
                TitleSales {
                    title: "Dune".to_string(),
                    sales: 10
                },
                TitleSales {
                    title: "Emma".to_string(),
                    sales: 7
                },
                TitleSales {
                    title: "Persuasion".to_string(),
                    sales: 1
                },
            ]
        );

        let authors = repo.top_authors_by_count(2).await.unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(
            authors[0],
            AuthorCount {
                author: "Jane Austen".to_string(),
                count: 2
            }
        );
    }

    #[tokio::test]
    async fn test_sell_one() {
        let repo = repo().await;
        let book = insert(&repo, "Dune", "Frank Herbert", 1.0, 3, 0).await;

        for expected_stock in [2, 1, 0] {
            match repo.sell_one(book.id).await.unwrap() {
                SellOutcome::Sold(sold) => {
                    assert_eq!(sold.stock, expected_stock);
                    assert_eq!(sold.items_sold, 3 - expected_stock);
                }
                other => panic!("unexpected outcome: {:?}", other),
            }
        }

        assert_eq!(repo.sell_one(book.id).await.unwrap(), SellOutcome::OutOfStock);
        assert_eq!(repo.sell_one(BookId::new()).await.unwrap(), SellOutcome::NotFound);

        let stored = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 0);
        assert_eq!(stored.items_sold, 3);
    }

    #[tokio::test]
    async fn test_sell_at_sales_limit_keeps_catalog_readable() {
        let repo = repo().await;
        let book = insert(&repo, "Dune", "Frank Herbert", 1.0, 2, MAX_COUNT).await;

        assert_eq!(
            repo.sell_one(book.id).await.unwrap(),
            SellOutcome::SalesLimitReached
        );

        let stored = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 2);
        assert_eq!(stored.items_sold, MAX_COUNT);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        let top = repo.top_titles_by_sales(5).await.unwrap();
        assert_eq!(top[0].sales, MAX_COUNT);
    }

    #[tokio::test]
    async fn test_set_stock() {
        let repo = repo().await;
        let book = insert(&repo, "Dune", "Frank Herbert", 1.0, 3, 0).await;

        let updated = repo
            .set_stock(book.id, Stock::new(11).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.stock, 11);
        assert_eq!(repo.find_by_id(book.id).await.unwrap().unwrap().stock, 11);

        assert!(repo
            .set_stock(BookId::new(), Stock::new(1).unwrap())
            .await
            .unwrap()
            .is_none());
    }
}
