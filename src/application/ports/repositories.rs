//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite、内存）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::book::{BookDetails, BookId, Stock};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Book Repository
// ============================================================================

/// 图书实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub items_sold: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookRecord {
    /// 由校验后的字段创建新记录（分配新 ID）
    pub fn new(details: &BookDetails) -> Self {
        let now = Utc::now();
        Self {
            id: BookId::new(),
            title: details.title().to_string(),
            author: details.author().to_string(),
            description: details.description().to_string(),
            price: details.price().value(),
            stock: details.stock().value(),
            items_sold: details.items_sold(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 覆盖所有可变字段，保留 id 与 created_at
    pub fn apply(&mut self, details: &BookDetails) {
        self.title = details.title().to_string();
        self.author = details.author().to_string();
        self.description = details.description().to_string();
        self.price = details.price().value();
        self.stock = details.stock().value();
        self.items_sold = details.items_sold();
        self.updated_at = Utc::now();
    }
}

/// 默认最低价格
pub const DEFAULT_MIN_PRICE: f64 = 0.0;
/// 默认最高价格
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// 图书搜索条件
///
/// 各条件之间为 AND 关系；title / author 为空时匹配全部。
/// 价格区间两端均包含。
#[derive(Debug, Clone, PartialEq)]
pub struct BookSearch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for BookSearch {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
        }
    }
}

impl BookSearch {
    /// 有效的标题过滤词（忽略空字符串）
    pub fn title_filter(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }

    /// 有效的作者过滤词（忽略空字符串）
    pub fn author_filter(&self) -> Option<&str> {
        self.author.as_deref().filter(|s| !s.is_empty())
    }

    /// 判断记录是否满足搜索条件（大小写不敏感的子串匹配）
    pub fn matches(&self, book: &BookRecord) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if book.price < self.min_price || book.price > self.max_price {
            return false;
        }
        if let Some(title) = self.title_filter() {
            if !contains_ci(&book.title, title) {
                return false;
            }
        }
        if let Some(author) = self.author_filter() {
            if !contains_ci(&book.author, author) {
                return false;
            }
        }
        true
    }
}

/// 按标题聚合的销量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSales {
    pub title: String,
    pub sales: i64,
}

/// 按作者聚合的图书数量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: i64,
}

/// 售出一本的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SellOutcome {
    /// 已售出，返回更新后的记录
    Sold(BookRecord),
    /// 库存为 0，记录未修改
    OutOfStock,
    /// 销量已达 MAX_COUNT，记录未修改
    SalesLimitReached,
    /// 图书不存在
    NotFound,
}

/// Book Repository Port
///
/// 每个方法对应存储层的单次操作；sell_one / set_stock 在存储层原子完成。
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 插入新图书
    async fn insert(&self, book: &BookRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找图书
    async fn find_by_id(&self, id: BookId) -> Result<Option<BookRecord>, RepositoryError>;

    /// 获取所有图书（按创建时间倒序）
    async fn find_all(&self) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 覆盖图书的所有可变字段，不存在时返回 None
    async fn replace(
        &self,
        id: BookId,
        details: &BookDetails,
    ) -> Result<Option<BookRecord>, RepositoryError>;

    /// 删除图书，返回是否确实删除了记录
    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError>;

    /// 条件搜索
    async fn search(&self, criteria: &BookSearch) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 图书总数
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// 按标题汇总销量，降序取前 limit 个
    async fn top_titles_by_sales(&self, limit: usize) -> Result<Vec<TitleSales>, RepositoryError>;

    /// 按作者统计图书数量，降序取前 limit 个
    async fn top_authors_by_count(&self, limit: usize)
        -> Result<Vec<AuthorCount>, RepositoryError>;

    /// 售出一本：stock - 1, items_sold + 1（仅当 stock > 0 且 items_sold < MAX_COUNT）
    async fn sell_one(&self, id: BookId) -> Result<SellOutcome, RepositoryError>;

    /// 设置库存，不存在时返回 None
    async fn set_stock(
        &self,
        id: BookId,
        stock: Stock,
    ) -> Result<Option<BookRecord>, RepositoryError>;
}
