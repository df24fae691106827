//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{AuthorCount, BookRecord, TitleSales};

// ============================================================================
// 通用响应结构
// ============================================================================

/// 错误响应 `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 成功响应 `{"success": "..."}`（删除、售出）
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: String,
}

impl SuccessResponse {
    pub fn new(success: impl Into<String>) -> Self {
        Self {
            success: success.into(),
        }
    }
}

// ============================================================================
// Book DTOs
// ============================================================================

/// 创建 / 替换图书请求体
#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub items_sold: i64,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub items_sold: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookRecord> for BookResponse {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            author: record.author,
            description: record.description,
            price: record.price,
            stock: record.stock,
            items_sold: record.items_sold,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// `/search` 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub author: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// `/books/{id}/stock` 查询参数
#[derive(Debug, Deserialize)]
pub struct StockParams {
    pub new_stock: i64,
}

// ============================================================================
// Aggregate DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TotalBooksResponse {
    pub total_books: u64,
}

#[derive(Debug, Serialize)]
pub struct TopBookResponse {
    pub title: String,
    pub sales: i64,
}

impl From<TitleSales> for TopBookResponse {
    fn from(entry: TitleSales) -> Self {
        Self {
            title: entry.title,
            sales: entry.sales,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopAuthorResponse {
    pub author: String,
    pub count: i64,
}

impl From<AuthorCount> for TopAuthorResponse {
    fn from(entry: AuthorCount) -> Self {
        Self {
            author: entry.author,
            count: entry.count,
        }
    }
}
