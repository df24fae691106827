//! Book Queries

use crate::domain::book::BookId;

/// 获取图书详情查询
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: BookId,
}

/// 列出所有图书查询
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 条件搜索查询
#[derive(Debug, Clone, Default)]
pub struct SearchBooks {
    pub title: Option<String>,
    pub author: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// 图书总数查询
#[derive(Debug, Clone)]
pub struct CountBooks;

/// 销量前 5 的图书（按标题汇总）
#[derive(Debug, Clone)]
pub struct TopBooks;

/// 图书数量前 5 的作者
#[derive(Debug, Clone)]
pub struct TopAuthors;
