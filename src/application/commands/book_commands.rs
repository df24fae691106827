//! Book Commands

use crate::domain::book::BookId;

/// 创建图书命令
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub items_sold: i64,
}

/// 整体替换图书命令
#[derive(Debug, Clone)]
pub struct ReplaceBook {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub items_sold: i64,
}

/// 删除图书命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: BookId,
}

/// 售出一本命令
#[derive(Debug, Clone)]
pub struct SellBook {
    pub book_id: BookId,
}

/// 设置库存命令
#[derive(Debug, Clone)]
pub struct SetStock {
    pub book_id: BookId,
    pub new_stock: i64,
}
