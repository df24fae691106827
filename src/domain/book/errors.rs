//! Book Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BookError {
    #[error("无效的图书 ID: {0}")]
    InvalidId(String),

    #[error("字段不能为空: {0}")]
    EmptyField(&'static str),

    #[error("无效的价格: {0}")]
    InvalidPrice(String),

    #[error("无效的库存: {0}")]
    InvalidStock(String),

    #[error("无效的销量: {0}")]
    InvalidItemsSold(String),
}
