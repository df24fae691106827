//! Book Context - 图书限界上下文
//!
//! 职责:
//! - 图书标识与字段校验
//! - 价格、库存值对象

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::BookDetails;
pub use errors::BookError;
pub use value_objects::{require_text, BookId, Price, Stock, MAX_COUNT};
