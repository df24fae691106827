//! Domain Layer - 领域层
//!
//! 限界上下文:
//! - Book Context: 图书目录与库存

pub mod book;
