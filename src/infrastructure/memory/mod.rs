//! Memory Layer - In-Memory State Management
//!
//! 基于 DashMap 的图书仓储实现，不依赖外部存储

mod book_repo;

pub use book_repo::InMemoryBookRepository;
