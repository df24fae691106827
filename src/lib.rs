//! Bookstore - 图书目录与库存 REST 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book Context: 图书实体、值对象与校验
//!
//! 应用层 (application/):
//! - Ports: BookRepositoryPort
//! - Commands: 创建、替换、删除、售出、设置库存
//! - Queries: 详情、列表、搜索、统计
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful JSON API
//! - Persistence: SQLite 存储
//! - Memory: DashMap 内存仓储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
