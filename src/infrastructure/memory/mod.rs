//! In-Memory Implementations
//!
//! 本地开发与测试使用的层级存储

mod memory_store;

pub use memory_store::InMemoryStore;
