pub mod kv;
pub mod memory;
pub mod redis_db;

pub use kv::KeyValueStore;
