//! Redis connector and utilities

mod connector;
mod health;

pub use connector::{connect, connect_from_config, connect_from_config_with_retry, connect_with_retry};
pub use health::check_health;

// Re-export redis types for convenience
pub use core_config::redis::RedisConfig;
pub use redis::aio::ConnectionManager;
pub use redis::{AsyncCommands, Client, RedisResult};
