//! Orders Domain
//!
//! Order placement, listing and lifecycle management. Product titles and
//! prices are snapshotted into the order at placement time, and every status
//! change notifies the buyer through the notifications domain.
//!
//! # Status lifecycle
//!
//! ```text
//! pending ──► paid ──► shipped ──► delivered
//!    │
//!    └──► cancelled
//! ```
//!
//! Any other jump is rejected with a conflict.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use handlers::{orders_router, ApiDoc, OrderPage};
pub use models::{CreateOrder, CreateOrderItem, Order, OrderItem, OrderStatus, UpdateOrderStatus};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
