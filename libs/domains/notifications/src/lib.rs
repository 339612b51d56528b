//! Notifications Domain
//!
//! In-app notifications raised by the order and complaint flows. Delivery
//! (email, push) is out of scope; this domain only stores and serves them.
//!
//! Other domains depend on the [`NotificationSink`] trait rather than the
//! service type, so tests can capture notifications without a store.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{NotificationError, NotificationResult};
pub use handlers::ApiDoc;
pub use models::{CreateNotification, Notification, NotificationKind};
pub use postgres::PgNotificationRepository;
pub use repository::{InMemoryNotificationRepository, NotificationRepository};
pub use service::{NotificationService, NotificationSink};
