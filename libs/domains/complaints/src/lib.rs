//! Complaints Domain
//!
//! Complaint filing and triage. Users file complaints (optionally against an
//! order), admins triage and close them, and every status change notifies
//! the complainant through the notifications domain.
//!
//! # Status lifecycle
//!
//! ```text
//! open ──► in_review ──► resolved
//!               │
//!               └──────► rejected
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ComplaintError, ComplaintResult};
pub use handlers::{complaints_router, ApiDoc, ComplaintPage, ComplaintQuery};
pub use models::{Complaint, ComplaintStatus, CreateComplaint, UpdateComplaintStatus};
pub use postgres::PgComplaintRepository;
pub use repository::{ComplaintRepository, InMemoryComplaintRepository};
pub use service::ComplaintService;
