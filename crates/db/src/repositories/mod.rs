//! Database repositories.

pub mod complaint;
pub mod user;

pub use complaint::{ComplaintFilter, ComplaintRepository, ComplaintSummary};
pub use user::UserRepository;
