//! Business logic services.

pub mod complaint;
pub mod user;

pub use complaint::{AdminListing, ComplaintService, PublicListing};
pub use user::UserService;
