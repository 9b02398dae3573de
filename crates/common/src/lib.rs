//! Common utilities and shared types for aduan.
//!
//! This crate provides foundational components used across all aduan crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based identifiers and access tokens via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use aduan_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let token = id_gen.generate_token();
//!     println!("Listening on {}:{} with token {}", config.server.host, config.server.port, token);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
