//! Page views over a collection.
//!
//! - `config.rs` - request parameters with their defaults
//! - `paginator.rs` - page metadata plus the items of the current page

mod config;
mod paginator;

pub use config::PaginationConfig;
pub use paginator::Paginator;
