// ============================================================================
// RustMemoCollect Library
// ============================================================================

//! In-memory, array-like collections of JSON values with query, projection
//! and pagination helpers.
//!
//! # Examples
//!
//! ```
//! use rustmemocollect::Collection;
//! use serde_json::json;
//!
//! let users = Collection::new(vec![
//!     json!({"id": 1, "name": "alice", "role": "admin"}),
//!     json!({"id": 2, "name": "bob", "role": "user"}),
//! ]);
//!
//! // Loose equality: "2" matches 2
//! assert_eq!(users.where_row("id", "2").unwrap()["name"], "bob");
//! assert_eq!(users.where_eq("role", "user").count(), 1);
//! assert_eq!(users.list_by_id("name")["1"], "alice");
//! assert_eq!(users.slice(0, 0, true).len(), 1);
//!
//! let page = users.paginate(1, 15, 3, 0);
//! assert_eq!(page.total_pages(), 1);
//! ```

pub mod collection;
pub mod core;
pub mod helpers;
pub mod pagination;

// Re-export main types for convenience
pub use collection::{Collection, Projection};
pub use core::{CollectionError, Result};
pub use pagination::{PaginationConfig, Paginator};
