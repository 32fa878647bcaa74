pub mod error;
pub mod value;

pub use error::{CollectionError, Result};
pub use value::{field, is_truthy, kind_name, loose_eq, property_key, to_number};
