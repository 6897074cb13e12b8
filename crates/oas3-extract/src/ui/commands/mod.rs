pub mod extract;
pub mod list;

pub use extract::{ExtractConfig, extract_report};
pub use list::{list_operations, list_schemas};
