pub mod refs;
pub mod spec;
pub mod text;

pub(crate) use refs::extract_schema_ref_name;
