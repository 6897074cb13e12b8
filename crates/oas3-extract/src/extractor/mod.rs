pub mod document;
pub mod metrics;
pub mod orchestrator;
pub(crate) mod reference_walker;
pub mod report;
pub mod selection;

#[cfg(test)]
mod tests;

pub use document::Document;
pub use orchestrator::{ExtractionOutput, Extractor};
pub use report::ReportOptions;
pub use selection::{HttpMethod, Selection};
