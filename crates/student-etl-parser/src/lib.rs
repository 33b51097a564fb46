pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::ParserError;
pub use formats::{DelimitedReader, HierarchicalReader, StructuredReader};
pub use model::{StudentRecord, COLUMNS};
pub use registry::{all_readers, RecordReader};
