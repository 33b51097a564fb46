mod common;
mod delimited;
mod hierarchical;
mod structured;

pub use delimited::DelimitedReader;
pub use hierarchical::HierarchicalReader;
pub use structured::StructuredReader;

pub(crate) use common::{ensure_finite, parse_measurement};
