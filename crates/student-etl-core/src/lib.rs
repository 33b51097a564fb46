pub mod collector;
pub mod config;
pub mod db;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod progress_log;
pub mod sink;
pub mod table;

pub use student_etl_parser::StudentRecord;
