//! Output sinks
//!
//! Any `std::io::Write + Send` value can be handed to
//! [`Logger::set_output`](crate::Logger::set_output); these are the ones the
//! crate ships.

pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::MemorySink;
