//! Logger backends and output writers

pub mod beautiful;
pub mod color_writer;
pub mod noop;
pub mod sink;
pub mod test_logger;
pub mod writer;

pub use beautiful::{BeautifulLogger, BeautifulLoggerBuilder};
pub use color_writer::{ColorWriter, RESET};
pub use noop::NoopLogger;
pub use sink::SinkLogger;
pub use test_logger::TestLogger;
pub use writer::{shared_writer, stdout_writer, BufferWriter, SharedWriter};
