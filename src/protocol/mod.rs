//! Line-oriented text protocol.
//!
//! The `frontline` binary reads one request per line on stdin and answers
//! with protocol lines on stdout. Diagnostics go to stderr through `tracing`.

pub mod parser;
pub mod text;

pub use parser::{parse_command, Request};
pub use text::{Frontend, TextPresentation};
