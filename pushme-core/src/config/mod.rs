//! Board configuration
//!
//! Board files list the buttons and LEDs wired to a board. They are parsed
//! on the target by a small `no_std` parser.

pub mod parse;
pub mod types;

pub use parse::{parse_board, ParseError};
pub use types::*;
