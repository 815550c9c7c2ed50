//! Decoding of macro data files.
//!
//! Bytes flow downward through three stages:
//! - `scanner` frames a file into fixed-size blocks
//! - `block` splits a block into six lines and a title
//! - `line` turns one line into text, resolving escape tokens via `token`

mod block;
mod line;
mod scanner;
mod text;
mod token;

pub use block::*;
pub use line::*;
pub use scanner::*;
pub use text::*;
pub use token::*;
