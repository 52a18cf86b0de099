//! Declaration tokenizer: carves a file into top-level declarations.
//!
//! One left-to-right walk over the scanner's comment-free word stream,
//! dispatching on `module`, `import`, `port`, `type`, and `effect`.

mod types;
mod walker;

pub use types::{Token, TokenKind, TokenStream};
pub use walker::{tokenize, Tokenizer};
