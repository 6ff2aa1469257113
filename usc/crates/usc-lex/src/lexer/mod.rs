//! Lexer implementation, split by token family.

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use self::core::{Lexer, LexerCheckpoint};
pub(crate) use identifier::is_ident_start;
