/*!
# Snowman Language Module

This module provides lexical analysis for the Snowman language: the
tokenizer, the token type, and the error type shared with the machine
module.

*/

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::minify;
pub use lex::tokenize;
pub use token::Token;
