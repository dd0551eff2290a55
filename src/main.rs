//! # Snowman
//!
//! The Snowman programming language.
//!

fn main() {
    snowman::term::main()
}
