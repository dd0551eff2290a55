//! # Snowman
//!
//! An interpreter for the Snowman programming language: eight variables,
//! no stack, and around eighty operators that fight over them.
//!
//! Run a program from a file with `snowman program.snowman`, pipe one in on
//! STDIN, or start a REPL with `snowman -i`. The `-d` flag traces every
//! token together with the machine state, and `-m` prints a minified copy
//! of the program instead of running it.
//!
//! Embedders want [`mach::Runtime`]: feed it source with `run`, inspect the
//! machine with `debug`, and collect non-fatal errors afterwards.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod __Appendix_A;

pub mod lang;
pub mod mach;
pub mod term;
