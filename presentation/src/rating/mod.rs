//! Interactive rating loop

pub mod repl;
