pub mod interpreter;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod program;
pub mod type_inference;

pub use program::{Outcome, Program, ProgramError};

/// Runs every `;`-separated entry of `source`.
pub fn run(source: &str) -> Vec<program::Result<Outcome>> {
    Program::new(source).run()
}
