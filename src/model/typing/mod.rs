mod monotype;
mod variable;

pub use monotype::{BaseType, MonoType};
pub use variable::Variable;
