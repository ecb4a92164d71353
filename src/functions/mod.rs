// Numeric functions callable from expressions
pub mod library;
pub mod special_functions;

pub use library::{FunctionLibrary, MathFn, library};
pub use special_functions::*;
