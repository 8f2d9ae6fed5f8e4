pub mod forms;
pub mod translation;

pub use forms::*;
pub use translation::*;
