pub mod names;
pub mod text;

pub use names::*;
pub use text::*;
