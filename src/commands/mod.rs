pub mod ai;
pub mod clipboard;
pub mod export;
pub mod workspace;

pub use ai::*;
pub use clipboard::*;
pub use export::*;
pub use workspace::*;
