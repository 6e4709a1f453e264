pub mod client;
pub mod credentials;
pub mod prompts;

pub use client::*;
pub use credentials::*;
