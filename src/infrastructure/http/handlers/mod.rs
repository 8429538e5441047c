//! HTTP Handlers

mod analyze;
mod dictation;
mod image;
mod ping;
mod project;
mod speech;

pub use analyze::*;
pub use dictation::*;
pub use image::*;
pub use ping::*;
pub use project::*;
pub use speech::*;
