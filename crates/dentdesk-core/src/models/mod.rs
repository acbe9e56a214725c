//! Domain models for the dentdesk system.

mod appointment;
mod diagnostic;
mod image;
mod patient;
mod treatment;

pub use appointment::*;
pub use diagnostic::*;
pub use image::*;
pub use patient::*;
pub use treatment::*;
