//! Display driver for the linear framebuffer a preceding boot stage set up.
//!
//! The boot stage programs exactly one video mode and hands over its
//! geometry in a [`info::FramebufferInfo`]. This crate wraps that
//! framebuffer in the two standard display abstractions a loader expects:
//! [`gop::GraphicsOutput`] (mode query + blit) and [`uga::UgaDraw`] (the
//! legacy draw interface). Pixel pushing itself is delegated to an external
//! blit library through [`blt::BltLib`]; no mode switching happens here.

pub mod blt;
pub mod gop;
pub mod info;
pub mod uga;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    /// Mode number outside the single prepared mode.
    #[error("invalid mode number {0}")]
    InvalidMode(u32),

    /// Requested geometry does not match the mode the boot stage programmed.
    #[error("no mode matches {width}x{height}@{depth}bpp")]
    ModeNotFound { width: u32, height: u32, depth: u32 },

    /// The blit library rejected an operation.
    #[error("blit rejected: {0}")]
    BltFailed(&'static str),
}
