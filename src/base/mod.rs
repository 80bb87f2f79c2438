//! Foundation types for the parsework engine.
//!
//! This module provides the primitives every other layer builds on:
//! - [`CharStream`], [`TextStream`] - Random-access character streams
//! - [`ColorIndex`], [`ColorRange`], [`WordRange`], [`Formatting`] - Line annotations
//!
//! This module has NO dependencies on other parsework modules.

mod color;
mod stream;

pub use color::{ColorIndex, ColorRange, Formatting, WordRange};
pub use stream::{CharStream, TextStream};
