//! # lsystem-painter
//!
//! Expands an L-System grammar for a fixed number of generations and draws the
//! result with turtle graphics, coloring strokes along a gradient in the order
//! they are drawn.
//!
//! The rewriting engine ([`grammar`]) and the turtle interpreter
//! ([`interpreter`]) are independent of any image backend: the interpreter
//! talks to a [`Canvas`], so the same run can fill a [`RasterCanvas`] or just
//! record its [`LineSegment`]s.

pub mod canvas;
pub mod config;
pub mod error;
pub mod gradient;
pub mod grammar;
pub mod interpreter;
pub mod system;
pub mod turtle;

pub use canvas::*;
pub use config::*;
pub use error::*;
pub use gradient::*;
pub use grammar::*;
pub use interpreter::*;
pub use system::*;
pub use turtle::*;
