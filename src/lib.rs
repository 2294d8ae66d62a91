//! Resampling of irregularly-timestamped samples onto a fixed-interval grid.
//!
//! Each slot of the requested `[from, to)` window ends up holding either the
//! first sample that aligns to it or a NaN gap marker. [`resample`] does this as
//! one batch pass; [`Regrid`] does the same as a streaming [`Stage`].

mod error;
mod grid;
mod macros;
mod pipe;
mod point;
mod quantize;
mod resampler;
mod stage;

pub use crate::error::ResampleError;
pub use crate::grid::{Grid, GridOptions};
pub use crate::pipe::*;
pub use crate::point::{MISSING, Point};
pub use crate::quantize::quantize;
pub use crate::resampler::{Resampler, resample};
pub use crate::stage::{OutputCollector, Pipeline, Stage, StageExt};
