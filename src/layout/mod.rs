//! Radial tree layout.
//!
//! This module computes target positions for every vertex of a free tree,
//! together with the depth/width bookkeeping and the ring and wedge
//! geometry the framework overlay draws. Positions are plain targets; the
//! scene animates towards them.

mod radial;
mod result;

pub use radial::{CenterMode, MIN_DELTA, RadialLayout, RadialLayoutConfig, RootWedge};
pub use result::{LayoutResult, Point, Wedge};
