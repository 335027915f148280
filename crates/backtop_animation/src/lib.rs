//! backtop Animation System
//!
//! Time-based easing for scroll positions.
//!
//! # Features
//!
//! - **Easing**: the quadratic/cubic curves a scroll animation can follow
//! - **Scroll runs**: a single-slot animator whose runs are identified by a
//!   token, so a superseded run can never write another offset

pub mod easing;
pub mod scroll;

pub use easing::Easing;
pub use scroll::{FrameSample, RunToken, ScrollAnimator, ScrollRun};
