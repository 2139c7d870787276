//! LCOE cost model for space-based solar power.
//!
//! The model is pure arithmetic: [`levelized_cost`] evaluates one point and
//! [`generate_surface`] sweeps it over two log-spaced axes.

pub mod cost;
pub mod error;
pub mod inputs;
pub mod surface;
pub mod sweep;

pub use cost::*;
pub use error::*;
pub use inputs::*;
pub use surface::*;
pub use sweep::*;
