//! Mixed-radix and Bluestein FFTs for 1-D and 2-D double-precision arrays,
//! with a parallel worker pool for large transforms.
//!
//! [`Plan1D`] and [`Plan2D`] are the entry points: build one for a fixed
//! length/shape, then reuse it for as many transforms of that size as you
//! like. Algorithm selection and table precomputation happen once, at
//! construction.

pub mod config;
pub mod error;
mod kernel;
pub mod packed2d;
pub mod plan1d;
pub mod plan2d;
pub mod pool;

pub use config::Config;
pub use error::FftError;
pub use plan1d::Plan1D;
pub use plan2d::Plan2D;
pub use pool::WorkerPool;
