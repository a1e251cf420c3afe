//! Skyframe: astronomical coordinate transformation engine
//!
//! This crate implements the analytic transforms a planetarium needs to move
//! sky positions between reference frames (precession, nutation, obliquity,
//! horizon, galactic and Earth-velocity rotations plus the non-linear stellar
//! aberration correction) and a bulk point-cloud subsystem that applies them
//! to large batches of unit vectors through a backend-agnostic buffer/context
//! abstraction. The in-process backend is always available; an OpenCL backend
//! (cargo feature `opencl`) dispatches the same operations as device kernels.

use thiserror::Error;

pub mod aberration;
pub mod almanac;
pub mod constants;
pub mod coordinates;
pub mod pointcloud;
pub mod series;
pub mod time;
pub mod transforms;

// Re-export commonly used types
pub use coordinates::Angle;
pub use pointcloud::{BackendKind, Context, CoordinateBuffer, ReferenceFrame};
pub use time::JulianDate;
pub use transforms::RotationTransform;

/// Main error type for the skyframe library
#[derive(Debug, Error)]
pub enum SkyframeError {
    #[error("Angle parse error: {0}")]
    AngleParse(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("No usable compute device: {0}")]
    NoDevice(String),

    #[error("Kernel source error: {0}")]
    KernelSource(String),

    #[error("Compute backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for skyframe operations
pub type Result<T> = std::result::Result<T, SkyframeError>;
