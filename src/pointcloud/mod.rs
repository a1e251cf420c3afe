//! Bulk point-cloud transformation engine
//!
//! A [`Context`] owns the compute backend (in-process, or an OpenCL device
//! when the `opencl` feature is enabled) and hands out [`CoordinateBuffer`]s
//! that live no longer than the context that created them. Every buffer
//! carries a [`ReferenceFrame`] tag; rotations retag the buffer and the
//! aberration kernel refuses to run outside the Earth-velocity-aligned frame.
//!
//! Backend availability problems surface as [`crate::SkyframeError`] values.
//! Contract violations by the caller (aberrating in the wrong frame, copying
//! between mismatched buffers) are bugs, and panic.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::transforms::RotationTransform;
use crate::Result;

mod cpu;
#[cfg(feature = "opencl")]
mod device;

/// Reference frame a coordinate buffer is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceFrame {
    /// Mean equator and equinox of J2000.0, as star catalogs publish
    CatalogJ2000,
    /// Mean equator and equinox of B1950.0 (FK4 catalogs)
    CatalogB1950,
    /// True equator and equinox of the current epoch
    EquatorialOfDate,
    /// Ecliptic of the current epoch
    EclipticOfDate,
    /// Local horizon, azimuth counted north through east
    Horizontal,
    /// IAU 1958 galactic coordinates
    Galactic,
    /// Ecliptic frame rotated so the Earth's velocity lies on +y
    EarthVelocityAligned,
}

impl std::fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReferenceFrame::CatalogJ2000 => "catalog J2000",
            ReferenceFrame::CatalogB1950 => "catalog B1950",
            ReferenceFrame::EquatorialOfDate => "equatorial of date",
            ReferenceFrame::EclipticOfDate => "ecliptic of date",
            ReferenceFrame::Horizontal => "horizontal",
            ReferenceFrame::Galactic => "galactic",
            ReferenceFrame::EarthVelocityAligned => "earth velocity aligned",
        };
        f.write_str(name)
    }
}

/// Which compute backend a context dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// In-process nalgebra backend, always available
    Cpu,
    /// OpenCL device backend, requires the `opencl` cargo feature and a
    /// double-precision capable device at runtime
    OpenCl,
}

enum BackendState {
    Cpu,
    #[cfg(feature = "opencl")]
    OpenCl(device::DeviceContext),
}

/// Owner of backend state; the factory for coordinate buffers
pub struct Context {
    kind: BackendKind,
    state: BackendState,
}

impl Context {
    /// Initialize a compute context. Succeeding is the validity check: a
    /// returned context is usable until dropped. `BackendKind::OpenCl` errors
    /// when the crate was built without the `opencl` feature or no
    /// double-precision device exists.
    pub fn new(kind: BackendKind) -> Result<Self> {
        let state = match kind {
            BackendKind::Cpu => BackendState::Cpu,
            #[cfg(feature = "opencl")]
            BackendKind::OpenCl => BackendState::OpenCl(device::DeviceContext::new()?),
            #[cfg(not(feature = "opencl"))]
            BackendKind::OpenCl => {
                return Err(crate::SkyframeError::Backend(
                    "built without the `opencl` feature".into(),
                ))
            }
        };
        Ok(Self { kind, state })
    }

    /// Backend this context dispatches to
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Upload `points` into a new buffer tagged with `frame`
    pub fn create_buffer(
        &self,
        points: &[Vector3<f64>],
        frame: ReferenceFrame,
    ) -> Result<CoordinateBuffer<'_>> {
        let store: Box<dyn PointStore> = match &self.state {
            BackendState::Cpu => Box::new(cpu::CpuStore::from_points(points)),
            #[cfg(feature = "opencl")]
            BackendState::OpenCl(dev) => Box::new(dev.create_store(points)?),
        };
        Ok(CoordinateBuffer {
            context: self,
            store,
            frame,
        })
    }
}

/// Backend storage for one point cloud. Rotation and aberration mutate the
/// points in place; callers track the frame tag.
trait PointStore {
    fn backend(&self) -> BackendKind;
    fn len(&self) -> usize;
    fn read(&self) -> Result<Vec<Vector3<f64>>>;
    fn write(&mut self, points: &[Vector3<f64>]) -> Result<()>;
    fn rotate(&mut self, transform: &RotationTransform) -> Result<()>;
    fn aberrate(&mut self, rapidity: f64) -> Result<()>;
}

/// A point cloud resident on one backend, tagged with its reference frame
///
/// Borrows the [`Context`] that created it, so a buffer can never outlive
/// its backend.
pub struct CoordinateBuffer<'ctx> {
    context: &'ctx Context,
    store: Box<dyn PointStore>,
    frame: ReferenceFrame,
}

impl CoordinateBuffer<'_> {
    /// Number of points in the buffer
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Frame the points are currently expressed in
    pub fn frame(&self) -> ReferenceFrame {
        self.frame
    }

    /// Backend holding the points
    pub fn backend(&self) -> BackendKind {
        self.store.backend()
    }

    /// Download the points to host memory
    pub fn read(&self) -> Result<Vec<Vector3<f64>>> {
        self.store.read()
    }

    /// Rotate every point in place and retag the buffer with `target`.
    /// The frame tag is untouched if the backend reports an error.
    pub fn apply_rotation(
        &mut self,
        transform: &RotationTransform,
        target: ReferenceFrame,
    ) -> Result<()> {
        self.store.rotate(transform)?;
        self.frame = target;
        Ok(())
    }

    /// Apply the exponential aberration map to every point in place.
    ///
    /// # Panics
    ///
    /// Panics unless the buffer is in [`ReferenceFrame::EarthVelocityAligned`];
    /// the kernel assumes the velocity apex sits on +y and running it in any
    /// other frame silently corrupts positions.
    pub fn apply_aberration(&mut self, rapidity: f64) -> Result<()> {
        assert_eq!(
            self.frame,
            ReferenceFrame::EarthVelocityAligned,
            "aberration requires the earth-velocity-aligned frame, buffer is in {}",
            self.frame
        );
        self.store.aberrate(rapidity)
    }

    /// Overwrite this buffer's points with `source`'s and adopt its frame.
    ///
    /// # Panics
    ///
    /// Panics when the buffers hold different point counts or live on
    /// different backends.
    pub fn copy_from(&mut self, source: &CoordinateBuffer<'_>) -> Result<()> {
        assert_eq!(
            self.len(),
            source.len(),
            "cannot copy between buffers of different sizes"
        );
        assert_eq!(
            self.backend(),
            source.backend(),
            "cannot copy between buffers on different backends"
        );
        let points = source.store.read()?;
        self.store.write(&points)?;
        self.frame = source.frame;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::unit_vector;
    use crate::time::JulianDate;
    use crate::Angle;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_cloud(n: usize, seed: u64) -> Vec<Vector3<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let lon = Angle::from_radians(rng.gen_range(0.0..crate::constants::TAU));
                let lat = Angle::from_radians(rng.gen_range(-1.5..1.5));
                unit_vector(lon, lat)
            })
            .collect()
    }

    #[test]
    fn test_buffer_roundtrip() {
        let ctx = Context::new(BackendKind::Cpu).unwrap();
        let points = random_cloud(257, 42);
        let buffer = ctx
            .create_buffer(&points, ReferenceFrame::CatalogJ2000)
            .unwrap();
        assert_eq!(buffer.len(), 257);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.backend(), BackendKind::Cpu);
        assert_eq!(buffer.frame(), ReferenceFrame::CatalogJ2000);
        let back = buffer.read().unwrap();
        for (a, b) in points.iter().zip(&back) {
            assert_relative_eq!(a, b);
        }
    }

    #[test]
    fn test_empty_buffer() {
        let ctx = Context::new(BackendKind::Cpu).unwrap();
        let mut buffer = ctx
            .create_buffer(&[], ReferenceFrame::Galactic)
            .unwrap();
        assert!(buffer.is_empty());
        let precession = RotationTransform::precess_to(JulianDate::new(2_460_000.5));
        buffer
            .apply_rotation(&precession, ReferenceFrame::EquatorialOfDate)
            .unwrap();
        assert_eq!(buffer.frame(), ReferenceFrame::EquatorialOfDate);
        assert!(buffer.read().unwrap().is_empty());
    }

    #[test]
    fn test_rotation_matches_host_transform() {
        let ctx = Context::new(BackendKind::Cpu).unwrap();
        let points = random_cloud(100, 7);
        let mut buffer = ctx
            .create_buffer(&points, ReferenceFrame::CatalogJ2000)
            .unwrap();
        let jd = JulianDate::new(2_455_197.5);
        let precession = RotationTransform::precess_to(jd);
        buffer
            .apply_rotation(&precession, ReferenceFrame::EquatorialOfDate)
            .unwrap();
        assert_eq!(buffer.frame(), ReferenceFrame::EquatorialOfDate);
        let rotated = buffer.read().unwrap();
        for (orig, got) in points.iter().zip(&rotated) {
            let expected = precession * *orig;
            assert_relative_eq!(&expected, got, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_aberration_matches_host_kernel() {
        let ctx = Context::new(BackendKind::Cpu).unwrap();
        let points = random_cloud(100, 13);
        let mut buffer = ctx
            .create_buffer(&points, ReferenceFrame::EarthVelocityAligned)
            .unwrap();
        let rapidity = crate::aberration::rapidity(29.8);
        buffer.apply_aberration(rapidity).unwrap();
        let shifted = buffer.read().unwrap();
        for (orig, got) in points.iter().zip(&shifted) {
            let expected = crate::aberration::aberrate(orig, rapidity);
            assert_relative_eq!(&expected, got, epsilon = 1e-14);
        }
    }

    #[test]
    #[should_panic(expected = "earth-velocity-aligned")]
    fn test_aberration_panics_in_wrong_frame() {
        let ctx = Context::new(BackendKind::Cpu).unwrap();
        let points = random_cloud(4, 1);
        let mut buffer = ctx
            .create_buffer(&points, ReferenceFrame::CatalogJ2000)
            .unwrap();
        let _ = buffer.apply_aberration(1.0001);
    }

    #[test]
    fn test_copy_from_adopts_frame() {
        let ctx = Context::new(BackendKind::Cpu).unwrap();
        let a = random_cloud(32, 2);
        let b = random_cloud(32, 3);
        let src = ctx.create_buffer(&a, ReferenceFrame::Galactic).unwrap();
        let mut dst = ctx
            .create_buffer(&b, ReferenceFrame::Horizontal)
            .unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst.frame(), ReferenceFrame::Galactic);
        let got = dst.read().unwrap();
        for (x, y) in a.iter().zip(&got) {
            assert_relative_eq!(x, y);
        }
    }

    #[test]
    #[should_panic(expected = "different sizes")]
    fn test_copy_from_panics_on_size_mismatch() {
        let ctx = Context::new(BackendKind::Cpu).unwrap();
        let src = ctx
            .create_buffer(&random_cloud(8, 4), ReferenceFrame::CatalogJ2000)
            .unwrap();
        let mut dst = ctx
            .create_buffer(&random_cloud(9, 5), ReferenceFrame::CatalogJ2000)
            .unwrap();
        let _ = dst.copy_from(&src);
    }

    #[test]
    fn test_frame_tag_display() {
        assert_eq!(
            ReferenceFrame::EarthVelocityAligned.to_string(),
            "earth velocity aligned"
        );
        assert_eq!(ReferenceFrame::CatalogJ2000.to_string(), "catalog J2000");
    }
}
