//! In-process backend: points live in a 3xN nalgebra matrix

use nalgebra::{Matrix3xX, Vector3};

use super::{BackendKind, PointStore};
use crate::aberration;
use crate::transforms::RotationTransform;
use crate::Result;

pub(super) struct CpuStore {
    // One column per point
    points: Matrix3xX<f64>,
}

fn pack(points: &[Vector3<f64>]) -> Matrix3xX<f64> {
    Matrix3xX::from_iterator(points.len(), points.iter().flat_map(|p| p.iter().copied()))
}

impl CpuStore {
    pub(super) fn from_points(points: &[Vector3<f64>]) -> Self {
        Self {
            points: pack(points),
        }
    }
}

impl PointStore for CpuStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Cpu
    }

    fn len(&self) -> usize {
        self.points.ncols()
    }

    fn read(&self) -> Result<Vec<Vector3<f64>>> {
        Ok(self.points.column_iter().map(|c| c.into_owned()).collect())
    }

    fn write(&mut self, points: &[Vector3<f64>]) -> Result<()> {
        self.points = pack(points);
        Ok(())
    }

    fn rotate(&mut self, transform: &RotationTransform) -> Result<()> {
        self.points = transform.matrix() * &self.points;
        Ok(())
    }

    fn aberrate(&mut self, rapidity: f64) -> Result<()> {
        for mut column in self.points.column_iter_mut() {
            let shifted = aberration::aberrate(&column.clone_owned(), rapidity);
            column.copy_from(&shifted);
        }
        Ok(())
    }
}
