//! OpenCL backend: points live in device memory, transforms run as kernels
//!
//! Only double-precision capable devices (`cl_khr_fp64`) are considered.
//! Among those, GPUs beat other device types and `cl_khr_gl_sharing` support
//! breaks ties, since a planetarium renderer will want to share buffers with
//! the GL context eventually.

use std::env;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};
use nalgebra::Vector3;
use ocl::enums::{DeviceInfo, DeviceInfoResult};
use ocl::flags::DeviceType;
use ocl::prm::Double16;
use ocl::{Buffer, Device, Kernel, Platform, Program, Queue};

use super::{BackendKind, PointStore};
use crate::transforms::RotationTransform;
use crate::{Result, SkyframeError};

const KERNEL_FILE: &str = "pointcloud.cl";
const KERNEL_DIR_VAR: &str = "SKYFRAME_KERNEL_DIR";

fn backend_err(err: ocl::Error) -> SkyframeError {
    SkyframeError::Backend(err.to_string())
}

/// Per-user kernel install location
fn user_kernel_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache").join("skyframe")
}

/// Locate the kernel source on disk. An explicit `SKYFRAME_KERNEL_DIR` wins,
/// then `kernels/` under the working directory, then the per-user cache
/// directory, then the crate source tree for development runs.
fn kernel_source() -> Result<String> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(dir) = env::var(KERNEL_DIR_VAR) {
        candidates.push(PathBuf::from(dir).join(KERNEL_FILE));
    }
    candidates.push(PathBuf::from("kernels").join(KERNEL_FILE));
    candidates.push(user_kernel_dir().join(KERNEL_FILE));
    if let Some(manifest) = option_env!("CARGO_MANIFEST_DIR") {
        candidates.push(PathBuf::from(manifest).join("kernels").join(KERNEL_FILE));
    }
    for path in &candidates {
        if path.is_file() {
            debug!("loading kernel source from {}", path.display());
            return Ok(fs::read_to_string(path)?);
        }
    }
    Err(SkyframeError::KernelSource(format!(
        "{} not found, searched: {}",
        KERNEL_FILE,
        candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

fn device_extensions(device: &Device) -> String {
    device
        .info(DeviceInfo::Extensions)
        .map(|r| r.to_string())
        .unwrap_or_default()
}

fn device_type(device: &Device) -> Option<DeviceType> {
    match device.info(DeviceInfo::Type) {
        Ok(DeviceInfoResult::Type(t)) => Some(t),
        _ => None,
    }
}

/// Rank all fp64-capable devices and pick the best one
fn select_device() -> Result<(Platform, Device)> {
    let mut best: Option<(u32, Platform, Device)> = None;
    for platform in Platform::list() {
        let devices = match Device::list_all(platform) {
            Ok(d) => d,
            Err(err) => {
                debug!("skipping platform {:?}: {}", platform.name(), err);
                continue;
            }
        };
        for device in devices {
            let extensions = device_extensions(&device);
            if !extensions.contains("cl_khr_fp64") {
                debug!(
                    "skipping device {:?}: no double precision",
                    device.name()
                );
                continue;
            }
            let mut score = 1;
            if device_type(&device).is_some_and(|t| t.contains(DeviceType::GPU)) {
                score += 2;
            }
            if extensions.contains("cl_khr_gl_sharing") {
                score += 1;
            }
            if best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                best = Some((score, platform, device));
            }
        }
    }
    match best {
        Some((_, platform, device)) => Ok((platform, device)),
        None => Err(SkyframeError::NoDevice(
            "no OpenCL device with cl_khr_fp64 support".into(),
        )),
    }
}

/// Owns the OpenCL plumbing for one compute context. The program is compiled
/// once here; stores share the queue and program handles.
pub(super) struct DeviceContext {
    queue: Queue,
    program: Program,
}

impl DeviceContext {
    pub(super) fn new() -> Result<Self> {
        let (platform, device) = select_device()?;
        info!(
            "using OpenCL device {:?} on platform {:?}",
            device.name(),
            platform.name()
        );
        let context = ocl::Context::builder()
            .platform(platform)
            .devices(device)
            .build()
            .map_err(backend_err)?;
        let queue = Queue::new(&context, device, None).map_err(backend_err)?;
        let src = kernel_source()?;
        let program = Program::builder()
            .src(src)
            .devices(device)
            .cmplr_opt("-cl-std=CL1.1")
            .build(&context)
            .map_err(backend_err)?;
        debug!("kernel program compiled");
        Ok(Self { queue, program })
    }

    pub(super) fn create_store(&self, points: &[Vector3<f64>]) -> Result<DeviceStore> {
        let buffer = if points.is_empty() {
            // Zero-sized OpenCL buffers are invalid, so hold nothing
            None
        } else {
            let flat: Vec<f64> = points.iter().flat_map(|p| p.iter().copied()).collect();
            let buffer = Buffer::<f64>::builder()
                .queue(self.queue.clone())
                .len(flat.len())
                .copy_host_slice(&flat)
                .build()
                .map_err(backend_err)?;
            Some(buffer)
        };
        Ok(DeviceStore {
            queue: self.queue.clone(),
            program: self.program.clone(),
            buffer,
            len: points.len(),
        })
    }
}

pub(super) struct DeviceStore {
    queue: Queue,
    program: Program,
    buffer: Option<Buffer<f64>>,
    len: usize,
}

impl DeviceStore {
    fn run(&self, kernel: Kernel) -> Result<()> {
        unsafe {
            kernel.enq().map_err(backend_err)?;
        }
        // Keep dispatch synchronous; callers read results immediately after
        self.queue.finish().map_err(backend_err)
    }
}

impl PointStore for DeviceStore {
    fn backend(&self) -> BackendKind {
        BackendKind::OpenCl
    }

    fn len(&self) -> usize {
        self.len
    }

    fn read(&self) -> Result<Vec<Vector3<f64>>> {
        let Some(buffer) = &self.buffer else {
            return Ok(Vec::new());
        };
        let mut flat = vec![0.0_f64; self.len * 3];
        buffer.read(&mut flat).enq().map_err(backend_err)?;
        Ok(flat
            .chunks_exact(3)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect())
    }

    fn write(&mut self, points: &[Vector3<f64>]) -> Result<()> {
        let Some(buffer) = &self.buffer else {
            return Ok(());
        };
        let flat: Vec<f64> = points.iter().flat_map(|p| p.iter().copied()).collect();
        buffer.write(&flat).enq().map_err(backend_err)
    }

    fn rotate(&mut self, transform: &RotationTransform) -> Result<()> {
        let Some(buffer) = &self.buffer else {
            return Ok(());
        };
        let m = transform.matrix();
        // Row-major 3x4 layout inside a double16; the last column and row
        // are padding the kernel never reads
        let packed = Double16::new(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            0.0,
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            0.0,
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
        );
        let kernel = Kernel::builder()
            .program(&self.program)
            .name("transform_points")
            .queue(self.queue.clone())
            .global_work_size(self.len)
            .arg(buffer)
            .arg(packed)
            .build()
            .map_err(backend_err)?;
        self.run(kernel)
    }

    fn aberrate(&mut self, rapidity: f64) -> Result<()> {
        let Some(buffer) = &self.buffer else {
            return Ok(());
        };
        let kernel = Kernel::builder()
            .program(&self.program)
            .name("aberrate_points")
            .queue(self.queue.clone())
            .global_work_size(self.len)
            .arg(buffer)
            .arg(rapidity)
            .build()
            .map_err(backend_err)?;
        self.run(kernel)
    }
}
