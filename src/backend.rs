// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `hello-frame`.
//
// `hello-frame` is free software: you can redistribute it and/or modify it under the terms of
// either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `hello-frame` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Lesser General Public License or the Mozilla Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `hello-frame`. If not, see <https://www.gnu.org/licenses/>.

//! Backend selection.

use crate::Error;

use std::fmt;

/// The graphics API behind a GPU backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GpuApi {
    /// OpenGL, or OpenGL ES.
    Gl,

    /// Vulkan.
    Vulkan,

    /// Dawn, the WebGPU implementation.
    Dawn,

    /// Something we don't have a name for.
    Unknown,
}

impl GpuApi {
    /// A human-readable name for the API.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gl => "GL",
            Self::Vulkan => "Vulkan",
            Self::Dawn => "Dawn",
            Self::Unknown => "Unknown GPU backend",
        }
    }
}

/// The rendering implementation attached to a window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Software rendering into CPU memory.
    Raster,

    /// Hardware-accelerated rendering.
    Gpu(GpuApi),
}

impl BackendKind {
    /// A human-readable name for the backend.
    pub fn name(self) -> &'static str {
        match self {
            Self::Raster => "Raster",
            Self::Gpu(api) => api.name(),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The backends that can be used in this process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// The GPU backend, if there is one.
    pub gpu: Option<GpuApi>,
}

impl Capabilities {
    /// Capabilities with software rendering only.
    pub fn raster_only() -> Self {
        Self { gpu: None }
    }

    /// Capabilities with a GPU backend.
    pub fn with_gpu(api: GpuApi) -> Self {
        Self { gpu: Some(api) }
    }

    /// The backends compiled into this build.
    ///
    /// This is an upper bound; the window may still find out that the GPU backend can't run.
    pub fn detect() -> Self {
        if cfg!(feature = "gpu") {
            Self::with_gpu(GpuApi::Gl)
        } else {
            Self::raster_only()
        }
    }

    /// The backend to start with: the GPU if there is one.
    pub fn initial_backend(&self) -> BackendKind {
        self.gpu.map_or(BackendKind::Raster, BackendKind::Gpu)
    }

    /// The backend to switch to from `current`.
    pub fn toggle(&self, current: BackendKind) -> Result<BackendKind, Error> {
        match current {
            BackendKind::Raster => self.gpu.map(BackendKind::Gpu).ok_or(Error::NoGpuBackend),
            BackendKind::Gpu(_) => Ok(BackendKind::Raster),
        }
    }

    /// Whether `kind` can be attached.
    pub fn supports(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::Raster => true,
            BackendKind::Gpu(api) => self.gpu == Some(api),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(BackendKind::Raster.to_string(), "Raster");
        assert_eq!(BackendKind::Gpu(GpuApi::Gl).to_string(), "GL");
        assert_eq!(BackendKind::Gpu(GpuApi::Vulkan).to_string(), "Vulkan");
        assert_eq!(
            BackendKind::Gpu(GpuApi::Unknown).to_string(),
            "Unknown GPU backend"
        );
    }

    #[test]
    fn prefers_the_gpu() {
        assert_eq!(
            Capabilities::with_gpu(GpuApi::Vulkan).initial_backend(),
            BackendKind::Gpu(GpuApi::Vulkan)
        );
        assert_eq!(
            Capabilities::raster_only().initial_backend(),
            BackendKind::Raster
        );
    }

    #[test]
    fn toggle_switches_between_raster_and_gpu() {
        let caps = Capabilities::with_gpu(GpuApi::Gl);
        let gpu = caps.toggle(BackendKind::Raster).unwrap();

        assert_eq!(gpu, BackendKind::Gpu(GpuApi::Gl));
        assert_eq!(caps.toggle(gpu).unwrap(), BackendKind::Raster);
    }

    #[test]
    fn toggle_without_gpu_fails() {
        let caps = Capabilities::raster_only();

        assert!(matches!(
            caps.toggle(BackendKind::Raster),
            Err(Error::NoGpuBackend)
        ));
        assert!(!caps.supports(BackendKind::Gpu(GpuApi::Gl)));
        assert!(caps.supports(BackendKind::Raster));
    }

    #[test]
    fn detect_matches_build() {
        assert_eq!(Capabilities::detect().gpu.is_some(), cfg!(feature = "gpu"));
    }
}
