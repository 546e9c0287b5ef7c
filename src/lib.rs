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

//! A single-frame 2D drawing demo on top of [`piet`].
//!
//! The demo opens a window, attaches a rendering backend, draws a red square, a circle shaded
//! with a mirrored gradient and a line of rotated text, optionally saves the result as
//! `helloworld-<frame>.png`, and exits. Pressing space switches between software ("raster") and
//! GPU rendering; pressing `s` arms the screenshot.
//!
//! The centerpiece is the [`Controller`], which implements [`Layer`] on top of any [`Window`].
//! Drawing goes through the [`Canvas`] trait, which [`PietCanvas`] implements for every
//! [`piet::RenderContext`]:
//!
//! - [`RasterSurface`] draws with [`piet-tiny-skia`] into CPU memory.
//! - `GlSurface` draws with [`piet-glow`] into an OpenGL framebuffer (feature `gpu`).
//!
//! [`platform::run`] drives everything with a `winit` event loop and a `glutin` context.
//!
//! Note that this crate uses thread-unsafe primitives. UI work is pinned to one thread anyways.
//!
//! [`piet-tiny-skia`]: https://crates.io/crates/piet-tiny-skia
//! [`piet-glow`]: https://crates.io/crates/piet-glow

#![forbid(rust_2018_idioms)]

pub use piet;

mod backend;
mod canvas;
mod controller;
mod encode;
mod error;
mod gl;
mod gradient;
pub mod graphics;
mod piet_canvas;
pub mod platform;
mod raster;
pub mod scene;
mod surface;
mod window;

#[cfg(feature = "gpu")]
mod gpu;

pub use self::backend::{BackendKind, Capabilities, GpuApi};
pub use self::canvas::{Canvas, Font, Paint, Shader};
pub use self::controller::{screenshot_name, Controller, DemoOptions, ROTATION_STEP};
pub use self::encode::{save_png, ImageEncoder, PngEncoder, PngOptions};
pub use self::error::Error;
pub use self::gradient::{LinearGradient, TileMode};
pub use self::piet_canvas::PietCanvas;
pub use self::raster::RasterSurface;
pub use self::surface::{AlphaType, PixelView, Surface};
pub use self::window::{DisplayParams, Flow, Layer, Modifiers, Window};

#[cfg(feature = "gpu")]
pub use self::gpu::GlSurface;
