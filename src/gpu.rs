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

//! The OpenGL rendering backend, drawn with `piet-glow`.

use crate::canvas::Canvas;
use crate::piet_canvas::PietCanvas;
use crate::surface::{AlphaType, PixelView, Surface};
use crate::{gl, Error};

use glow::HasContext;
use piet_glow::GlContext;

/// The default framebuffer of a window, drawn on by the GPU.
pub struct GlSurface<'a> {
    /// The `piet-glow` renderer.
    renderer: &'a mut GlContext<glow::Context>,

    /// The size of the framebuffer.
    size: (u32, u32),

    /// Pixels read back from the framebuffer, top row first.
    readback: Vec<u8>,
}

impl<'a> GlSurface<'a> {
    /// Wrap the current framebuffer.
    ///
    /// # Safety
    ///
    /// The context behind `renderer` must stay current for as long as the surface is alive.
    pub unsafe fn new(renderer: &'a mut GlContext<glow::Context>, width: u32, height: u32) -> Self {
        Self {
            renderer,
            size: (width, height),
            readback: Vec::new(),
        }
    }
}

impl Surface for GlSurface<'_> {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn draw(&mut self, f: &mut dyn FnMut(&mut dyn Canvas)) -> Result<(), Error> {
        let (width, height) = self.size;

        // SAFETY: the context is current, as promised in `new`.
        let mut rc = unsafe { self.renderer.render_context(width, height) };
        let mut canvas = PietCanvas::new(&mut rc);
        f(&mut canvas);
        canvas.finish()
    }

    fn peek_pixels(&mut self) -> Result<PixelView<'_>, Error> {
        let (width, height) = self.size;
        let stride = width as usize * 4;
        let mut bottom_up = vec![0u8; stride * height as usize];

        let context = self.renderer.context();
        unsafe {
            context.pixel_store_i32(glow::PACK_ALIGNMENT, 4);
            context.read_pixels(
                0,
                0,
                width as i32,
                height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut bottom_up),
            );
        }
        gl::check_error(context, "glReadPixels")?;

        self.readback.clear();
        self.readback.reserve(bottom_up.len());
        for row in bottom_up.chunks_exact(stride.max(1)).rev() {
            self.readback.extend_from_slice(row);
        }

        PixelView::new(width, height, &self.readback, AlphaType::Premultiplied)
    }
}
