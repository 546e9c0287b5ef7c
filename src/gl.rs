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

//! OpenGL helpers shared by the raster presenter and the GPU surface.

use crate::error::ResultExt;
use crate::Error;

use glow::HasContext;
use tiny_skia::Pixmap;

/// Turn the current GL error flag into a `Result`.
pub(crate) fn check_error(gl: &(impl HasContext + ?Sized), call: &str) -> Result<(), Error> {
    let err = unsafe { gl.get_error() };

    if err == glow::NO_ERROR {
        return Ok(());
    }

    let error_str = match err {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "Unknown GL error",
    };

    Err(Error::Gl(format!("{call}: {error_str}")))
}

/// Copies a CPU-side pixmap onto the default framebuffer.
///
/// The pixmap is uploaded into a texture, which is attached to a read framebuffer and blitted
/// with the rows flipped, since GL counts rows from the bottom.
pub(crate) struct Blitter<H: HasContext + ?Sized> {
    texture: H::Texture,
    framebuffer: H::Framebuffer,
}

impl<H: HasContext + ?Sized> Blitter<H> {
    /// Create the texture and framebuffer.
    ///
    /// # Safety
    ///
    /// `gl` must be current.
    pub(crate) unsafe fn new(gl: &H) -> Result<Self, Error> {
        let texture = gl.create_texture().gl_err()?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::NEAREST as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::NEAREST as i32,
        );
        gl.bind_texture(glow::TEXTURE_2D, None);

        let framebuffer = match gl.create_framebuffer().gl_err() {
            Ok(framebuffer) => framebuffer,
            Err(err) => {
                gl.delete_texture(texture);
                return Err(err);
            }
        };

        Ok(Self {
            texture,
            framebuffer,
        })
    }

    /// Upload `pixmap` and copy it to the default framebuffer.
    ///
    /// # Safety
    ///
    /// `gl` must be the current context this blitter was created with.
    pub(crate) unsafe fn present(&self, gl: &H, pixmap: &Pixmap) -> Result<(), Error> {
        let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);

        gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            width,
            height,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            Some(pixmap.data()),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
        check_error(gl, "glTexImage2D")?;

        gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.framebuffer));
        gl.framebuffer_texture_2d(
            glow::READ_FRAMEBUFFER,
            glow::COLOR_ATTACHMENT0,
            glow::TEXTURE_2D,
            Some(self.texture),
            0,
        );
        gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None);
        gl.blit_framebuffer(
            0,
            0,
            width,
            height,
            0,
            height,
            width,
            0,
            glow::COLOR_BUFFER_BIT,
            glow::NEAREST,
        );
        gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);

        check_error(gl, "glBlitFramebuffer")
    }

    /// Release the GL objects.
    ///
    /// # Safety
    ///
    /// `gl` must be the current context this blitter was created with.
    pub(crate) unsafe fn destroy(self, gl: &H) {
        gl.delete_framebuffer(self.framebuffer);
        gl.delete_texture(self.texture);
    }
}
