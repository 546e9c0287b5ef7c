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

//! Render targets and pixel read-back.

use crate::canvas::Canvas;
use crate::Error;

/// How the color channels of a [`PixelView`] relate to its alpha channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AlphaType {
    /// Colors have already been multiplied by alpha.
    Premultiplied,

    /// Colors are stored as-is.
    Unpremultiplied,
}

/// A read-only view of a surface's pixels.
///
/// Pixels are RGBA8, row-major and top-down, with no padding between rows.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
    alpha: AlphaType,
}

impl<'a> PixelView<'a> {
    /// Wrap a pixel buffer.
    ///
    /// Returns an error if `data` is not exactly `width * height` pixels long.
    pub fn new(width: u32, height: u32, data: &'a [u8], alpha: AlphaType) -> Result<Self, Error> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::Surface(format!(
                "expected {} bytes for a {}x{} view, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
            alpha,
        })
    }

    /// The width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel data.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// How the color channels are stored.
    pub fn alpha_type(&self) -> AlphaType {
        self.alpha
    }

    /// The RGBA value of a single pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let start = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[start..start + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// The render target handed to a paint callback.
pub trait Surface {
    /// The size of the surface, in pixels.
    fn size(&self) -> (u32, u32);

    /// Draw on the surface.
    ///
    /// The canvas is flushed after `f` returns, and any error it recorded is returned.
    fn draw(&mut self, f: &mut dyn FnMut(&mut dyn Canvas)) -> Result<(), Error>;

    /// Read back the pixels that have been drawn so far.
    fn peek_pixels(&mut self) -> Result<PixelView<'_>, Error>;
}
