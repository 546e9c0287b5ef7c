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

//! The software rendering backend.

use crate::canvas::Canvas;
use crate::piet_canvas::PietCanvas;
use crate::surface::{AlphaType, PixelView, Surface};
use crate::Error;

use tiny_skia::Pixmap;

/// Text is sized in pixels, like the rest of the frame.
const TEXT_DPI: f64 = 72.0;

/// A surface that lives in CPU memory and is drawn by `tiny-skia`.
pub struct RasterSurface {
    /// The pixels.
    pixmap: Pixmap,

    /// Cached drawing state, reused between frames.
    cache: piet_tiny_skia::Cache,
}

impl RasterSurface {
    /// Allocate a new surface, filled with transparent black.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            cache: piet_tiny_skia::Cache::new(),
        })
    }

    /// Resize the surface.
    ///
    /// The contents are discarded unless the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if (width, height) != self.size() {
            tracing::debug!(width, height, "resizing raster surface");
            self.pixmap = allocate(width, height)?;
        }

        Ok(())
    }

    /// The underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap, Error> {
    Pixmap::new(width, height)
        .ok_or_else(|| Error::Surface(format!("cannot allocate a {width}x{height} pixmap")))
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn draw(&mut self, f: &mut dyn FnMut(&mut dyn Canvas)) -> Result<(), Error> {
        let mut rc = self.cache.render_context(self.pixmap.as_mut());
        piet::RenderContext::text(&mut rc).set_dpi(TEXT_DPI);

        let mut canvas = PietCanvas::new(&mut rc);
        f(&mut canvas);
        canvas.finish()
    }

    fn peek_pixels(&mut self) -> Result<PixelView<'_>, Error> {
        PixelView::new(
            self.pixmap.width(),
            self.pixmap.height(),
            self.pixmap.data(),
            AlphaType::Premultiplied,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Paint;

    use piet::kurbo::{Point, Rect};
    use piet::Color;

    #[test]
    fn zero_sized_surfaces_are_rejected() {
        assert!(matches!(RasterSurface::new(0, 10), Err(Error::Surface(_))));
    }

    #[test]
    fn resize_reallocates() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        surface.resize(8, 2).unwrap();

        assert_eq!(surface.size(), (8, 2));
        assert_eq!(surface.peek_pixels().unwrap().data().len(), 8 * 2 * 4);
    }

    #[test]
    fn draws_solid_shapes() {
        let mut surface = RasterSurface::new(64, 64).unwrap();
        surface
            .draw(&mut |canvas| {
                canvas.clear(Color::WHITE);
                canvas.fill_rect(
                    Rect::new(4.0, 4.0, 20.0, 20.0),
                    &Paint::solid(Color::rgb8(0xFF, 0x00, 0x00)),
                );
                canvas.fill_circle(
                    Point::new(44.0, 44.0),
                    10.0,
                    &Paint::solid(Color::rgb8(0x00, 0x00, 0xFF)).with_anti_alias(true),
                );
            })
            .unwrap();

        let view = surface.peek_pixels().unwrap();
        assert_eq!(view.alpha_type(), AlphaType::Premultiplied);
        assert_eq!(view.pixel(0, 0), Some([0xFF, 0xFF, 0xFF, 0xFF]));
        assert_eq!(view.pixel(10, 10), Some([0xFF, 0x00, 0x00, 0xFF]));
        assert_eq!(view.pixel(44, 44), Some([0x00, 0x00, 0xFF, 0xFF]));
        assert_eq!(view.pixel(63, 0), Some([0xFF, 0xFF, 0xFF, 0xFF]));
        assert_eq!(view.pixel(64, 0), None);
    }

    #[test]
    fn restore_undoes_rotation() {
        let mut surface = RasterSurface::new(32, 32).unwrap();
        surface
            .draw(&mut |canvas| {
                canvas.clear(Color::WHITE);
                canvas.save();
                canvas.rotate(90.0);
                canvas.restore();
                canvas.fill_rect(
                    Rect::new(0.0, 0.0, 8.0, 8.0),
                    &Paint::solid(Color::BLACK),
                );
            })
            .unwrap();

        // Rotating by 90 degrees would have moved the square off the surface.
        let view = surface.peek_pixels().unwrap();
        assert_eq!(view.pixel(4, 4), Some([0x00, 0x00, 0x00, 0xFF]));
    }
}
