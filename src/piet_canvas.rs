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

//! A [`Canvas`] on top of any [`piet`] backend.

use crate::canvas::{Canvas, Font, Paint, Shader};
use crate::{graphics, Error};

use piet::kurbo::{Affine, Circle, Point, Rect, Shape, Vec2};
use piet::{Color, RenderContext, Text as _, TextLayout as _, TextLayoutBuilder as _};

use std::mem;

/// Adapts a [`piet::RenderContext`] to the [`Canvas`] interface.
pub struct PietCanvas<'a, R: RenderContext> {
    /// The backend being drawn with.
    rc: &'a mut R,

    /// The first error recorded, or `Ok(())` if none have occurred.
    status: Result<(), Error>,
}

impl<'a, R: RenderContext> PietCanvas<'a, R> {
    /// Wrap a render context.
    pub fn new(rc: &'a mut R) -> Self {
        Self { rc, status: Ok(()) }
    }

    fn record(&mut self, result: Result<(), piet::Error>) {
        if let Err(err) = result {
            if self.status.is_ok() {
                self.status = Err(err.into());
            }
        }
    }

    fn brush(&mut self, paint: &Paint, bounds: Rect) -> Result<R::Brush, piet::Error> {
        match &paint.shader {
            None => Ok(self.rc.solid_brush(paint.color.clone())),
            Some(Shader::Linear(gradient)) => self.rc.gradient(gradient.to_piet(bounds)),
        }
    }

    fn fill_shape(&mut self, shape: impl Shape, paint: &Paint) {
        // piet backends always anti-alias, so `paint.anti_alias` has nothing to switch here.
        match self.brush(paint, shape.bounding_box()) {
            Ok(brush) => self.rc.fill(shape, &brush),
            Err(err) => self.record(Err(err)),
        }
    }
}

impl<R: RenderContext> Canvas for PietCanvas<'_, R> {
    fn clear(&mut self, color: Color) {
        self.rc.clear(None, color);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.fill_shape(rect, paint);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.fill_shape(Circle::new(center, radius), paint);
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: &Font, paint: &Paint) {
        let family = graphics::init().font_family().clone();
        let layout = self
            .rc
            .text()
            .new_text_layout(text.to_owned())
            .font(family, font.size)
            .text_color(paint.color.clone())
            .build();

        match layout {
            Ok(layout) => {
                // piet places the top of the layout at the given point.
                let baseline = layout.line_metric(0).map_or(0.0, |metric| metric.baseline);
                self.rc.draw_text(&layout, origin - Vec2::new(0.0, baseline));
            }
            Err(err) => self.record(Err(err)),
        }
    }

    fn save(&mut self) {
        let result = self.rc.save();
        self.record(result);
    }

    fn rotate(&mut self, degrees: f64) {
        self.rc.transform(Affine::rotate(degrees.to_radians()));
    }

    fn restore(&mut self) {
        let result = self.rc.restore();
        self.record(result);
    }

    fn finish(&mut self) -> Result<(), Error> {
        let result = self.rc.finish();
        self.record(result);
        let result = self.rc.status();
        self.record(result);

        mem::replace(&mut self.status, Ok(()))
    }
}
