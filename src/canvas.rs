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

//! The drawing interface the demo draws its frame with.

use crate::gradient::{LinearGradient, TileMode};
use crate::Error;

use piet::kurbo::{Point, Rect};
use piet::Color;

/// A surface that can be drawn on.
///
/// Draw calls do not fail on their own. The first error a backend runs into is held on to and
/// returned from [`Canvas::finish`].
pub trait Canvas {
    /// Fill the whole surface with a color, ignoring the transform.
    fn clear(&mut self, color: Color);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Draw a line of text with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, font: &Font, paint: &Paint);

    /// Push the current transform onto the stack.
    fn save(&mut self);

    /// Rotate the current transform clockwise, in degrees.
    fn rotate(&mut self, degrees: f64);

    /// Pop the transform pushed by the last [`Canvas::save`].
    fn restore(&mut self);

    /// Flush any pending drawing and report the first error, if any.
    fn finish(&mut self) -> Result<(), Error>;
}

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// The solid color, used when there is no shader.
    pub color: Color,

    /// A shader that overrides the color.
    pub shader: Option<Shader>,

    /// Whether edges should be anti-aliased.
    pub anti_alias: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            shader: None,
            anti_alias: false,
        }
    }
}

impl Paint {
    /// A paint that fills with a single color.
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Set the shader.
    pub fn with_shader(mut self, shader: Shader) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Set anti-aliasing.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}

/// Something that computes a color for each point of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    /// A linear gradient.
    Linear(LinearGradient),
}

impl Shader {
    /// Create a linear gradient shader.
    pub fn linear_gradient(points: [Point; 2], colors: [Color; 2], tile_mode: TileMode) -> Self {
        Self::Linear(LinearGradient::new(points, colors, tile_mode))
    }
}

/// Text settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// The font size, in points.
    pub size: f64,

    /// Whether glyphs may be placed at fractional pixel positions.
    pub subpixel: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 12.0,
            subpixel: false,
        }
    }
}
