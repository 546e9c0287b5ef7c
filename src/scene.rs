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

//! The picture drawn on every frame.

use crate::canvas::{Canvas, Font, Paint, Shader};
use crate::gradient::TileMode;

use piet::kurbo::{Point, Rect};
use piet::Color;

/// The background color.
pub const BACKGROUND: Color = Color::WHITE;

/// The red square.
pub const RECT: Rect = Rect::new(10.0, 10.0, 138.0, 138.0);

/// The color of the red square.
pub const RECT_COLOR: Color = Color::rgb8(0xFF, 0x00, 0x00);

/// The end points of the circle's gradient.
pub const GRADIENT_POINTS: [Point; 2] = [Point::new(0.0, 0.0), Point::new(300.0, 300.0)];

/// The colors of the circle's gradient.
pub const GRADIENT_COLORS: [Color; 2] = [Color::rgb8(0x00, 0xFF, 0x00), Color::BLACK];

/// The center of the circle.
pub const CIRCLE_CENTER: Point = Point::new(200.0, 200.0);

/// The radius of the circle.
pub const CIRCLE_RADIUS: f64 = 64.0;

/// The size of the message text.
pub const TEXT_SIZE: f64 = 20.0;

/// The color of the message text.
pub const TEXT_COLOR: Color = Color::BLACK;

/// The message drawn for a frame.
pub fn message(frame: u64) -> String {
    format!("Hello World {frame}")
}

/// Draw the frame.
///
/// `rotation` is the angle of the text, in degrees.
pub fn draw(canvas: &mut dyn Canvas, rotation: f64, frame: u64) {
    canvas.clear(BACKGROUND);

    canvas.fill_rect(RECT, &Paint::solid(RECT_COLOR));

    // The gradient only lives in this paint, so later draws don't pick it up.
    let gradient = Paint::solid(RECT_COLOR)
        .with_shader(Shader::linear_gradient(
            GRADIENT_POINTS,
            GRADIENT_COLORS,
            TileMode::Mirror,
        ))
        .with_anti_alias(true);
    canvas.fill_circle(CIRCLE_CENTER, CIRCLE_RADIUS, &gradient);

    let font = Font {
        size: TEXT_SIZE,
        subpixel: true,
    };
    let text = Paint::solid(TEXT_COLOR).with_anti_alias(true);

    canvas.save();
    canvas.rotate(rotation);
    canvas.draw_text(&message(frame), Point::ORIGIN, &font, &text);
    canvas.restore();
}
