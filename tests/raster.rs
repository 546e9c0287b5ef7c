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

//! Software rendering, all the way to a PNG on disk.

use hello_frame::piet::kurbo::Point;
use hello_frame::piet::Color;
use hello_frame::{
    scene, Canvas, Capabilities, Controller, DemoOptions, DisplayParams, Error, Flow, Layer,
    Font, Paint, PixelView, PngEncoder, RasterSurface, Shader, Surface, TileMode, Window,
};

use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "hello-frame-raster-{}-{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Text can only be shaped if the system has at least one font.
fn has_system_fonts() -> bool {
    let fonts = cosmic_text::FontSystem::new();
    if fonts.db().len() == 0 {
        eprintln!("no system fonts found, skipping");
        return false;
    }

    true
}

/// Whether any pixel in `x0..x1`, `y0..y1` is dark.
fn any_ink(view: &PixelView<'_>, (x0, x1): (u32, u32), (y0, y1): (u32, u32)) -> bool {
    (y0..y1).any(|y| {
        (x0..x1).any(|x| {
            matches!(view.pixel(x, y), Some([r, g, b, _]) if r.max(g).max(b) < 0x80)
        })
    })
}

fn draw_message(surface: &mut RasterSurface, degrees: f64) {
    let font = Font {
        size: 20.0,
        subpixel: true,
    };

    surface
        .draw(&mut |canvas: &mut dyn Canvas| {
            canvas.clear(Color::WHITE);
            canvas.save();
            canvas.rotate(degrees);
            canvas.draw_text(
                "Hello World",
                Point::ORIGIN,
                &font,
                &Paint::solid(Color::BLACK).with_anti_alias(true),
            );
            canvas.restore();
        })
        .unwrap();
}

#[test]
fn unrotated_text_sits_above_the_top_edge() {
    if !has_system_fonts() {
        return;
    }

    let mut surface = RasterSurface::new(200, 200).unwrap();
    draw_message(&mut surface, 0.0);

    // The baseline is the top edge, so only glyph bottoms could bleed in.
    let view = surface.peek_pixels().unwrap();
    assert!(!any_ink(&view, (0, 200), (2, 200)));
}

#[test]
fn rotated_text_runs_down_the_left_edge() {
    if !has_system_fonts() {
        return;
    }

    let mut surface = RasterSurface::new(200, 200).unwrap();
    draw_message(&mut surface, 90.0);

    // Turned clockwise, the side above the baseline faces right, into the surface.
    let view = surface.peek_pixels().unwrap();
    assert!(any_ink(&view, (0, 30), (0, 150)));
    assert!(!any_ink(&view, (40, 200), (0, 200)));
}

/// The scene without the text, so that no system fonts are needed.
fn draw_shapes(canvas: &mut dyn Canvas) {
    canvas.clear(scene::BACKGROUND);
    canvas.fill_rect(scene::RECT, &Paint::solid(scene::RECT_COLOR));
    canvas.fill_circle(
        scene::CIRCLE_CENTER,
        scene::CIRCLE_RADIUS,
        &Paint::solid(scene::RECT_COLOR)
            .with_shader(Shader::linear_gradient(
                scene::GRADIENT_POINTS,
                scene::GRADIENT_COLORS,
                TileMode::Mirror,
            ))
            .with_anti_alias(true),
    );
}

#[test]
fn shapes_survive_the_trip_to_png() {
    let dir = scratch_dir("shapes");
    let path = dir.join("shapes.png");

    let mut surface = RasterSurface::new(300, 300).unwrap();
    surface.draw(&mut draw_shapes).unwrap();

    let pixels = surface.peek_pixels().unwrap();
    hello_frame::save_png(&path, &pixels, &PngEncoder::default()).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (300, 300));

    // Background and square.
    assert_eq!(image.get_pixel(2, 2).0, [0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(image.get_pixel(20, 20).0, [0xFF, 0x00, 0x00, 0xFF]);
    assert_eq!(image.get_pixel(299, 299).0, [0xFF, 0xFF, 0xFF, 0xFF]);

    // The circle's center sits two thirds of the way from green to black.
    let [r, g, b, a] = image.get_pixel(200, 200).0;
    assert_eq!((r, b, a), (0, 0, 0xFF));
    assert!((70..=100).contains(&g), "unexpected green {g}");

    // Toward the upper left of the circle the gradient is brighter.
    let [_, upper, _, _] = image.get_pixel(160, 160).0;
    assert!(upper > g, "{upper} should be brighter than {g}");
}

#[test]
fn drawing_twice_starts_from_a_clean_slate() {
    let mut surface = RasterSurface::new(16, 16).unwrap();

    surface
        .draw(&mut |canvas: &mut dyn Canvas| canvas.clear(Color::BLACK))
        .unwrap();
    surface
        .draw(&mut |canvas: &mut dyn Canvas| canvas.clear(Color::WHITE))
        .unwrap();

    let pixels = surface.peek_pixels().unwrap();
    assert!(pixels.data().iter().all(|&b| b == 0xFF));
}

/// A window that is always happy to attach anything.
#[derive(Default)]
struct Headless {
    attached: Option<hello_frame::BackendKind>,
}

impl Window for Headless {
    fn set_display_params(&mut self, _params: DisplayParams) {}

    fn attach(&mut self, backend: hello_frame::BackendKind) -> Result<(), Error> {
        self.attached = Some(backend);
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = None;
    }

    fn attached(&self) -> Option<hello_frame::BackendKind> {
        self.attached
    }

    fn show(&mut self) {}

    fn invalidate(&mut self) {}

    fn set_title(&mut self, _title: &str) {}
}

#[test]
fn controller_saves_the_first_frame() {
    if !has_system_fonts() {
        return;
    }

    let dir = scratch_dir("controller");
    let mut controller = Controller::new(
        Headless::default(),
        Capabilities::raster_only(),
        DemoOptions {
            screenshot_dir: dir.clone(),
            ..DemoOptions::default()
        },
    );
    let mut surface = RasterSurface::new(800, 600).unwrap();

    assert_eq!(controller.on_paint(&mut surface), Flow::Exit);

    let image = image::open(dir.join("helloworld-0.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (800, 600));
    assert_eq!(image.get_pixel(20, 20).0, [0xFF, 0x00, 0x00, 0xFF]);
    assert_eq!(image.get_pixel(700, 500).0, [0xFF, 0xFF, 0xFF, 0xFF]);
}
