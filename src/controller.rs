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

//! The demo itself: draw one frame, maybe save it, and quit.

use crate::backend::{BackendKind, Capabilities};
use crate::canvas::Canvas;
use crate::encode::{self, ImageEncoder, PngEncoder};
use crate::surface::Surface;
use crate::window::{DisplayParams, Flow, Layer, Modifiers, Window};
use crate::{graphics, scene, Error};

use std::path::PathBuf;

/// How far the text turns each frame, in degrees.
pub const ROTATION_STEP: f64 = 0.2;

/// Knobs for the demo.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoOptions {
    /// The window's display properties.
    pub display: DisplayParams,

    /// Where screenshots are written.
    pub screenshot_dir: PathBuf,

    /// Whether the first frame is saved without pressing `s`.
    pub save_first_frame: bool,

    /// Whether the process exits once the first frame is drawn.
    pub exit_after_first_frame: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            display: DisplayParams::default(),
            screenshot_dir: PathBuf::from("."),
            save_first_frame: true,
            exit_after_first_frame: true,
        }
    }
}

/// The file name a frame's screenshot is saved under.
pub fn screenshot_name(frame: u64) -> String {
    format!("helloworld-{frame}.png")
}

/// Draws the demo frame into a window and reacts to its input.
pub struct Controller<W: Window, E: ImageEncoder = PngEncoder> {
    /// The window we draw into.
    window: W,

    /// Encoder for screenshots.
    encoder: E,

    /// The backends we may switch between.
    capabilities: Capabilities,

    /// The backend that is selected.
    backend: BackendKind,

    /// The rotation of the text, in degrees within `[0, 360)`.
    rotation: f64,

    /// Whether the next paint should be saved.
    save_screenshot: bool,

    /// The index of the next frame to be painted.
    frame: u64,

    /// The options we were created with.
    options: DemoOptions,
}

impl<W: Window> Controller<W> {
    /// Set up the window and attach the preferred backend.
    pub fn new(window: W, capabilities: Capabilities, options: DemoOptions) -> Self {
        Self::with_encoder(window, capabilities, options, PngEncoder::default())
    }
}

impl<W: Window, E: ImageEncoder> Controller<W, E> {
    /// Set up the window, saving screenshots with `encoder`.
    pub fn with_encoder(
        mut window: W,
        capabilities: Capabilities,
        options: DemoOptions,
        encoder: E,
    ) -> Self {
        graphics::init();

        window.set_display_params(options.display);

        let backend = capabilities.initial_backend();
        tracing::debug!(%backend, "attaching initial backend");
        if let Err(err) = window.attach(backend) {
            tracing::error!(%backend, "failed to attach backend: {}", err);
        }

        Self {
            window,
            encoder,
            capabilities,
            backend,
            rotation: 0.0,
            save_screenshot: options.save_first_frame,
            frame: 0,
            options,
        }
    }

    /// The selected backend.
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// The current rotation of the text, in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Whether the next paint will be saved.
    pub fn screenshot_pending(&self) -> bool {
        self.save_screenshot
    }

    /// The index of the next frame.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The options in use.
    pub fn options(&self) -> &DemoOptions {
        &self.options
    }

    /// The window.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// The window, mutably.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// The window title for the selected backend.
    pub fn title(&self) -> String {
        format!("Hello World {}", self.backend)
    }

    fn advance_rotation(&mut self) -> f64 {
        self.rotation = (self.rotation + ROTATION_STEP).rem_euclid(360.0);
        self.rotation
    }

    fn toggle_backend(&mut self) {
        let next = match self.capabilities.toggle(self.backend) {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!("{}", err);
                return;
            }
        };

        tracing::info!(from = %self.backend, to = %next, "switching backend");
        self.window.detach();
        match self.window.attach(next) {
            Ok(()) => self.backend = next,
            Err(err) => {
                tracing::error!(backend = %next, "failed to attach backend: {}", err);

                // The selection always names the attached backend.
                if let Err(err) = self.window.attach(self.backend) {
                    tracing::error!(
                        backend = %self.backend,
                        "failed to reattach backend, the window has none: {}",
                        err
                    );
                }
            }
        }
    }

    fn write_screenshot(&self, surface: &mut dyn Surface) -> Result<PathBuf, Error> {
        let path = self
            .options
            .screenshot_dir
            .join(screenshot_name(self.frame));

        let pixels = surface.peek_pixels()?;
        encode::save_png(&path, &pixels, &self.encoder)?;

        Ok(path)
    }
}

impl<W: Window, E: ImageEncoder> Layer for Controller<W, E> {
    fn on_backend_created(&mut self) {
        let title = self.title();
        self.window.set_title(&title);
        self.window.show();
        self.window.invalidate();
    }

    fn on_paint(&mut self, surface: &mut dyn Surface) -> Flow {
        let rotation = self.advance_rotation();
        let frame = self.frame;

        if let Err(err) = surface.draw(&mut |canvas: &mut dyn Canvas| {
            scene::draw(canvas, rotation, frame)
        }) {
            tracing::error!(frame, "drawing failed: {}", err);
        }

        if self.save_screenshot {
            match self.write_screenshot(surface) {
                Ok(path) => tracing::info!(frame, "saved {}", path.display()),
                Err(err) => tracing::error!(frame, "could not save screenshot: {}", err),
            }
        }
        self.save_screenshot = false;
        self.frame += 1;

        if self.options.exit_after_first_frame {
            Flow::Exit
        } else {
            Flow::Continue
        }
    }

    fn on_idle(&mut self) {
        self.window.invalidate();
    }

    fn on_char(&mut self, character: char, _modifiers: Modifiers) -> bool {
        match character {
            ' ' => self.toggle_backend(),
            's' => self.save_screenshot = true,
            _ => {}
        }

        true
    }
}

impl<W: Window, E: ImageEncoder> Drop for Controller<W, E> {
    fn drop(&mut self) {
        self.window.detach();
    }
}
