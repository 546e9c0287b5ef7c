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

//! The contract between the demo and the window it draws into.

use crate::backend::BackendKind;
use crate::surface::Surface;
use crate::Error;

/// Requested properties of the window and its drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayParams {
    /// The initial width of the window, in physical pixels.
    pub width: u32,

    /// The initial height of the window, in physical pixels.
    pub height: u32,

    /// The number of samples per pixel for multisampling, or zero for none.
    pub msaa_samples: u8,

    /// Whether presenting waits for the vertical blank.
    pub vsync: bool,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            msaa_samples: 0,
            vsync: true,
        }
    }
}

/// A native window that a rendering backend can be attached to.
///
/// At most one backend is attached at a time.
pub trait Window {
    /// Request display properties for backends attached from now on.
    fn set_display_params(&mut self, params: DisplayParams);

    /// Attach a rendering backend.
    ///
    /// Once the backend is ready, [`Layer::on_backend_created`] is called.
    fn attach(&mut self, backend: BackendKind) -> Result<(), Error>;

    /// Detach the current backend, if any.
    fn detach(&mut self);

    /// The backend currently attached.
    fn attached(&self) -> Option<BackendKind>;

    /// Make the window visible.
    fn show(&mut self);

    /// Request a repaint.
    fn invalidate(&mut self);

    /// Set the title bar text.
    fn set_title(&mut self, title: &str);
}

impl<W: Window + ?Sized> Window for &mut W {
    fn set_display_params(&mut self, params: DisplayParams) {
        (**self).set_display_params(params)
    }

    fn attach(&mut self, backend: BackendKind) -> Result<(), Error> {
        (**self).attach(backend)
    }

    fn detach(&mut self) {
        (**self).detach()
    }

    fn attached(&self) -> Option<BackendKind> {
        (**self).attached()
    }

    fn show(&mut self) {
        (**self).show()
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }

    fn set_title(&mut self, title: &str) {
        (**self).set_title(title)
    }
}

/// Keyboard modifiers held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Either shift key.
    pub shift: bool,

    /// Either control key.
    pub control: bool,

    /// Either alt or option key.
    pub alt: bool,

    /// The Windows, Command or Super key.
    pub logo: bool,
}

/// What the window should do after a paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Keep running.
    Continue,

    /// Shut down and exit the process successfully.
    Exit,
}

/// Receives the callbacks of a window.
pub trait Layer {
    /// Called once each time a backend finishes attaching.
    fn on_backend_created(&mut self);

    /// Called when the window needs to be redrawn.
    fn on_paint(&mut self, surface: &mut dyn Surface) -> Flow;

    /// Called when there are no other events to handle.
    fn on_idle(&mut self);

    /// Called for each character typed into the window.
    ///
    /// Returns `true` if the character was handled.
    fn on_char(&mut self, character: char, modifiers: Modifiers) -> bool;
}
