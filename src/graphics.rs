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

//! Process-wide graphics state.
//!
//! This is set up once, the first time anything asks for it, and lives until the process exits.
//! There is no teardown.

use once_cell::sync::OnceCell;
use piet::FontFamily;

static GRAPHICS: OnceCell<Graphics> = OnceCell::new();

/// Shared configuration for every canvas in the process.
#[derive(Debug)]
pub struct Graphics {
    /// The font family used for text when none is given.
    font_family: FontFamily,
}

impl Graphics {
    /// The font family used for text.
    pub fn font_family(&self) -> &FontFamily {
        &self.font_family
    }
}

/// Initialize the graphics subsystem.
///
/// Calling this more than once is harmless; later calls return the same instance.
pub fn init() -> &'static Graphics {
    GRAPHICS.get_or_init(|| {
        tracing::debug!("initializing graphics subsystem");

        Graphics {
            font_family: FontFamily::SANS_SERIF,
        }
    })
}

/// Whether [`init`] has already run in this process.
pub fn is_initialized() -> bool {
    GRAPHICS.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let first = init() as *const Graphics;
        let second = init() as *const Graphics;

        assert_eq!(first, second);
        assert!(is_initialized());
        assert_eq!(*init().font_family(), FontFamily::SANS_SERIF);
    }
}
