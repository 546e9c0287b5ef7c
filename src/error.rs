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

//! The error type shared by the demo's collaborators.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// An error that occurred while drawing, presenting or saving a frame.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A GPU backend was requested, but none is available in this build.
    NoGpuBackend,

    /// A backend was attached to a window that already has one.
    AlreadyAttached,

    /// A file could not be opened or written to.
    Io {
        /// The file that we tried to open.
        path: PathBuf,

        /// The underlying I/O error.
        source: io::Error,
    },

    /// The pixel data could not be encoded.
    Encode(image::ImageError),

    /// The drawing backend reported an error.
    Render(piet::Error),

    /// A surface could not be created or read back.
    Surface(String),

    /// The OpenGL context reported an error.
    Gl(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGpuBackend => f.write_str("No GPU backend configured"),
            Self::AlreadyAttached => f.write_str("a backend is already attached"),
            Self::Io { path, source } => {
                write!(f, "could not write {}: {}", path.display(), source)
            }
            Self::Encode(err) => write!(f, "PNG encoding failed: {err}"),
            Self::Render(err) => write!(f, "rendering failed: {err}"),
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
            Self::Gl(msg) => write!(f, "gl error: {msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<piet::Error> for Error {
    fn from(err: piet::Error) -> Self {
        Self::Render(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err)
    }
}

/// Convert the stringly-typed errors that `glow` returns.
pub(crate) trait ResultExt<T> {
    fn gl_err(self) -> Result<T, Error>;
}

impl<T> ResultExt<T> for Result<T, String> {
    fn gl_err(self) -> Result<T, Error> {
        self.map_err(Error::Gl)
    }
}
