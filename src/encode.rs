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

//! Saving frames as image files.

use crate::surface::{AlphaType, PixelView};
use crate::Error;

use image::codecs::png::{self, CompressionType, FilterType};
use image::{ColorType, ImageEncoder as _};
use tiny_skia::PremultipliedColorU8;

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes pixels into an image format.
pub trait ImageEncoder {
    /// Encode `pixels` into `out`.
    fn encode(&self, pixels: &PixelView<'_>, out: &mut dyn Write) -> Result<(), Error>;
}

impl<E: ImageEncoder + ?Sized> ImageEncoder for &E {
    fn encode(&self, pixels: &PixelView<'_>, out: &mut dyn Write) -> Result<(), Error> {
        (**self).encode(pixels, out)
    }
}

/// Settings for PNG output.
#[derive(Debug, Clone, Copy)]
pub struct PngOptions {
    /// How hard to compress.
    pub compression: CompressionType,

    /// The row filter.
    pub filter: FilterType,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Encodes pixels as RGBA8 PNG files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder {
    options: PngOptions,
}

impl PngEncoder {
    /// Create an encoder with the given options.
    pub fn new(options: PngOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &PngOptions {
        &self.options
    }
}

impl ImageEncoder for PngEncoder {
    fn encode(&self, pixels: &PixelView<'_>, out: &mut dyn Write) -> Result<(), Error> {
        let data = unpremultiplied(pixels);

        png::PngEncoder::new_with_quality(out, self.options.compression, self.options.filter)
            .write_image(&data, pixels.width(), pixels.height(), ColorType::Rgba8)?;

        Ok(())
    }
}

/// The pixel data with alpha no longer multiplied into the colors.
fn unpremultiplied<'a>(pixels: &PixelView<'a>) -> Cow<'a, [u8]> {
    match pixels.alpha_type() {
        AlphaType::Unpremultiplied => Cow::Borrowed(pixels.data()),
        AlphaType::Premultiplied => Cow::Owned(
            pixels
                .data()
                .chunks_exact(4)
                .flat_map(|px| {
                    match PremultipliedColorU8::from_rgba(px[0], px[1], px[2], px[3]) {
                        Some(color) => {
                            let color = color.demultiply();
                            [color.red(), color.green(), color.blue(), color.alpha()]
                        }

                        // Channels above alpha; the data wasn't premultiplied after all.
                        None => [px[0], px[1], px[2], px[3]],
                    }
                })
                .collect(),
        ),
    }
}

/// Encode `pixels` into the file at `path`, replacing it if it exists.
pub fn save_png(
    path: &Path,
    pixels: &PixelView<'_>,
    encoder: &impl ImageEncoder,
) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    encoder.encode(pixels, &mut out)?;
    out.flush().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demultiplies_premultiplied_views() {
        let data = [0x40, 0x20, 0x00, 0x80, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0];
        let view = PixelView::new(3, 1, &data, AlphaType::Premultiplied).unwrap();

        let out = unpremultiplied(&view);
        assert_eq!(&out[4..], &[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]);
        assert_eq!(out[3], 0x80);
        assert!((out[0] as i16 - 0x80).abs() <= 1);
        assert!((out[1] as i16 - 0x40).abs() <= 1);
    }

    #[test]
    fn unpremultiplied_views_are_borrowed() {
        let data = [1, 2, 3, 4];
        let view = PixelView::new(1, 1, &data, AlphaType::Unpremultiplied).unwrap();

        assert!(matches!(unpremultiplied(&view), Cow::Borrowed(_)));
    }

    #[test]
    fn writes_a_decodable_png() {
        let mut data = Vec::new();
        for y in 0..4u8 {
            for x in 0..6u8 {
                data.extend_from_slice(&[x * 40, y * 60, 0x00, 0xFF]);
            }
        }
        let view = PixelView::new(6, 4, &data, AlphaType::Premultiplied).unwrap();

        let mut bytes = Vec::new();
        PngEncoder::default().encode(&view, &mut bytes).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (6, 4));
        assert_eq!(decoded.get_pixel(5, 3).0, [200, 180, 0, 255]);
    }

    #[test]
    fn options_change_the_output_not_the_pixels() {
        let data = [0x10, 0x20, 0x30, 0xFF].repeat(64);
        let view = PixelView::new(8, 8, &data, AlphaType::Unpremultiplied).unwrap();

        let fast = PngEncoder::new(PngOptions {
            compression: CompressionType::Fast,
            filter: FilterType::NoFilter,
        });
        assert_eq!(fast.options().compression, CompressionType::Fast);
        assert_eq!(PngEncoder::default().options().filter, FilterType::Adaptive);

        let mut bytes = Vec::new();
        fast.encode(&view, &mut bytes).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.into_raw(), data);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let data = [0u8; 4];
        let view = PixelView::new(1, 1, &data, AlphaType::Unpremultiplied).unwrap();
        let path = std::env::temp_dir()
            .join("hello-frame-does-not-exist")
            .join("nested")
            .join("frame.png");

        let err = save_png(&path, &view, &PngEncoder::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
