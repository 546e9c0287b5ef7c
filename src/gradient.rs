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

//! Two-stop linear gradients with tiling.
//!
//! `piet` only knows how to pad a gradient past its end points. Repeated and mirrored gradients
//! are turned into padded ones by unrolling the color stops across every period the filled
//! shape can reach.

use piet::kurbo::{Point, Rect, Vec2};
use piet::{Color, FixedLinearGradient, GradientStop};

/// The most periods a tiled gradient is unrolled into.
///
/// Anything past this is padded with the color at the edge.
const MAX_PERIODS: i64 = 64;

/// How a gradient behaves outside of its two end points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum TileMode {
    /// Extend the end colors.
    #[default]
    Clamp,

    /// Start over from the first color.
    Repeat,

    /// Run back and forth between the two colors.
    Mirror,
}

impl TileMode {
    /// Map a gradient parameter onto `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Clamp => t.clamp(0.0, 1.0),
            Self::Repeat => t - t.floor(),
            Self::Mirror => {
                let t = t.rem_euclid(2.0);
                if t > 1.0 {
                    2.0 - t
                } else {
                    t
                }
            }
        }
    }
}

/// A linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    start: Point,
    end: Point,
    colors: [Color; 2],
    tile_mode: TileMode,
}

impl LinearGradient {
    /// Create a new gradient running from `points[0]` to `points[1]`.
    pub fn new(points: [Point; 2], colors: [Color; 2], tile_mode: TileMode) -> Self {
        let [start, end] = points;

        Self {
            start,
            end,
            colors,
            tile_mode,
        }
    }

    /// The two end points.
    pub fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }

    /// The two end colors.
    pub fn colors(&self) -> [Color; 2] {
        self.colors.clone()
    }

    /// The tiling mode.
    pub fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }

    fn direction(&self) -> Option<(Vec2, f64)> {
        let dir = self.end - self.start;
        let len2 = dir.hypot2();

        if len2 <= f64::EPSILON {
            None
        } else {
            Some((dir, len2))
        }
    }

    /// Project a point onto the gradient axis, before tiling.
    ///
    /// Returns `None` if both end points coincide.
    pub fn parameter(&self, point: Point) -> Option<f64> {
        let (dir, len2) = self.direction()?;
        Some((point - self.start).dot(dir) / len2)
    }

    /// The color this gradient paints at `point`.
    pub fn color_at(&self, point: Point) -> Color {
        match self.parameter(point) {
            Some(t) => lerp(&self.colors[0], &self.colors[1], self.tile_mode.apply(t)),
            None => self.colors[1].clone(),
        }
    }

    /// Convert into a padded `piet` gradient that looks the same everywhere in `bounds`.
    pub fn to_piet(&self, bounds: Rect) -> FixedLinearGradient {
        let (dir, _) = match self.direction() {
            Some(dir) => dir,
            None => {
                let last = self.colors[1].clone();
                return FixedLinearGradient {
                    start: self.start,
                    end: self.start + Vec2::new(1.0, 0.0),
                    stops: vec![stop(0.0, last.clone()), stop(1.0, last)],
                };
            }
        };

        if self.tile_mode == TileMode::Clamp {
            return FixedLinearGradient {
                start: self.start,
                end: self.end,
                stops: vec![
                    stop(0.0, self.colors[0].clone()),
                    stop(1.0, self.colors[1].clone()),
                ],
            };
        }

        // Figure out which periods the bounds touch.
        let corners = [
            bounds.origin(),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x0, bounds.y1),
            Point::new(bounds.x1, bounds.y1),
        ];
        let (t_min, t_max) = corners
            .iter()
            .filter_map(|&corner| self.parameter(corner))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            });

        let first = t_min.floor() as i64;
        let mut last = (t_max.ceil() as i64).max(first + 1);
        if last - first > MAX_PERIODS {
            tracing::warn!(
                periods = last - first,
                "gradient tiles too many times, padding past {} periods",
                MAX_PERIODS
            );
            last = first + MAX_PERIODS;
        }
        let periods = (last - first) as f64;

        let mut stops: Vec<GradientStop> = Vec::with_capacity(2 * (last - first) as usize);
        for period in first..last {
            let base = (period - first) as f64 / periods;
            let [near, far] = match (self.tile_mode, period.rem_euclid(2)) {
                (TileMode::Mirror, 1) => [self.colors[1].clone(), self.colors[0].clone()],
                _ => [self.colors[0].clone(), self.colors[1].clone()],
            };

            for (offset, color) in [(0.0, near), (1.0, far)] {
                let pos = (base + offset / periods) as f32;

                // Mirrored periods share their boundary stop.
                let duplicate = stops
                    .last()
                    .map_or(false, |prev| prev.pos == pos && prev.color == color);
                if !duplicate {
                    stops.push(stop(pos, color));
                }
            }
        }

        FixedLinearGradient {
            start: self.start + dir * first as f64,
            end: self.start + dir * last as f64,
            stops,
        }
    }
}

fn stop(pos: impl Into<f64>, color: Color) -> GradientStop {
    GradientStop {
        pos: pos.into() as f32,
        color,
    }
}

fn lerp(from: &Color, to: &Color, t: f64) -> Color {
    let (r0, g0, b0, a0) = from.as_rgba();
    let (r1, g1, b1, a1) = to.as_rgba();
    let mix = |a: f64, b: f64| a + (b - a) * t;

    Color::rgba(mix(r0, r1), mix(g0, g1), mix(b0, b1), mix(a0, a1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Color = Color::rgb8(0x00, 0xFF, 0x00);

    fn horizontal(tile_mode: TileMode) -> LinearGradient {
        LinearGradient::new(
            [Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            [GREEN, Color::BLACK],
            tile_mode,
        )
    }

    fn close(a: &Color, b: &Color) -> bool {
        let (r0, g0, b0, a0) = a.as_rgba8();
        let (r1, g1, b1, a1) = b.as_rgba8();
        [(r0, r1), (g0, g1), (b0, b1), (a0, a1)]
            .iter()
            .all(|&(x, y)| (x as i16 - y as i16).abs() <= 2)
    }

    /// Evaluate a padded piet gradient the way a renderer would.
    fn eval_piet(gradient: &FixedLinearGradient, point: Point) -> Color {
        let dir = gradient.end - gradient.start;
        let t = ((point - gradient.start).dot(dir) / dir.hypot2()).clamp(0.0, 1.0) as f32;

        let stops = &gradient.stops;
        for pair in stops.windows(2) {
            if t >= pair[0].pos && t <= pair[1].pos {
                let span = pair[1].pos - pair[0].pos;
                let local = if span > 0.0 { (t - pair[0].pos) / span } else { 0.0 };
                return lerp(&pair[0].color, &pair[1].color, local as f64);
            }
        }

        stops.last().unwrap().color.clone()
    }

    #[test]
    fn tile_modes() {
        assert_eq!(TileMode::Clamp.apply(-0.5), 0.0);
        assert_eq!(TileMode::Clamp.apply(1.5), 1.0);
        assert!((TileMode::Repeat.apply(1.25) - 0.25).abs() < 1e-9);
        assert!((TileMode::Repeat.apply(-0.25) - 0.75).abs() < 1e-9);
        assert!((TileMode::Mirror.apply(1.25) - 0.75).abs() < 1e-9);
        assert!((TileMode::Mirror.apply(-0.25) - 0.25).abs() < 1e-9);
        assert!((TileMode::Mirror.apply(2.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn keeps_what_it_was_built_with() {
        let gradient = horizontal(TileMode::Repeat);

        assert_eq!(gradient.points(), [Point::ORIGIN, Point::new(10.0, 0.0)]);
        assert_eq!(gradient.colors(), [GREEN, Color::BLACK]);
        assert_eq!(gradient.tile_mode(), TileMode::Repeat);
        assert_eq!(TileMode::default(), TileMode::Clamp);
    }

    #[test]
    fn color_at_follows_tiling() {
        let mirror = horizontal(TileMode::Mirror);
        assert!(close(&mirror.color_at(Point::new(0.0, 0.0)), &GREEN));
        assert!(close(&mirror.color_at(Point::new(10.0, 3.0)), &Color::BLACK));
        assert!(close(&mirror.color_at(Point::new(20.0, 0.0)), &GREEN));

        let repeat = horizontal(TileMode::Repeat);
        assert!(close(
            &repeat.color_at(Point::new(12.5, 0.0)),
            &repeat.color_at(Point::new(2.5, 0.0))
        ));
    }

    #[test]
    fn degenerate_gradient_uses_last_color() {
        let gradient = LinearGradient::new(
            [Point::new(5.0, 5.0), Point::new(5.0, 5.0)],
            [GREEN, Color::BLACK],
            TileMode::Mirror,
        );

        assert!(gradient.parameter(Point::ORIGIN).is_none());
        assert!(close(&gradient.color_at(Point::ORIGIN), &Color::BLACK));

        let fixed = gradient.to_piet(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(fixed.stops.iter().all(|s| close(&s.color, &Color::BLACK)));
    }

    #[test]
    fn single_period_is_left_alone() {
        // The demo's circle sits inside the first period of its gradient.
        let gradient = LinearGradient::new(
            [Point::new(0.0, 0.0), Point::new(300.0, 300.0)],
            [GREEN, Color::BLACK],
            TileMode::Mirror,
        );
        let fixed = gradient.to_piet(Rect::new(136.0, 136.0, 264.0, 264.0));

        assert_eq!(fixed.start, Point::new(0.0, 0.0));
        assert_eq!(fixed.end, Point::new(300.0, 300.0));
        assert_eq!(fixed.stops.len(), 2);
    }

    #[test]
    fn mirror_unrolls_shared_boundaries() {
        let gradient = horizontal(TileMode::Mirror);
        let fixed = gradient.to_piet(Rect::new(-5.0, 0.0, 15.0, 1.0));

        assert_eq!(fixed.start, Point::new(-10.0, 0.0));
        assert_eq!(fixed.end, Point::new(20.0, 0.0));

        let positions = fixed.stops.iter().map(|s| s.pos).collect::<Vec<_>>();
        assert_eq!(positions.len(), 4);
        assert!((positions[1] - 1.0 / 3.0).abs() < 1e-6);
        assert!((positions[2] - 2.0 / 3.0).abs() < 1e-6);
        assert!(close(&fixed.stops[0].color, &Color::BLACK));
        assert!(close(&fixed.stops[1].color, &GREEN));
    }

    #[test]
    fn unrolled_gradient_matches_tiled_gradient() {
        for mode in [TileMode::Repeat, TileMode::Mirror] {
            let gradient = horizontal(mode);
            let bounds = Rect::new(-25.0, 0.0, 37.0, 4.0);
            let fixed = gradient.to_piet(bounds);

            for x in [-24.0, -13.0, -7.5, -1.0, 3.0, 9.0, 14.0, 22.5, 31.0, 36.0] {
                let point = Point::new(x, 2.0);
                assert!(
                    close(&eval_piet(&fixed, point), &gradient.color_at(point)),
                    "{mode:?} differs at x = {x}"
                );
            }
        }
    }

    #[test]
    fn huge_bounds_are_capped() {
        let gradient = horizontal(TileMode::Repeat);
        let fixed = gradient.to_piet(Rect::new(0.0, 0.0, 10_000.0, 1.0));

        assert!(fixed.stops.len() <= 2 * MAX_PERIODS as usize);
        assert_eq!(fixed.end, Point::new(10.0 * MAX_PERIODS as f64, 0.0));
    }
}
