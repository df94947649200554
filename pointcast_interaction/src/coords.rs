// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client pixels to normalized device coordinates.

use kurbo::{Point, Rect};

/// Pointer position before any input arrives: the top-left corner.
pub const DEFAULT_POINTER: Point = Point::new(-1.0, 1.0);

/// Map a client-space position into normalized device coordinates of `rect`.
///
/// The left edge maps to `x = -1`, the right edge to `x = 1`, the top edge to
/// `y = 1` and the bottom edge to `y = -1`. Positions outside `rect` map
/// outside `[-1, 1]`.
///
/// A rectangle without positive area (for example [`Rect::ZERO`] for a surface
/// that is not attached yet) yields [`DEFAULT_POINTER`] instead of dividing by zero.
///
/// ```
/// use kurbo::{Point, Rect};
/// use pointcast_interaction::coords::map_to_point;
///
/// let rect = Rect::from_origin_size((100.0, 50.0), (200.0, 100.0));
/// assert_eq!(map_to_point(Point::new(200.0, 100.0), rect), Point::new(0.0, 0.0));
/// assert_eq!(map_to_point(Point::new(100.0, 50.0), rect), Point::new(-1.0, 1.0));
/// ```
pub fn map_to_point(client: Point, rect: Rect) -> Point {
    let (width, height) = (rect.width(), rect.height());
    if !(width > 0.0 && height > 0.0) {
        return DEFAULT_POINTER;
    }
    Point::new(
        (client.x - rect.x0) / width * 2.0 - 1.0,
        -((client.y - rect.y0) / height * 2.0 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(map_to_point(Point::new(0.0, 0.0), rect), Point::new(-1.0, 1.0));
        assert_eq!(map_to_point(Point::new(800.0, 600.0), rect), Point::new(1.0, -1.0));
        assert_eq!(map_to_point(Point::new(400.0, 300.0), rect), Point::new(0.0, 0.0));
    }

    #[test]
    fn outside_the_surface_maps_outside_the_unit_square() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = map_to_point(Point::new(150.0, -50.0), rect);
        assert_eq!(p, Point::new(2.0, 2.0));
    }

    #[test]
    fn detached_surface_degrades_to_default() {
        assert_eq!(map_to_point(Point::new(10.0, 10.0), Rect::ZERO), DEFAULT_POINTER);
        let inverted = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(map_to_point(Point::new(5.0, 5.0), inverted), DEFAULT_POINTER);
    }
}
