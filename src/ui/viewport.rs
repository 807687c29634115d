use egui::{Pos2, Rect, Vec2};
use std::mem::swap;

/// The part of the world map that is visible, in unit coordinates, along with the zoom level.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom_level: Option<f32>,
    viewport_area: Option<Rect>,
}

impl Viewport {
    /// The visible area, the whole map if nothing has been zoomed yet.
    pub fn area(&self) -> Rect {
        self.viewport_area.map_or(
            Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
            |r| r,
        )
    }

    pub const fn zoom_level(&self) -> Option<f32> {
        self.zoom_level
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zooms in for a positive scroll and out for a negative one, keeping the center in place.
    pub fn scroll(&mut self, scroll: f32) {
        if scroll > 0.0 {
            self.zoom_level = self.zoom_level.map_or(Some(0.01), |z| {
                if z < 0.7 {
                    Some(truncate_to_decimal_places((z + 0.01).min(0.99), 4))
                } else {
                    Some(truncate_to_decimal_places((z + 0.005).min(0.99), 4))
                }
            });
        }
        if scroll < 0.0 {
            self.zoom_level = self.zoom_level.map_or(Some(0.0), |z| {
                if z < 0.7 {
                    Some(truncate_to_decimal_places((z - 0.01).max(0.0), 4))
                } else {
                    Some(truncate_to_decimal_places((z - 0.005).max(0.0), 4))
                }
            });
        }
        if scroll != 0.0 {
            self.zoom();
        }
    }

    fn zoom(&mut self) {
        let zoom_level = self.zoom_level;
        let viewport_rect = self.area();
        let mut zoomed_viewport = Rect::from_min_max(
            Pos2::new(
                zoom_level.map_or(0.0, |z| z / 2.0),
                zoom_level.map_or(0.0, |z| z / 2.0),
            ),
            Pos2::new(
                zoom_level.map_or(1.0, |z| 1.0 - z / 2.0),
                zoom_level.map_or(1.0, |z| 1.0 - z / 2.0),
            ),
        );
        let zoomed_viewport_center =
            zoomed_viewport.min + (zoomed_viewport.max - zoomed_viewport.min) / 2.0;

        let viewport_center = viewport_rect.min + (viewport_rect.max - viewport_rect.min) / 2.0;
        let translate = viewport_center - zoomed_viewport_center;

        if translate.length() > 0.00001 {
            zoomed_viewport.max =
                (zoomed_viewport.max + translate).clamp(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
            zoomed_viewport.min =
                (zoomed_viewport.min + translate).clamp(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        }
        self.set_area(zoomed_viewport);
    }

    /// Pans by a drag of `drag` points over a map drawn in `map_rect`.
    pub fn drag(&mut self, drag: Vec2, map_rect: Rect) {
        let viewport_rect = self.area();
        let mut map_drag = drag;
        map_drag.x = map_drag.x / map_rect.width() * viewport_rect.width();
        map_drag.y = map_drag.y / map_rect.height() * viewport_rect.height();
        if map_drag.x != 0.0 || map_drag.y != 0.0 {
            let new_min =
                (viewport_rect.min - map_drag).clamp(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
            let new_max =
                (viewport_rect.max - map_drag).clamp(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
            let new_rect = Rect::from_min_max(new_min, new_max);

            // Only pan while the whole area still fits on the map.
            if (new_rect.width() - viewport_rect.width()).abs() < f32::EPSILON
                && (new_rect.height() - viewport_rect.height()).abs() < f32::EPSILON
            {
                self.set_area(new_rect);
            }
        }
    }

    /// Maps a unit map position into a map drawn in `map_rect`.
    pub fn to_screen(&self, unit: Pos2, map_rect: Rect) -> Pos2 {
        let area = self.area();
        Pos2::new(
            ((unit.x - area.min.x) / area.width()).mul_add(map_rect.width(), map_rect.min.x),
            ((unit.y - area.min.y) / area.height()).mul_add(map_rect.height(), map_rect.min.y),
        )
    }

    fn set_area(&mut self, mut rect: Rect) {
        clamp_viewport(&mut rect);
        self.viewport_area = Some(rect);
    }
}

fn clamp_viewport(viewport: &mut Rect) {
    viewport.min.x = viewport.min.x.clamp(0.0, 1.0);
    viewport.min.y = viewport.min.y.clamp(0.0, 1.0);
    viewport.max.x = viewport.max.x.clamp(0.0, 1.0);
    viewport.max.y = viewport.max.y.clamp(0.0, 1.0);
    if viewport.min.x > viewport.max.x {
        swap(&mut viewport.min.x, &mut viewport.max.x);
    }
    if viewport.min.y > viewport.max.y {
        swap(&mut viewport.min.y, &mut viewport.max.y);
    }
}

/// Truncates a floating point number to the specified number of decimal places.
#[must_use]
#[inline]
pub fn truncate_to_decimal_places(num: f32, places: i32) -> f32 {
    let ten = 10.0_f32.powi(places);
    // Floats become infinite past this point and cannot hold a fraction anyway.
    if num > f32::MAX / ten || num < f32::MIN / ten {
        return num;
    }
    (num * ten).floor() / ten
}

#[allow(clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_starts_on_the_whole_map() {
        let viewport = Viewport::default();
        assert_eq!(
            viewport.area(),
            Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0))
        );
        assert_eq!(viewport.zoom_level(), None);
    }

    #[test]
    fn it_zooms_around_the_center() {
        let mut viewport = Viewport::default();
        for _ in 0..50 {
            viewport.scroll(1.0);
        }
        let area = viewport.area();
        assert!(area.width() < 1.0);
        assert!((area.center().x - 0.5).abs() < 1e-4);
        assert!((area.center().y - 0.5).abs() < 1e-4);

        for _ in 0..200 {
            viewport.scroll(-1.0);
        }
        assert_eq!(viewport.zoom_level(), Some(0.0));
        assert!((viewport.area().width() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn it_pans_within_the_map() {
        let mut viewport = Viewport::default();
        for _ in 0..50 {
            viewport.scroll(1.0);
        }
        let before = viewport.area();
        let map_rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(400.0, 200.0));
        viewport.drag(Vec2::new(-40.0, 0.0), map_rect);
        let after = viewport.area();
        assert!(after.min.x > before.min.x);
        assert!((after.width() - before.width()).abs() < 1e-4);

        viewport.drag(Vec2::new(-100_000.0, 0.0), map_rect);
        assert_eq!(viewport.area(), after);
    }

    #[test]
    fn it_maps_unit_positions_to_the_screen() {
        let viewport = Viewport::default();
        let map_rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(360.0, 180.0));
        assert_eq!(
            viewport.to_screen(Pos2::new(0.5, 0.5), map_rect),
            Pos2::new(190.0, 110.0)
        );
        assert_eq!(
            viewport.to_screen(Pos2::new(0.0, 1.0), map_rect),
            Pos2::new(10.0, 200.0)
        );
    }

    #[test]
    fn it_truncates_to_decimal_places() {
        assert_eq!(truncate_to_decimal_places(0.123_456, 4), 0.1234);
        assert_eq!(truncate_to_decimal_places(f32::MAX, 4), f32::MAX);
    }
}
