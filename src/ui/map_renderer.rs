use crate::ui::viewport::Viewport;
use airport_explorer::map::MapPoint;
use egui::{Color32, Painter, Pos2, Rect, Sense, Stroke, Ui, Vec2};

const MAX_MAP_WIDTH: f32 = 1000.0;
const GRATICULE_STEP_DEGREES: u16 = 30;
const POINT_RADIUS: f32 = 3.0;
const HOVER_RADIUS: f32 = 8.0;
const OCEAN: Color32 = Color32::from_rgb(28, 46, 74);
const GRATICULE: Color32 = Color32::from_rgb(58, 80, 112);
const EQUATOR: Color32 = Color32::from_rgb(96, 120, 152);
const AIRPORT: Color32 = Color32::from_rgb(255, 75, 75);
const HIGHLIGHT: Color32 = Color32::from_rgb(255, 220, 90);

/// How the map is drawn.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapMode {
    /// A fixed plot of the whole world
    #[default]
    Simple,
    /// Zoom with the scroll wheel, pan by dragging, hover for details
    Interactive,
}

/// The map panel and what it remembers between frames.
#[derive(Default, Debug)]
pub struct MapPanel {
    mode: MapMode,
    viewport: Viewport,
}

impl MapPanel {
    pub fn render(&mut self, ui: &mut Ui, points: &[MapPoint]) {
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.mode, MapMode::Simple, "Simple map");
            ui.radio_value(&mut self.mode, MapMode::Interactive, "Interactive map");
            if self.mode == MapMode::Interactive && ui.button("Reset view").clicked() {
                self.viewport.reset();
            }
        });
        ui.label(format!("{} airports with coordinates", points.len()));

        let size = map_size(ui.available_width());
        match self.mode {
            MapMode::Simple => render_simple_map(ui, size, points),
            MapMode::Interactive => self.render_interactive_map(ui, size, points),
        }
    }

    fn render_interactive_map(&mut self, ui: &mut Ui, size: Vec2, points: &[MapPoint]) {
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let map_rect = response.rect;
        if response.hovered() {
            let scroll = ui.input().scroll_delta.y;
            self.viewport.scroll(scroll);
        }
        self.viewport.drag(response.drag_delta(), map_rect);

        let painter = painter.with_clip_rect(map_rect);
        draw_background(&painter, map_rect, &self.viewport);
        let positions = screen_positions(points, map_rect, &self.viewport);
        draw_points(&painter, &positions);

        let hovered = response
            .hover_pos()
            .and_then(|pointer| nearest_point(&positions, pointer));
        if let Some(index) = hovered {
            if let (Some(point), Some(position)) = (points.get(index), positions.get(index)) {
                painter.circle_stroke(*position, POINT_RADIUS + 2.0, Stroke::new(2.0, HIGHLIGHT));
                response.on_hover_text_at_pointer(point.label.as_str());
            }
        }
    }
}

fn render_simple_map(ui: &mut Ui, size: Vec2, points: &[MapPoint]) {
    let viewport = Viewport::default();
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let map_rect = response.rect;
    draw_background(&painter, map_rect, &viewport);
    draw_points(&painter, &screen_positions(points, map_rect, &viewport));
}

/// A 2:1 map filling the available width, up to a limit.
fn map_size(available_width: f32) -> Vec2 {
    let width = available_width.min(MAX_MAP_WIDTH).max(1.0);
    Vec2::new(width, width / 2.0)
}

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::as_conversions)]
fn screen_positions(points: &[MapPoint], map_rect: Rect, viewport: &Viewport) -> Vec<Pos2> {
    points
        .iter()
        .map(|point| {
            let (x, y) = point.unit_position();
            viewport.to_screen(Pos2::new(x as f32, y as f32), map_rect)
        })
        .collect()
}

fn draw_background(painter: &Painter, map_rect: Rect, viewport: &Viewport) {
    painter.rect_filled(map_rect, 0.0, OCEAN);
    let stroke = Stroke::new(1.0, GRATICULE);
    for degrees in (0_u16..=360).step_by(GRATICULE_STEP_DEGREES.into()) {
        let x = f32::from(degrees) / 360.0;
        painter.line_segment(
            [
                viewport.to_screen(Pos2::new(x, 0.0), map_rect),
                viewport.to_screen(Pos2::new(x, 1.0), map_rect),
            ],
            stroke,
        );
    }
    for degrees in (0_u16..=180).step_by(GRATICULE_STEP_DEGREES.into()) {
        let y = f32::from(degrees) / 180.0;
        let line_stroke = if degrees == 90 {
            Stroke::new(1.0, EQUATOR)
        } else {
            stroke
        };
        painter.line_segment(
            [
                viewport.to_screen(Pos2::new(0.0, y), map_rect),
                viewport.to_screen(Pos2::new(1.0, y), map_rect),
            ],
            line_stroke,
        );
    }
}

fn draw_points(painter: &Painter, positions: &[Pos2]) {
    for position in positions {
        painter.circle_filled(*position, POINT_RADIUS, AIRPORT);
    }
}

/// The index of the position closest to the pointer, if any is close enough.
fn nearest_point(positions: &[Pos2], pointer: Pos2) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| (index, position.distance(pointer)))
        .filter(|(_, distance)| *distance <= HOVER_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

#[allow(clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_keeps_the_map_at_two_to_one() {
        assert_eq!(map_size(600.0), Vec2::new(600.0, 300.0));
        assert_eq!(map_size(4000.0), Vec2::new(MAX_MAP_WIDTH, MAX_MAP_WIDTH / 2.0));
    }

    #[test]
    fn it_finds_the_nearest_point_under_the_pointer() {
        let positions = [
            Pos2::new(10.0, 10.0),
            Pos2::new(14.0, 10.0),
            Pos2::new(100.0, 100.0),
        ];
        assert_eq!(nearest_point(&positions, Pos2::new(13.0, 10.0)), Some(1));
        assert_eq!(nearest_point(&positions, Pos2::new(9.0, 10.0)), Some(0));
        assert_eq!(nearest_point(&positions, Pos2::new(50.0, 50.0)), None);
        assert_eq!(nearest_point(&[], Pos2::new(0.0, 0.0)), None);
    }
}
