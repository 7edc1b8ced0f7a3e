use crate::Message;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Theme,
};
use solarcore::geometry::GeoPoint;
use solarcore::interaction::SessionSnapshot;
use solarcore::map::{MapView, OverlayStyle, ScreenPoint, Viewport};

/// Grid spacing in pixels; stands in for map tiles.
const GRID_STEP: f32 = 64.0;

/// Extra pixels around a marker that still start a drag.
const GRAB_SLOP: f64 = 4.0;

/// Map surface: renders the footprint and turns mouse input into planner events.
pub struct MapSurface {
    vertices: Vec<GeoPoint>,
    view: MapView,
    style: OverlayStyle,
}

#[derive(Debug, Default)]
pub struct DragState {
    dragging: Option<Drag>,
}

/// Marker being dragged, tracked by its position in the vertex list.
#[derive(Debug, Clone, Copy)]
struct Drag {
    index: usize,
    original: GeoPoint,
    /// Marker center minus the press position.
    offset: (f32, f32),
    /// Marker center following the cursor.
    current: Point,
    moved: bool,
}

fn to_screen(point: Point) -> ScreenPoint {
    ScreenPoint {
        x: f64::from(point.x),
        y: f64::from(point.y),
    }
}

fn to_canvas(point: ScreenPoint) -> Point {
    Point::new(point.x as f32, point.y as f32)
}

impl MapSurface {
    pub fn new(session: &SessionSnapshot) -> Self {
        Self {
            vertices: session.vertices.clone(),
            view: session.map.clone(),
            style: session.style.clone(),
        }
    }

    /// Camera sized to the actual widget bounds.
    fn view_for(&self, bounds: Rectangle) -> MapView {
        MapView::new(
            self.view.center,
            self.view.zoom,
            Viewport {
                width: f64::from(bounds.width),
                height: f64::from(bounds.height),
            },
        )
    }

    fn grab_radius(&self) -> f64 {
        f64::from(self.style.marker_radius) + GRAB_SLOP
    }

    fn marker_under(&self, view: &MapView, position: Point) -> Option<(usize, GeoPoint)> {
        if !self.style.draggable_markers {
            return None;
        }
        view.marker_at(&self.vertices, to_screen(position), self.grab_radius())
    }

    /// Left press: grabs the marker under the cursor, or places a new one.
    fn press(&self, state: &mut DragState, view: &MapView, position: Point) -> Option<Message> {
        match self.marker_under(view, position) {
            Some((index, original)) => {
                let anchor = to_canvas(view.to_screen(original));
                state.dragging = Some(Drag {
                    index,
                    original,
                    offset: (anchor.x - position.x, anchor.y - position.y),
                    current: anchor,
                    moved: false,
                });
                None
            }
            None => Some(Message::MapClicked(view.from_screen(to_screen(position)))),
        }
    }

    fn drag_to(&self, state: &mut DragState, position: Point) -> bool {
        let Some(drag) = state.dragging.as_mut() else {
            return false;
        };
        let next = Point::new(position.x + drag.offset.0, position.y + drag.offset.1);
        if next != drag.current {
            drag.current = next;
            drag.moved = true;
        }
        true
    }

    /// Left release: a marker that never left its spot is a plain click.
    fn release(&self, state: &mut DragState, view: &MapView) -> Option<Message> {
        let drag = state.dragging.take()?;
        if !drag.moved {
            return None;
        }
        Some(Message::MarkerDragged {
            from: drag.original,
            to: view.from_screen(to_screen(drag.current)),
        })
    }

    /// Corners in drawing order, with the dragged one following the cursor.
    fn corner_positions(&self, state: &DragState, view: &MapView) -> Vec<Point> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| match state.dragging {
                Some(drag) if drag.index == index => drag.current,
                _ => to_canvas(view.to_screen(*vertex)),
            })
            .collect()
    }

    fn stroke_color(&self) -> Color {
        let rgb = self.style.stroke_rgb();
        Color {
            a: self.style.stroke_opacity,
            ..Color::from_rgb8(rgb.r, rgb.g, rgb.b)
        }
    }
}

impl canvas::Program<Message> for MapSurface {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let view = self.view_for(bounds);
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                match self.press(state, &view, position) {
                    Some(message) => Some(canvas::Action::publish(message).and_capture()),
                    None => Some(canvas::Action::request_redraw().and_capture()),
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let position = cursor.position_in(bounds)?;
                self.drag_to(state, position)
                    .then(canvas::Action::request_redraw)
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.dragging.is_none() {
                    return None;
                }
                match self.release(state, &view) {
                    Some(message) => Some(canvas::Action::publish(message).and_capture()),
                    None => Some(canvas::Action::request_redraw().and_capture()),
                }
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let view = self.view_for(bounds);
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.09, 0.11, 0.10),
        );

        let grid = Path::new(|builder| {
            let mut x = 0.0;
            while x <= bounds.width {
                builder.move_to(Point::new(x, 0.0));
                builder.line_to(Point::new(x, bounds.height));
                x += GRID_STEP;
            }
            let mut y = 0.0;
            while y <= bounds.height {
                builder.move_to(Point::new(0.0, y));
                builder.line_to(Point::new(bounds.width, y));
                y += GRID_STEP;
            }
        });
        frame.stroke(
            &grid,
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.16, 0.19, 0.17)),
        );

        let corners = self.corner_positions(state, &view);

        if corners.len() > 1 {
            let outline = Path::new(|builder| {
                builder.move_to(corners[0]);
                for corner in &corners[1..] {
                    builder.line_to(*corner);
                }
                builder.close();
            });
            let stroke_color = self.stroke_color();
            frame.fill(&outline, Color { a: 0.2, ..stroke_color });
            frame.stroke(
                &outline,
                Stroke::default()
                    .with_width(self.style.stroke_weight)
                    .with_color(stroke_color),
            );
        }

        for corner in &corners {
            let marker = Path::new(|builder| builder.circle(*corner, self.style.marker_radius));
            frame.fill(&marker, Color::from_rgb(0.95, 0.55, 0.2));
            frame.stroke(
                &marker,
                Stroke::default()
                    .with_width(1.5)
                    .with_color(Color::WHITE),
            );
        }

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let crosshair = Path::new(|builder| {
            builder.move_to(Point::new(center.x - 6.0, center.y));
            builder.line_to(Point::new(center.x + 6.0, center.y));
            builder.move_to(Point::new(center.x, center.y - 6.0));
            builder.line_to(Point::new(center.x, center.y + 6.0));
        });
        frame.stroke(
            &crosshair,
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.6, 0.6, 0.65)),
        );

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.dragging.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if self.marker_under(&self.view_for(bounds), position).is_some() => {
                mouse::Interaction::Grab
            }
            Some(_) => mouse::Interaction::Crosshair,
            None => mouse::Interaction::default(),
        }
    }
}
