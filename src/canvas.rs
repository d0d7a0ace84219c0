//! Session-only freehand canvas in terminal cell coordinates.
//!
//! Shapes are committed as polylines, so every stroke renders the same way:
//! consecutive points are joined with straight segments and thickened by the
//! brush radius.

use std::collections::HashSet;

pub const MIN_WIDTH: u8 = 1;
pub const MAX_WIDTH: u8 = 25;
const CIRCLE_SEGMENTS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    #[default]
    FreeDraw,
    Line,
    Rect,
    Circle,
    Transform,
}

impl DrawingMode {
    pub const ALL: [DrawingMode; 5] = [
        DrawingMode::FreeDraw,
        DrawingMode::Line,
        DrawingMode::Rect,
        DrawingMode::Circle,
        DrawingMode::Transform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrawingMode::FreeDraw => "freedraw",
            DrawingMode::Line => "line",
            DrawingMode::Rect => "rect",
            DrawingMode::Circle => "circle",
            DrawingMode::Transform => "transform",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: String,
    pub width: u8,
}

impl Stroke {
    fn radius(&self) -> i32 {
        (i32::from(self.width) - 1) / 6
    }

    /// Every cell the stroke covers.
    pub fn cells(&self) -> HashSet<Point> {
        let mut path = Vec::new();
        match self.points.as_slice() {
            [] => {}
            [only] => path.push(*only),
            points => {
                for pair in points.windows(2) {
                    path.extend(line_cells(pair[0], pair[1]));
                }
            }
        }

        let r = self.radius();
        let mut cells = HashSet::with_capacity(path.len());
        for p in path {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy <= r * r {
                        cells.insert(Point::new(p.x + dx, p.y + dy));
                    }
                }
            }
        }
        cells
    }

    pub fn hits(&self, p: Point) -> bool {
        self.cells().contains(&p)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }
}

/// Toolbar state shared by everything drawn next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    pub color: String,
    pub width: u8,
    pub background: String,
    pub mode: DrawingMode,
}

impl Brush {
    pub fn new(color: &str, width: u8, background: &str) -> Self {
        Self {
            color: color.to_string(),
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            background: background.to_string(),
            mode: DrawingMode::FreeDraw,
        }
    }

    pub fn widen(&mut self, delta: i8) {
        let width = i16::from(self.width) + i16::from(delta);
        self.width = width.clamp(i16::from(MIN_WIDTH), i16::from(MAX_WIDTH)) as u8;
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new("#000000", 3, "#FFFFFF")
    }
}

#[derive(Debug, Clone)]
enum Gesture {
    Free(Vec<Point>),
    Shape { anchor: Point, current: Point },
    Drag { index: usize, last: Point },
}

#[derive(Debug, Clone)]
pub struct Canvas {
    pub brush: Brush,
    /// Keyboard pointer, in the same coordinates as mouse input.
    pub cursor: Point,
    /// Drawable area in cells, as last laid out. Zero means unknown.
    pub size: (i32, i32),
    strokes: Vec<Stroke>,
    gesture: Option<Gesture>,
}

impl Canvas {
    pub fn new(brush: Brush) -> Self {
        Self {
            brush,
            cursor: Point::default(),
            size: (0, 0),
            strokes: Vec::new(),
            gesture: None,
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.gesture = None;
    }

    pub fn press(&mut self, p: Point) {
        self.gesture = match self.brush.mode {
            DrawingMode::FreeDraw => Some(Gesture::Free(vec![p])),
            DrawingMode::Line | DrawingMode::Rect | DrawingMode::Circle => Some(Gesture::Shape {
                anchor: p,
                current: p,
            }),
            DrawingMode::Transform => self
                .stroke_at(p)
                .map(|index| Gesture::Drag { index, last: p }),
        };
    }

    pub fn drag(&mut self, p: Point) {
        match &mut self.gesture {
            Some(Gesture::Free(points)) => {
                if points.last() != Some(&p) {
                    points.push(p);
                }
            }
            Some(Gesture::Shape { current, .. }) => *current = p,
            Some(Gesture::Drag { index, last }) => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                if let Some(stroke) = self.strokes.get_mut(*index) {
                    stroke.translate(dx, dy);
                }
                *last = p;
            }
            None => {}
        }
    }

    pub fn release(&mut self, p: Point) {
        self.drag(p);
        if let Some(stroke) = self.gesture.take().and_then(|g| self.finish(g)) {
            self.strokes.push(stroke);
        }
    }

    /// The stroke being drawn right now, if any.
    pub fn preview(&self) -> Option<Stroke> {
        match &self.gesture {
            Some(g @ (Gesture::Free(_) | Gesture::Shape { .. })) => self.finish(g.clone()),
            _ => None,
        }
    }

    /// Topmost stroke covering `p`.
    pub fn stroke_at(&self, p: Point) -> Option<usize> {
        self.strokes.iter().rposition(|s| s.hits(p))
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let mut next = Point::new(self.cursor.x + dx, self.cursor.y + dy);
        next.x = next.x.max(0);
        next.y = next.y.max(0);
        if self.size.0 > 0 {
            next.x = next.x.min(self.size.0 - 1);
        }
        if self.size.1 > 0 {
            next.y = next.y.min(self.size.1 - 1);
        }
        self.cursor = next;
        if self.is_drawing() {
            self.drag(next);
        }
    }

    /// Pen down at the cursor, or pen up if already drawing.
    pub fn toggle_pen(&mut self) {
        if self.is_drawing() {
            self.release(self.cursor);
        } else {
            self.press(self.cursor);
        }
    }

    fn finish(&self, gesture: Gesture) -> Option<Stroke> {
        let points = match gesture {
            Gesture::Free(points) => points,
            Gesture::Shape { anchor, current } => shape_points(self.brush.mode, anchor, current),
            Gesture::Drag { .. } => return None,
        };
        Some(Stroke {
            points,
            color: self.brush.color.clone(),
            width: self.brush.width,
        })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Brush::default())
    }
}

fn shape_points(mode: DrawingMode, a: Point, b: Point) -> Vec<Point> {
    match mode {
        DrawingMode::Rect => vec![
            a,
            Point::new(b.x, a.y),
            b,
            Point::new(a.x, b.y),
            a,
        ],
        DrawingMode::Circle => {
            // Cells are about twice as tall as wide, so halve the vertical radius.
            let r = f64::from((b.x - a.x).abs().max(2 * (b.y - a.y).abs()));
            if r == 0.0 {
                return vec![a];
            }
            (0..=CIRCLE_SEGMENTS)
                .map(|i| {
                    let t = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                    Point::new(
                        a.x + (r * t.cos()).round() as i32,
                        a.y + (r / 2.0 * t.sin()).round() as i32,
                    )
                })
                .collect()
        }
        _ => vec![a, b],
    }
}

/// Bresenham segment from `a` to `b`, both ends included.
fn line_cells(a: Point, b: Point) -> Vec<Point> {
    let (dx, dy) = ((b.x - a.x).abs(), -(b.y - a.y).abs());
    let (sx, sy) = (if a.x < b.x { 1 } else { -1 }, if a.y < b.y { 1 } else { -1 });
    let mut err = dx + dy;
    let mut p = a;
    let mut out = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        out.push(p);
        if p == b {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(canvas: &mut Canvas, from: Point, to: Point) {
        canvas.press(from);
        canvas.drag(to);
        canvas.release(to);
    }

    #[test]
    fn freedraw_records_path() {
        let mut canvas = Canvas::default();
        canvas.press(Point::new(0, 0));
        canvas.drag(Point::new(1, 0));
        canvas.drag(Point::new(1, 0));
        canvas.release(Point::new(2, 1));

        let strokes = canvas.strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(
            strokes[0].points,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 1)]
        );
        assert_eq!(strokes[0].color, "#000000");
        assert!(!canvas.is_drawing());
    }

    #[test]
    fn line_cells_are_contiguous() {
        let cells = line_cells(Point::new(0, 0), Point::new(4, 2));
        assert_eq!(cells.first(), Some(&Point::new(0, 0)));
        assert_eq!(cells.last(), Some(&Point::new(4, 2)));
        assert_eq!(cells.len(), 5);
    }

    #[test]
    fn rect_mode_commits_outline() {
        let mut canvas = Canvas::default();
        canvas.brush.mode = DrawingMode::Rect;
        draw(&mut canvas, Point::new(1, 1), Point::new(4, 3));

        let stroke = &canvas.strokes()[0];
        assert_eq!(stroke.points.len(), 5);
        assert!(stroke.hits(Point::new(4, 1)));
        assert!(stroke.hits(Point::new(1, 3)));
        assert!(!stroke.hits(Point::new(2, 2)));
    }

    #[test]
    fn shape_preview_follows_pointer() {
        let mut canvas = Canvas::default();
        canvas.brush.mode = DrawingMode::Line;
        canvas.press(Point::new(0, 0));
        canvas.drag(Point::new(3, 0));
        let preview = canvas.preview().unwrap();
        assert_eq!(preview.points, vec![Point::new(0, 0), Point::new(3, 0)]);
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn transform_moves_topmost_stroke() {
        let mut canvas = Canvas::default();
        canvas.brush.mode = DrawingMode::Line;
        draw(&mut canvas, Point::new(0, 0), Point::new(2, 0));
        canvas.brush.mode = DrawingMode::Transform;
        draw(&mut canvas, Point::new(1, 0), Point::new(1, 5));

        assert_eq!(canvas.strokes().len(), 1);
        assert_eq!(
            canvas.strokes()[0].points,
            vec![Point::new(0, 5), Point::new(2, 5)]
        );
    }

    #[test]
    fn transform_on_empty_space_does_nothing() {
        let mut canvas = Canvas::default();
        canvas.brush.mode = DrawingMode::Transform;
        canvas.press(Point::new(3, 3));
        assert!(!canvas.is_drawing());
        canvas.release(Point::new(4, 4));
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn wide_brush_covers_neighbours() {
        let stroke = Stroke {
            points: vec![Point::new(5, 5)],
            color: "#000000".into(),
            width: 13,
        };
        assert!(stroke.hits(Point::new(7, 5)));
        assert!(!stroke.hits(Point::new(8, 5)));
    }

    #[test]
    fn width_is_clamped() {
        let mut brush = Brush::default();
        brush.widen(100);
        assert_eq!(brush.width, MAX_WIDTH);
        brush.widen(-100);
        assert_eq!(brush.width, MIN_WIDTH);
    }

    #[test]
    fn keyboard_pen_draws_along_cursor() {
        let mut canvas = Canvas::default();
        canvas.size = (3, 3);
        canvas.toggle_pen();
        canvas.move_cursor(1, 0);
        canvas.move_cursor(5, 5);
        canvas.toggle_pen();

        assert_eq!(
            canvas.strokes()[0].points,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 2)]
        );
    }

    #[test]
    fn mode_cycles() {
        let mut mode = DrawingMode::FreeDraw;
        for _ in 0..DrawingMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, DrawingMode::FreeDraw);
    }
}
