use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Arc, Circle, Ellipse, RoundedRect, Shape};

use crate::{
    foundation::core::{BezPath, Point, Rect, Vec2},
    shapes::region::ClipRegion,
};

const TOLERANCE: f64 = 0.1;

/// Built-in clip shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetShape {
    /// Full rectangle.
    Rectangle,
    /// Circle inscribed in the shorter side.
    Circle,
    /// Ellipse touching all four edges.
    Ellipse,
    /// Narrow portrait ellipse (70% of the width).
    EllipseVertical,
    /// Heart made of four cubic curves inside the centered square.
    Heart,
    /// Five-pointed star, inner radius 40% of the outer one.
    Star,
    /// Car silhouette with two wheel arches.
    Car,
    /// Round head with two tilted ears.
    Rabbit,
    /// Rectangle with corner radius 15% of the shorter side.
    RoundedRect,
    /// Pointy-top regular hexagon.
    Hexagon,
}

impl PresetShape {
    /// Every preset in catalog order.
    pub const ALL: [PresetShape; 10] = [
        Self::Rectangle,
        Self::Circle,
        Self::Ellipse,
        Self::EllipseVertical,
        Self::Heart,
        Self::Star,
        Self::Car,
        Self::Rabbit,
        Self::RoundedRect,
        Self::Hexagon,
    ];

    /// Stable identifier used in options and frame data.
    pub fn id(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::EllipseVertical => "ellipseVertical",
            Self::Heart => "heart",
            Self::Star => "star",
            Self::Car => "car",
            Self::Rabbit => "rabbit",
            Self::RoundedRect => "roundedRect",
            Self::Hexagon => "hexagon",
        }
    }

    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Rectangle => "사각형",
            Self::Circle => "원형",
            Self::Ellipse => "타원",
            Self::EllipseVertical => "세로 타원",
            Self::Heart => "하트",
            Self::Star => "별",
            Self::Car => "자동차",
            Self::Rabbit => "토끼",
            Self::RoundedRect => "둥근 사각형",
            Self::Hexagon => "육각형",
        }
    }

    /// Look up a preset by id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Build the clip region for a `width x height` box.
    pub fn region(self, width: f64, height: f64) -> ClipRegion {
        let w = width.max(0.0);
        let h = height.max(0.0);
        let path = match self {
            Self::Rectangle => Rect::new(0.0, 0.0, w, h).to_path(TOLERANCE),
            Self::Circle => {
                Circle::new((w / 2.0, h / 2.0), w.min(h) / 2.0).to_path(TOLERANCE)
            }
            Self::Ellipse => {
                Ellipse::new((w / 2.0, h / 2.0), (w / 2.0, h / 2.0), 0.0).to_path(TOLERANCE)
            }
            Self::EllipseVertical => {
                Ellipse::new((w / 2.0, h / 2.0), (w * 0.35, h / 2.0), 0.0).to_path(TOLERANCE)
            }
            Self::Heart => heart(w, h),
            Self::Star => radial_polygon(w, h, 10, |i| if i % 2 == 0 { 1.0 } else { 0.4 }),
            Self::Car => car(w, h),
            Self::Rabbit => rabbit(w, h),
            Self::RoundedRect => {
                RoundedRect::new(0.0, 0.0, w, h, w.min(h) * 0.15).to_path(TOLERANCE)
            }
            Self::Hexagon => radial_polygon(w, h, 6, |_| 1.0),
        };
        ClipRegion::new(path)
    }
}

/// Square of side `min(w, h)` centered in the box: `(side, offset)`.
fn centered_square(w: f64, h: f64) -> (f64, Vec2) {
    let s = w.min(h);
    (s, Vec2::new((w - s) / 2.0, (h - s) / 2.0))
}

fn heart(w: f64, h: f64) -> BezPath {
    let (s, o) = centered_square(w, h);
    let p = |x: f64, y: f64| Point::new(o.x + s * x, o.y + s * y);

    let mut path = BezPath::new();
    path.move_to(p(0.5, 0.25));
    path.curve_to(p(0.5, 0.1), p(0.25, 0.0), p(0.1, 0.2));
    path.curve_to(p(0.0, 0.4), p(0.1, 0.6), p(0.5, 0.9));
    path.curve_to(p(0.9, 0.6), p(1.0, 0.4), p(0.9, 0.2));
    path.curve_to(p(0.75, 0.0), p(0.5, 0.1), p(0.5, 0.25));
    path.close_path();
    path
}

/// Regular polygon with `points` vertices starting at 12 o'clock; `radius_at(i)` scales the
/// outer radius per vertex.
fn radial_polygon(w: f64, h: f64, points: usize, radius_at: impl Fn(usize) -> f64) -> BezPath {
    let c = Point::new(w / 2.0, h / 2.0);
    let outer = w.min(h) / 2.0;
    let step = TAU / points as f64;

    let mut path = BezPath::new();
    for i in 0..points {
        let r = outer * radius_at(i);
        let angle = i as f64 * step - FRAC_PI_2;
        let v = c + Vec2::new(r * angle.cos(), r * angle.sin());
        if i == 0 {
            path.move_to(v);
        } else {
            path.line_to(v);
        }
    }
    path.close_path();
    path
}

fn car(w: f64, h: f64) -> BezPath {
    let (s, o) = centered_square(w, h);
    let o = o + Vec2::new(0.0, s * 0.1);
    let p = |x: f64, y: f64| Point::new(o.x + s * x, o.y + s * y);

    let mut path = BezPath::new();
    path.move_to(p(0.1, 0.6));
    path.line_to(p(0.15, 0.7));
    wheel_arch(&mut path, p(0.25, 0.7), s * 0.1);
    path.line_to(p(0.65, 0.7));
    wheel_arch(&mut path, p(0.75, 0.7), s * 0.1);
    path.line_to(p(0.9, 0.6));
    path.line_to(p(0.9, 0.45));
    path.line_to(p(0.75, 0.3));
    path.line_to(p(0.4, 0.3));
    path.line_to(p(0.2, 0.45));
    path.line_to(p(0.1, 0.5));
    path.close_path();
    path
}

/// Half-circle from the left of `center` to its right, sweeping through the bottom.
fn wheel_arch(path: &mut BezPath, center: Point, radius: f64) {
    let arc = Arc::new(center, (radius, radius), PI, -PI, 0.0);
    path.line_to(center - Vec2::new(radius, 0.0));
    path.extend(arc.append_iter(TOLERANCE));
}

fn rabbit(w: f64, h: f64) -> BezPath {
    let c = Point::new(w / 2.0, h / 2.0);
    let s = w.min(h);

    let mut path = Circle::new(c + Vec2::new(0.0, s * 0.15), s * 0.3).to_path(TOLERANCE);
    for (dx, tilt) in [(-0.15, -0.2), (0.15, 0.2)] {
        let ear = Ellipse::new(
            c + Vec2::new(s * dx, -s * 0.3),
            (s * 0.08, s * 0.2),
            tilt,
        );
        path.extend(ear.path_elements(TOLERANCE));
    }
    path
}
