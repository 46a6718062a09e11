use crate::math::Point;

/// Events generated by iterating a path.
///
/// Each event of a contour carries the endpoints it needs, so that events can
/// be consumed without tracking the current position separately. A contour
/// always starts with a `Begin` and finishes with an `End`, whose `close`
/// flag distinguishes explicitly closed contours from open ones.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathEvent {
    Begin {
        at: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    /// A rational quadratic bézier segment.
    Conic {
        from: Point,
        ctrl: Point,
        to: Point,
        weight: f32,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    End {
        last: Point,
        first: Point,
        close: bool,
    },
}

impl PathEvent {
    /// The position at the end of this event.
    pub fn to(&self) -> Point {
        match self {
            PathEvent::Begin { at } => *at,
            PathEvent::Line { to, .. }
            | PathEvent::Quadratic { to, .. }
            | PathEvent::Conic { to, .. }
            | PathEvent::Cubic { to, .. } => *to,
            PathEvent::End { close: true, first, .. } => *first,
            PathEvent::End { close: false, last, .. } => *last,
        }
    }
}
