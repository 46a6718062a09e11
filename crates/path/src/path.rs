//! The default path data structure.

use crate::events::PathEvent;
use crate::geom::{Conic, CubicBezierSegment, QuadraticBezierSegment};
use crate::math::{point, Box2D, Point};

/// The verbs of a path's command tape.
///
/// `MoveTo` and `LineTo` consume one point, `QuadraticTo` and `ConicTo` two,
/// `CubicTo` three and `Close` none. `ConicTo` additionally consumes one
/// weight from the conic weight tape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    MoveTo,
    LineTo,
    QuadraticTo,
    ConicTo,
    CubicTo,
    Close,
}

/// A simple path data structure.
///
/// The data is stored as flat verb, point and conic-weight tapes, in the
/// order the path was built in. `Path` is immutable; use
/// [`PathBuilder`](crate::PathBuilder) to create or accumulate one.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    pub(crate) points: Box<[Point]>,
    pub(crate) verbs: Box<[Verb]>,
    pub(crate) conic_weights: Box<[f32]>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Path::default()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// The raw verb tape.
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// The raw point tape.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The weights of the `ConicTo` verbs, in order.
    pub fn conic_weights(&self) -> &[f32] {
        &self.conic_weights
    }

    /// The last endpoint of the path, if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Returns whether all points and conic weights are finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
            && self.conic_weights.iter().all(|w| w.is_finite())
    }

    /// Iterates over the path, one [`PathEvent`] at a time.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.points, &self.verbs, &self.conic_weights)
    }

    /// The axis-aligned bounding box of the control points.
    ///
    /// Fast but conservative: curve control points may lie outside of the
    /// curve itself. See [`Path::tight_bounds`].
    pub fn bounds(&self) -> Box2D {
        bounding_box_of_points(&self.points)
    }

    /// The smallest axis-aligned bounding box containing the path.
    ///
    /// More expensive than [`Path::bounds`]: curve segments contribute their
    /// endpoints and the positions of their interior per-axis extrema rather
    /// than their control points.
    pub fn tight_bounds(&self) -> Box2D {
        let mut min = point(f32::MAX, f32::MAX);
        let mut max = point(f32::MIN, f32::MIN);
        let mut any = false;
        let mut add = |p: Point| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            any = true;
        };

        for event in self.iter() {
            match event {
                PathEvent::Begin { at } => add(at),
                PathEvent::Line { to, .. } => add(to),
                PathEvent::Quadratic { from, ctrl, to } => {
                    let segment = QuadraticBezierSegment { from, ctrl, to };
                    if let Some(t) = segment.local_x_extremum_t() {
                        add(segment.sample(t));
                    }
                    if let Some(t) = segment.local_y_extremum_t() {
                        add(segment.sample(t));
                    }
                    add(to);
                }
                PathEvent::Conic {
                    from,
                    ctrl,
                    to,
                    weight,
                } => {
                    let conic = Conic::new(from, ctrl, to, weight);
                    conic.for_each_local_x_extremum_t(&mut |t| add(conic.sample(t)));
                    conic.for_each_local_y_extremum_t(&mut |t| add(conic.sample(t)));
                    add(to);
                }
                PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                } => {
                    let segment = CubicBezierSegment {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    };
                    segment.for_each_local_x_extremum_t(&mut |t| add(segment.sample(t)));
                    segment.for_each_local_y_extremum_t(&mut |t| add(segment.sample(t)));
                    add(to);
                }
                PathEvent::End { .. } => {}
            }
        }

        if !any {
            return Box2D::zero();
        }

        Box2D { min, max }
    }
}

impl std::fmt::Debug for Path {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn write_point(formatter: &mut std::fmt::Formatter, p: Point) -> std::fmt::Result {
            write!(formatter, " {:?} {:?}", p.x, p.y)
        }

        write!(formatter, "\"")?;
        for event in self.iter() {
            match event {
                PathEvent::Begin { at } => {
                    write!(formatter, " M")?;
                    write_point(formatter, at)?;
                }
                PathEvent::Line { to, .. } => {
                    write!(formatter, " L")?;
                    write_point(formatter, to)?;
                }
                PathEvent::Quadratic { ctrl, to, .. } => {
                    write!(formatter, " Q")?;
                    write_point(formatter, ctrl)?;
                    write_point(formatter, to)?;
                }
                PathEvent::Conic { ctrl, to, weight, .. } => {
                    write!(formatter, " K")?;
                    write_point(formatter, ctrl)?;
                    write_point(formatter, to)?;
                    write!(formatter, " {:?}", weight)?;
                }
                PathEvent::Cubic { ctrl1, ctrl2, to, .. } => {
                    write!(formatter, " C")?;
                    write_point(formatter, ctrl1)?;
                    write_point(formatter, ctrl2)?;
                    write_point(formatter, to)?;
                }
                PathEvent::End { close: true, .. } => {
                    write!(formatter, " Z")?;
                }
                PathEvent::End { close: false, .. } => {}
            }
        }
        write!(formatter, "\"")
    }
}

pub(crate) fn bounding_box_of_points(points: &[Point]) -> Box2D {
    let first = match points.first() {
        Some(p) => *p,
        None => return Box2D::zero(),
    };
    let mut min = first;
    let mut max = first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Box2D { min, max }
}

/// An iterator over the events of a [`Path`].
///
/// `End` events are synthesized: at each `Close` verb, before each `MoveTo`
/// that follows an open contour, and at the end of the verb tape.
#[derive(Clone)]
pub struct Iter<'l> {
    points: &'l [Point],
    verbs: &'l [Verb],
    conic_weights: &'l [f32],
    verb: usize,
    point: usize,
    weight: usize,
    first: Point,
    current: Point,
    contour_open: bool,
}

impl<'l> Iter<'l> {
    pub(crate) fn new(points: &'l [Point], verbs: &'l [Verb], conic_weights: &'l [f32]) -> Self {
        Iter {
            points,
            verbs,
            conic_weights,
            verb: 0,
            point: 0,
            weight: 0,
            first: point(0.0, 0.0),
            current: point(0.0, 0.0),
            contour_open: false,
        }
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        let verb = match self.verbs.get(self.verb) {
            Some(verb) => *verb,
            None => {
                if self.contour_open {
                    self.contour_open = false;
                    return Some(PathEvent::End {
                        last: self.current,
                        first: self.first,
                        close: false,
                    });
                }
                return None;
            }
        };

        match verb {
            Verb::MoveTo => {
                if self.contour_open {
                    // Terminate the previous contour before consuming the
                    // MoveTo verb.
                    self.contour_open = false;
                    return Some(PathEvent::End {
                        last: self.current,
                        first: self.first,
                        close: false,
                    });
                }
                self.verb += 1;
                let at = self.points[self.point];
                self.point += 1;
                self.first = at;
                self.current = at;
                self.contour_open = true;
                Some(PathEvent::Begin { at })
            }
            Verb::LineTo => {
                self.verb += 1;
                let from = self.current;
                let to = self.points[self.point];
                self.point += 1;
                self.current = to;
                Some(PathEvent::Line { from, to })
            }
            Verb::QuadraticTo => {
                self.verb += 1;
                let from = self.current;
                let ctrl = self.points[self.point];
                let to = self.points[self.point + 1];
                self.point += 2;
                self.current = to;
                Some(PathEvent::Quadratic { from, ctrl, to })
            }
            Verb::ConicTo => {
                self.verb += 1;
                let from = self.current;
                let ctrl = self.points[self.point];
                let to = self.points[self.point + 1];
                self.point += 2;
                let weight = self.conic_weights[self.weight];
                self.weight += 1;
                self.current = to;
                Some(PathEvent::Conic {
                    from,
                    ctrl,
                    to,
                    weight,
                })
            }
            Verb::CubicTo => {
                self.verb += 1;
                let from = self.current;
                let ctrl1 = self.points[self.point];
                let ctrl2 = self.points[self.point + 1];
                let to = self.points[self.point + 2];
                self.point += 3;
                self.current = to;
                Some(PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                })
            }
            Verb::Close => {
                self.verb += 1;
                let last = self.current;
                self.current = self.first;
                self.contour_open = false;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathBuilder;

    #[test]
    fn iter_events() {
        let mut builder = PathBuilder::new();
        builder.move_to(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        builder.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
        builder.close();
        builder.move_to(point(10.0, 0.0));
        builder.line_to(point(11.0, 1.0));
        let path = builder.build();

        let mut iter = path.iter();
        assert_eq!(iter.next(), Some(PathEvent::Begin { at: point(0.0, 0.0) }));
        assert_eq!(
            iter.next(),
            Some(PathEvent::Line {
                from: point(0.0, 0.0),
                to: point(1.0, 0.0)
            })
        );
        assert_eq!(
            iter.next(),
            Some(PathEvent::Quadratic {
                from: point(1.0, 0.0),
                ctrl: point(2.0, 0.0),
                to: point(2.0, 1.0)
            })
        );
        assert_eq!(
            iter.next(),
            Some(PathEvent::End {
                last: point(2.0, 1.0),
                first: point(0.0, 0.0),
                close: true
            })
        );
        assert_eq!(
            iter.next(),
            Some(PathEvent::Begin {
                at: point(10.0, 0.0)
            })
        );
        assert_eq!(
            iter.next(),
            Some(PathEvent::Line {
                from: point(10.0, 0.0),
                to: point(11.0, 1.0)
            })
        );
        assert_eq!(
            iter.next(),
            Some(PathEvent::End {
                last: point(11.0, 1.0),
                first: point(10.0, 0.0),
                close: false
            })
        );
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn end_synthesized_before_move_to() {
        let mut builder = PathBuilder::new();
        builder.move_to(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        builder.move_to(point(5.0, 5.0));
        let path = builder.build();

        let events: Vec<_> = path.iter().collect();
        assert_eq!(
            events,
            vec![
                PathEvent::Begin { at: point(0.0, 0.0) },
                PathEvent::Line {
                    from: point(0.0, 0.0),
                    to: point(1.0, 0.0)
                },
                PathEvent::End {
                    last: point(1.0, 0.0),
                    first: point(0.0, 0.0),
                    close: false
                },
                PathEvent::Begin { at: point(5.0, 5.0) },
                PathEvent::End {
                    last: point(5.0, 5.0),
                    first: point(5.0, 5.0),
                    close: false
                },
            ]
        );
    }

    #[test]
    fn tight_bounds_of_arch() {
        let mut builder = PathBuilder::new();
        builder.move_to(point(0.0, 0.0));
        builder.quadratic_bezier_to(point(1.0, 2.0), point(2.0, 0.0));
        let path = builder.build();

        // The control box includes the control point at y = 2 but the curve
        // only reaches y = 1.
        let bounds = path.bounds();
        assert_eq!(bounds.max.y, 2.0);

        let tight = path.tight_bounds();
        assert_eq!(tight.min, point(0.0, 0.0));
        assert_eq!(tight.max, point(2.0, 1.0));
    }

    #[test]
    fn finiteness() {
        let mut builder = PathBuilder::new();
        builder.move_to(point(0.0, 0.0));
        builder.line_to(point(f32::NAN, 0.0));
        let path = builder.build();
        assert!(!path.is_finite());

        let mut builder = PathBuilder::new();
        builder.move_to(point(0.0, 0.0));
        builder.line_to(point(1.0, 0.0));
        assert!(builder.build().is_finite());
    }
}
