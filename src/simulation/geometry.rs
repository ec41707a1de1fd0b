use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn cross(self, w: Vec2) -> f64 {
        self.x * w.y - self.y * w.x
    }

    pub fn dot(self, w: Vec2) -> f64 {
        self.x * w.x + self.y * w.y
    }

    pub fn add(self, w: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + w.x,
            y: self.y + w.y,
        }
    }

    pub fn subtract(self, w: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - w.x,
            y: self.y - w.y,
        }
    }

    pub fn scale(self, k: f64) -> Vec2 {
        Vec2 {
            x: self.x * k,
            y: self.y * k,
        }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance_to(self, w: Vec2) -> f64 {
        self.subtract(w).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn vector(&self) -> Vec2 {
        self.b.subtract(self.a)
    }

    pub fn is_flat(&self) -> bool {
        self.a.y == self.b.y
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        self.intersection_parameter(other).is_some()
    }

    /// Point where the two segments cross, `None` when they don't.
    /// Collinear segments never intersect, even when they overlap.
    pub fn intersection_with(&self, other: &Segment) -> Option<Vec2> {
        let t = self.intersection_parameter(other)?;
        Some(self.a.add(self.vector().scale(t)))
    }

    // https://stackoverflow.com/questions/563198/how-do-you-detect-where-two-line-segments-intersect
    fn intersection_parameter(&self, other: &Segment) -> Option<f64> {
        let r = self.vector();
        let s = other.vector();
        let qmp = other.a.subtract(self.a);

        let rxs = r.cross(s);
        let qmpxr = qmp.cross(r);

        if rxs == 0. {
            // collinear (qmpxr == 0) or parallel, both count as no intersection
            return None;
        }

        let t = qmp.cross(s) / rxs;
        let u = qmpxr / rxs;
        if (0. ..=1.).contains(&t) && (0. ..=1.).contains(&u) {
            Some(t)
        } else {
            None
        }
    }

    pub fn distance_to(&self, point: Vec2) -> f64 {
        let r = self.vector();
        let l2 = r.dot(r);
        if l2 == 0. {
            return point.distance_to(self.a);
        }
        let t = (point.subtract(self.a).dot(r) / l2).clamp(0., 1.);
        point.distance_to(self.a.add(r.scale(t)))
    }
}

#[cfg(test)]
mod segment_tests {
    use super::*;

    fn segment((ax, ay): (f64, f64), (bx, by): (f64, f64)) -> Segment {
        Segment::new(Vec2::new(ax, ay), Vec2::new(bx, by))
    }

    fn check(a: ((f64, f64), (f64, f64)), b: ((f64, f64), (f64, f64))) -> Option<(f64, f64)> {
        segment(a.0, a.1)
            .intersection_with(&segment(b.0, b.1))
            .map(|Vec2 { x, y }| (x, y))
    }

    #[test]
    fn not_parallel_disjoint() {
        assert!(check(((-1., -3.), (-5., -4.)), ((1., 1.), (5., 1.))).is_none());
    }

    #[test]
    fn parallel_disjoint() {
        assert!(check(((1., 3.), (6., 3.)), ((1., 1.), (5., 1.))).is_none());
    }

    #[test]
    fn collinear_disjoint() {
        assert!(check(((6., 1.), (7., 1.)), ((1., 1.), (5., 1.))).is_none());
    }

    #[test]
    fn collinear_overlapping() {
        let a = segment((0., 0.), (10., 0.));
        let b = segment((5., 0.), (15., 0.));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn collinear_touching() {
        assert!(check(((-3., 1.), (1., 1.)), ((1., 1.), (3., 1.))).is_none());
    }

    #[test]
    fn crossing_diagonals() {
        assert_eq!(
            check(((0., 0.), (10., 10.)), ((0., 10.), (10., 0.))),
            Some((5., 5.))
        );
    }

    #[test]
    fn touching_not_parallel() {
        let (x, y) = check(((1., 5.), (2., 2.)), ((0., 0.), (3., 3.))).unwrap();
        assert_eq!(x, 2.);
        assert_eq!(y, 2.);
    }

    fn assert_close_to(point: Option<(f64, f64)>, (ex, ey): (f64, f64)) {
        let (x, y) = point.expect("segments should intersect");
        if (x - ex).abs() > 1e-9 || (y - ey).abs() > 1e-9 {
            panic!("Intersection ({x}, {y}) not close to ({ex}, {ey})");
        }
    }

    #[test]
    fn direction_independent() {
        assert_close_to(check(((2., 5.), (2., -2.)), ((0., 0.), (3., 3.))), (2., 2.));
        assert_close_to(check(((2., 5.), (2., -2.)), ((3., 3.), (0., 0.))), (2., 2.));
        assert_close_to(check(((2., -2.), (2., 5.)), ((0., 0.), (3., 3.))), (2., 2.));
        assert_close_to(check(((0., 0.), (3., 3.)), ((2., 5.), (2., -2.))), (2., 2.));
    }

    #[test]
    fn zero_length_segment_never_intersects() {
        let point = segment((1., 1.), (1., 1.));
        assert!(!point.intersects(&segment((0., 0.), (2., 2.))));
        assert!(!segment((0., 1.), (2., 1.)).intersects(&point));
    }

    #[test]
    fn distance_inside_projection() {
        let s = segment((0., 0.), (10., 0.));
        assert_eq!(s.distance_to(Vec2::new(5., 3.)), 3.);
    }

    #[test]
    fn distance_clamped_to_endpoint() {
        let s = segment((0., 0.), (10., 0.));
        assert_eq!(s.distance_to(Vec2::new(13., 4.)), 5.);
        assert_eq!(s.distance_to(Vec2::new(-3., -4.)), 5.);
    }

    #[test]
    fn distance_to_degenerate_segment() {
        let s = segment((1., 1.), (1., 1.));
        assert_eq!(s.distance_to(Vec2::new(4., 5.)), 5.);
    }
}
