//! 2D half-plane feasibility.
//!
//! The ghost-checkpoint test asks whether a handful of linear
//! constraints admit any point at all. With two variables and at most
//! eleven constraints per query there is no need for a general LP
//! solver: if a closed convex region is nonempty, at least one vertex
//! of the constraint arrangement lies inside it, so enumerating
//! pairwise intersections is a complete test. Callers keep the region
//! closed by including a bounding box.

/// One linear constraint `a*x + b*y + c <= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Slack allowed when testing a point against a normalized constraint.
/// Checkpoint coordinates run in the tens of thousands, so a micro-unit
/// of play keeps shared boundary points feasible.
const TOLERANCE: f64 = 1e-6;

impl HalfPlane {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The complementary half-plane (the boundary flips sides too).
    pub fn flipped(self) -> Self {
        Self {
            a: -self.a,
            b: -self.b,
            c: -self.c,
        }
    }

    /// Scale so the normal has unit length, making the residual a
    /// signed distance. Zero normals are returned unchanged.
    fn normalized(self) -> Self {
        let h = self.a.hypot(self.b);
        if h > 0.0 {
            Self {
                a: self.a / h,
                b: self.b / h,
                c: self.c / h,
            }
        } else {
            self
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        self.a * x + self.b * y + self.c <= TOLERANCE
    }
}

/// The four half-planes of the axis-aligned square `[min, max]` in both
/// coordinates.
pub fn boxed(min: f64, max: f64) -> [HalfPlane; 4] {
    [
        HalfPlane::new(-1.0, 0.0, min),
        HalfPlane::new(1.0, 0.0, -max),
        HalfPlane::new(0.0, -1.0, min),
        HalfPlane::new(0.0, 1.0, -max),
    ]
}

/// A point satisfying every constraint, if one exists.
///
/// Boundary points count as feasible. Any NaN coefficient (degenerate
/// zero-length checkpoint lines produce them) makes the system
/// infeasible rather than poisoning the result.
pub fn feasible_point(planes: &[HalfPlane]) -> Option<[f64; 2]> {
    let planes: Vec<HalfPlane> = planes.iter().map(|p| p.normalized()).collect();

    for p in &planes {
        // A constraint with no normal is a constant: either always true
        // or always false.
        if p.a == 0.0 && p.b == 0.0 && !(p.c <= TOLERANCE) {
            return None;
        }
    }

    for (i, p) in planes.iter().enumerate() {
        for q in &planes[i + 1..] {
            let det = p.a * q.b - p.b * q.a;
            if det.abs() < 1e-12 {
                continue;
            }
            let x = (p.b * q.c - p.c * q.b) / det;
            let y = (q.a * p.c - p.a * q.c) / det;
            if planes.iter().all(|r| r.contains(x, y)) {
                return Some([x, y]);
            }
        }
    }
    None
}
