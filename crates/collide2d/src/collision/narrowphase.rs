//! Pairwise narrow-phase contact generation
//!
//! Dispatches concrete shape pairs to specialized tests: an analytic test
//! for circle-circle, a closest-feature test for circle-versus-outline, and
//! a separating-axis test with reference/incident edge clipping for
//! everything polygonal. Composite operands never reach this module; the
//! [`Collider`](crate::collision::Collider) dispatch fans them out first.

use std::borrow::Cow;

use crate::collision::contact::CollisionContact;
use crate::collision::primitives::{Line, Projection};
use crate::collision::{CircleCollider, Collider, ColliderId, EdgeCollider, PolygonCollider};
use crate::foundation::math::utils::cross;
use crate::foundation::math::{Point2, Vec2};

/// Axes shorter than this are treated as degenerate and skipped
const AXIS_EPSILON: f32 = 1e-6;

/// Separation tolerance when filtering clipped contact points
const FACE_EPSILON: f32 = 1e-6;

/// A polygonal outline viewed as a vertex chain for SAT and clipping
struct Chain<'a> {
    id: ColliderId,
    verts: Cow<'a, [Point2]>,
    axes: Vec<Vec2>,
    closed: bool,
}

impl Chain<'_> {
    fn center(&self) -> Point2 {
        let sum = self
            .verts
            .iter()
            .fold(Vec2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / self.verts.len() as f32)
    }

    fn segments(&self) -> Vec<Line> {
        let n = self.verts.len();
        let count = if self.closed { n } else { n - 1 };
        (0..count)
            .map(|i| Line::new(self.verts[i], self.verts[(i + 1) % n]))
            .collect()
    }
}

fn polygon_chain(polygon: &PolygonCollider) -> Chain<'_> {
    Chain {
        id: polygon.id(),
        verts: Cow::Borrowed(polygon.points()),
        axes: polygon.axes(),
        closed: true,
    }
}

fn edge_chain(edge: &EdgeCollider) -> Chain<'static> {
    Chain {
        id: edge.id(),
        verts: Cow::Owned(vec![edge.begin(), edge.end()]),
        axes: edge.axes(),
        closed: false,
    }
}

enum ShapeRef<'a> {
    Circle(&'a CircleCollider),
    Chain(Chain<'a>),
}

fn shape_ref(collider: &Collider) -> Option<ShapeRef<'_>> {
    match collider {
        Collider::Circle(c) => Some(ShapeRef::Circle(c)),
        Collider::Polygon(p) => Some(ShapeRef::Chain(polygon_chain(p))),
        Collider::Edge(e) => Some(ShapeRef::Chain(edge_chain(e))),
        Collider::Composite(_) => None,
    }
}

/// Generate contacts between two concrete (non-composite) colliders
pub(crate) fn collide_pair(a: &Collider, b: &Collider) -> Vec<CollisionContact> {
    let (sa, sb) = match (shape_ref(a), shape_ref(b)) {
        (Some(sa), Some(sb)) => (sa, sb),
        // Composites are fanned out before reaching this module
        _ => return Vec::new(),
    };

    let contact = match (sa, sb) {
        (ShapeRef::Circle(x), ShapeRef::Circle(y)) => circle_circle(x, y),
        (ShapeRef::Circle(x), ShapeRef::Chain(y)) => circle_chain(x, &y),
        (ShapeRef::Chain(x), ShapeRef::Circle(y)) => circle_chain(y, &x).map(CollisionContact::flipped),
        (ShapeRef::Chain(x), ShapeRef::Chain(y)) => chain_chain(&x, &y),
    };

    contact.into_iter().collect()
}

/// Shortest connecting segment between two concrete colliders
pub(crate) fn closest_line_pair(a: &Collider, b: &Collider) -> Option<Line> {
    let (sa, sb) = match (shape_ref(a), shape_ref(b)) {
        (Some(sa), Some(sb)) => (sa, sb),
        _ => return None,
    };

    match (sa, sb) {
        (ShapeRef::Circle(x), ShapeRef::Circle(y)) => Some(circle_circle_line(x, y)),
        (ShapeRef::Circle(x), ShapeRef::Chain(y)) => Some(circle_chain_line(x, &y)),
        (ShapeRef::Chain(x), ShapeRef::Circle(y)) => {
            let line = circle_chain_line(y, &x);
            Some(Line::new(line.end, line.begin))
        }
        (ShapeRef::Chain(x), ShapeRef::Chain(y)) => chain_chain_line(&x, &y),
    }
}

fn circle_circle(a: &CircleCollider, b: &CircleCollider) -> Option<CollisionContact> {
    let delta = b.center() - a.center();
    let radius_sum = a.radius() + b.radius();
    let dist_sq = delta.norm_squared();
    if dist_sq > radius_sum * radius_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > AXIS_EPSILON {
        delta / dist
    } else {
        Vec2::x() // Coincident centers, direction is arbitrary
    };
    let penetration = radius_sum - dist;
    let point = a.center() + normal * (a.radius() - penetration * 0.5);

    Some(CollisionContact {
        a: a.id(),
        b: b.id(),
        points: vec![point],
        normal,
        penetration,
    })
}

fn circle_chain(circle: &CircleCollider, chain: &Chain<'_>) -> Option<CollisionContact> {
    let center = circle.center();

    if chain.closed && point_in_verts(center, &chain.verts) {
        return Some(circle_inside_contact(circle, chain));
    }

    // Closest point on the outline to the circle center
    let mut closest: Option<Point2> = None;
    let mut closest_dist_sq = f32::MAX;
    for segment in chain.segments() {
        let candidate = segment.closest_point_to(center);
        let dist_sq = (candidate - center).norm_squared();
        if dist_sq < closest_dist_sq {
            closest = Some(candidate);
            closest_dist_sq = dist_sq;
        }
    }
    let closest = closest?;

    if closest_dist_sq > circle.radius() * circle.radius() {
        return None;
    }

    let dist = closest_dist_sq.sqrt();
    let normal = if dist > AXIS_EPSILON {
        (closest - center) / dist
    } else {
        // Center exactly on the outline
        (chain.center() - center)
            .try_normalize(AXIS_EPSILON)
            .unwrap_or_else(Vec2::x)
    };

    Some(CollisionContact {
        a: circle.id(),
        b: chain.id,
        points: vec![closest],
        normal,
        penetration: circle.radius() - dist,
    })
}

/// Contact for a circle whose center lies inside a closed outline
fn circle_inside_contact(circle: &CircleCollider, chain: &Chain<'_>) -> CollisionContact {
    let center = circle.center();
    let n = chain.verts.len();

    // The least-penetrated edge is the cheapest way out
    let mut best_separation = f32::MIN;
    let mut best_normal = Vec2::x();
    for i in 0..n {
        let edge = chain.verts[(i + 1) % n] - chain.verts[i];
        let Some(outward) = Vec2::new(edge.y, -edge.x).try_normalize(AXIS_EPSILON) else {
            continue;
        };
        let separation = (center - chain.verts[i]).dot(&outward);
        if separation > best_separation {
            best_separation = separation;
            best_normal = outward;
        }
    }

    let point = center - best_normal * best_separation;
    CollisionContact {
        a: circle.id(),
        b: chain.id,
        points: vec![point],
        // From the circle toward the outline interior
        normal: -best_normal,
        penetration: circle.radius() - best_separation,
    }
}

fn chain_chain(a: &Chain<'_>, b: &Chain<'_>) -> Option<CollisionContact> {
    let mut best_overlap = f32::MAX;
    let mut best_axis: Option<Vec2> = None;

    for axis in a.axes.iter().chain(b.axes.iter()) {
        let overlap = project_verts(&a.verts, *axis).overlap_amount(&project_verts(&b.verts, *axis));
        if overlap < 0.0 {
            return None; // Separating axis
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            best_axis = Some(*axis);
        }
    }

    let axis = best_axis?;
    let to_other = b.center() - a.center();
    let normal = if axis.dot(&to_other) < 0.0 { -axis } else { axis };

    let mut points = clip_contact_points(a, b, normal);
    if points.is_empty() {
        // Degenerate clip, fall back to the deepest vertex of b
        points.push(support_point(&b.verts, -normal));
    }

    Some(CollisionContact {
        a: a.id,
        b: b.id,
        points,
        normal,
        penetration: best_overlap,
    })
}

/// Contact points from clipping the incident edge against the reference face
fn clip_contact_points(a: &Chain<'_>, b: &Chain<'_>, normal: Vec2) -> Vec<Point2> {
    let (ref_begin, ref_end) = best_edge(a, normal);
    let (inc_begin, inc_end) = best_edge(b, -normal);

    let Some(ref_dir) = (ref_end - ref_begin).try_normalize(AXIS_EPSILON) else {
        return Vec::new();
    };

    let clipped = clip_segment(inc_begin, inc_end, ref_dir, ref_dir.dot(&ref_begin.coords));
    if clipped.len() < 2 {
        return Vec::new();
    }
    let clipped = clip_segment(
        clipped[0],
        clipped[1],
        -ref_dir,
        -ref_dir.dot(&ref_end.coords),
    );

    // Keep only the points at or behind the reference face
    clipped
        .into_iter()
        .filter(|p| normal.dot(&(*p - ref_begin)) <= FACE_EPSILON)
        .collect()
}

/// The edge of the chain most perpendicular to the given direction among
/// those touching the support vertex
fn best_edge(chain: &Chain<'_>, direction: Vec2) -> (Point2, Point2) {
    let verts = &chain.verts;
    if verts.len() == 2 || !chain.closed {
        return (verts[0], verts[1]);
    }

    let n = verts.len();
    let mut support = 0;
    let mut support_dot = verts[0].coords.dot(&direction);
    for (i, v) in verts.iter().enumerate().skip(1) {
        let dot = v.coords.dot(&direction);
        if dot > support_dot {
            support = i;
            support_dot = dot;
        }
    }

    let prev = (support + n - 1) % n;
    let next = (support + 1) % n;
    let incoming = verts[support] - verts[prev];
    let outgoing = verts[next] - verts[support];

    if incoming.dot(&direction).abs() < outgoing.dot(&direction).abs() {
        (verts[prev], verts[support])
    } else {
        (verts[support], verts[next])
    }
}

/// Keep the part of a segment on the positive side of `normal . p >= offset`
fn clip_segment(v1: Point2, v2: Point2, normal: Vec2, offset: f32) -> Vec<Point2> {
    let d1 = normal.dot(&v1.coords) - offset;
    let d2 = normal.dot(&v2.coords) - offset;

    let mut out = Vec::with_capacity(2);
    if d1 >= 0.0 {
        out.push(v1);
    }
    if d2 >= 0.0 {
        out.push(v2);
    }
    if d1 * d2 < 0.0 {
        let t = d1 / (d1 - d2);
        out.push(v1 + (v2 - v1) * t);
    }
    out
}

fn project_verts(verts: &[Point2], axis: Vec2) -> Projection {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for v in verts {
        let dot = v.coords.dot(&axis);
        min = min.min(dot);
        max = max.max(dot);
    }
    Projection::new(min, max)
}

fn support_point(verts: &[Point2], direction: Vec2) -> Point2 {
    let mut best = verts[0];
    let mut best_dot = best.coords.dot(&direction);
    for v in &verts[1..] {
        let dot = v.coords.dot(&direction);
        if dot > best_dot {
            best = *v;
            best_dot = dot;
        }
    }
    best
}

/// Point-in-polygon for a counter-clockwise outline
fn point_in_verts(point: Point2, verts: &[Point2]) -> bool {
    let n = verts.len();
    for i in 0..n {
        let edge = verts[(i + 1) % n] - verts[i];
        if cross(edge, point - verts[i]) < -AXIS_EPSILON {
            return false;
        }
    }
    true
}

fn circle_circle_line(a: &CircleCollider, b: &CircleCollider) -> Line {
    let normal = (b.center() - a.center())
        .try_normalize(AXIS_EPSILON)
        .unwrap_or_else(Vec2::x);
    Line::new(
        a.center() + normal * a.radius(),
        b.center() - normal * b.radius(),
    )
}

fn circle_chain_line(circle: &CircleCollider, chain: &Chain<'_>) -> Line {
    let center = circle.center();
    let mut closest = chain.verts[0];
    let mut closest_dist_sq = f32::MAX;
    for segment in chain.segments() {
        let candidate = segment.closest_point_to(center);
        let dist_sq = (candidate - center).norm_squared();
        if dist_sq < closest_dist_sq {
            closest = candidate;
            closest_dist_sq = dist_sq;
        }
    }
    let dir = (closest - center)
        .try_normalize(AXIS_EPSILON)
        .unwrap_or_else(Vec2::x);
    Line::new(center + dir * circle.radius(), closest)
}

fn chain_chain_line(a: &Chain<'_>, b: &Chain<'_>) -> Option<Line> {
    let mut best: Option<Line> = None;
    let mut best_length_sq = f32::MAX;
    for sa in a.segments() {
        for sb in b.segments() {
            let candidate = sa.closest_line_to(&sb);
            let length_sq = candidate.length_squared();
            if length_sq < best_length_sq {
                best = Some(candidate);
                best_length_sq = length_sq;
            }
        }
    }
    best
}
