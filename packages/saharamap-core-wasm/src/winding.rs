// Ring orientation via the shoelace formula.
//
// Orientation is read with x = longitude, y = latitude: positive area means
// counter-clockwise. Rings with zero area (collinear or collapsed vertices,
// empty rings) count as satisfying either orientation and are never
// reversed. Any nonzero area has a sign, however small the ring.
use crate::geojson::{Position, Ring};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    Degenerate,
}

/// Twice the signed area: sum of `x[i]*y[i+1] - x[i+1]*y[i]` over
/// consecutive vertex pairs. Expects a closed ring.
pub fn shoelace_sum(ring: &[Position]) -> f64 {
    ring.windows(2)
        .map(|pair| pair[0].x() * pair[1].y() - pair[1].x() * pair[0].y())
        .sum()
}

pub fn signed_area(ring: &[Position]) -> f64 {
    shoelace_sum(ring) / 2.0
}

pub fn winding_of(ring: &[Position]) -> Winding {
    let area = signed_area(ring);
    if area == 0.0 {
        Winding::Degenerate
    } else if area > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}

/// Returns the ring unchanged when it is counter-clockwise (or degenerate),
/// otherwise its exact reverse.
pub fn enforce_counter_clockwise(mut ring: Ring) -> Ring {
    if winding_of(&ring) == Winding::Clockwise {
        ring.reverse();
    }
    ring
}

/// Returns the ring unchanged when it is clockwise (or degenerate),
/// otherwise its exact reverse.
pub fn enforce_clockwise(mut ring: Ring) -> Ring {
    if winding_of(&ring) == Winding::CounterClockwise {
        ring.reverse();
    }
    ring
}
