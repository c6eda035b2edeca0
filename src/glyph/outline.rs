//! Contour cleanup: splitting, overlap removal and direction correction.
//!
//! Outlines here are in font units with y pointing up. In that space kurbo's
//! signed area is positive for counter-clockwise contours.

use kurbo::{BezPath, ParamCurve, PathEl, PathSeg, Point, Shape, Vec2};

/// Contours with less area than this (in square font units) are dropped.
const MIN_AREA: f64 = 1e-3;

/// Split a path into closed contours, one per subpath.
///
/// Open subpaths are closed, and subpaths without any drawing segment are
/// discarded.
pub(crate) fn split_contours(path: &BezPath) -> Vec<BezPath> {
    let mut contours = Vec::new();
    let mut current = BezPath::new();
    let mut start = Point::ZERO;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                finish(&mut current, &mut contours);
                start = p;
                current.move_to(p);
            }
            PathEl::ClosePath => finish(&mut current, &mut contours),
            el => {
                // a drawing command directly after a close starts at the
                // previous subpath's start point
                if current.elements().is_empty() {
                    current.move_to(start);
                }
                current.push(el);
            }
        }
    }
    finish(&mut current, &mut contours);
    contours
}

fn finish(current: &mut BezPath, contours: &mut Vec<BezPath>) {
    let mut contour = std::mem::take(current);
    if contour.elements().len() > 1 {
        contour.close_path();
        contours.push(contour);
    }
}

/// Drop degenerate contours and exact duplicates.
///
/// Overlapping shapes are merged by the normalizing tool; what remains for us
/// is debris it leaves behind, such as zero-area slivers and repeated paths.
pub(crate) fn remove_overlaps(contours: Vec<BezPath>) -> Vec<BezPath> {
    let count = contours.len();
    let mut kept: Vec<BezPath> = Vec::with_capacity(count);
    for contour in contours {
        if contour.area().abs() < MIN_AREA {
            continue;
        }
        if kept.iter().any(|other| other.elements() == contour.elements()) {
            continue;
        }
        kept.push(contour);
    }
    if kept.len() != count {
        log::debug!("dropped {} degenerate or duplicate contours", count - kept.len());
    }
    kept
}

/// Wind outer contours clockwise and holes counter-clockwise.
///
/// A contour's depth is the number of other contours containing it, judged
/// by a majority of sample points just inside its own edges; even depths
/// are filled, odd depths are holes.
pub(crate) fn correct_directions(contours: &mut [BezPath]) {
    let depths: Vec<usize> = contours
        .iter()
        .enumerate()
        .map(|(i, contour)| {
            let samples = interior_samples(contour);
            if samples.is_empty() {
                return 0;
            }
            contours
                .iter()
                .enumerate()
                .filter(|(j, other)| {
                    let inside = samples.iter().filter(|p| other.contains(**p)).count();
                    *j != i && inside * 2 > samples.len()
                })
                .count()
        })
        .collect();

    for (contour, depth) in contours.iter_mut().zip(depths) {
        let area = contour.area();
        let clockwise = area < 0.0;
        let want_clockwise = depth % 2 == 0;
        if area != 0.0 && clockwise != want_clockwise {
            *contour = reverse_contour(contour);
        }
    }
}

/// Points a short distance inside `contour`, one per segment midpoint.
///
/// Points on an edge are ambiguous for containment tests, and contours left
/// by a union often share edges or vertices.
fn interior_samples(contour: &BezPath) -> Vec<Point> {
    let area = contour.area();
    if area == 0.0 {
        return start_point(contour).into_iter().collect();
    }
    let bbox = contour.bounding_box();
    let nudge = bbox.width().min(bbox.height()) * 1e-3;
    // interior is to the left of the direction of travel when counter-clockwise
    let side = area.signum();

    let samples: Vec<Point> = contour
        .segments()
        .filter_map(|seg| {
            let tangent = seg.eval(0.51) - seg.eval(0.49);
            let len = tangent.hypot();
            if len == 0.0 {
                return None;
            }
            let normal = Vec2::new(-tangent.y, tangent.x) * (side * nudge / len);
            let point = seg.eval(0.5) + normal;
            contour.contains(point).then_some(point)
        })
        .collect();
    if samples.is_empty() {
        return start_point(contour).into_iter().collect();
    }
    samples
}

fn start_point(contour: &BezPath) -> Option<Point> {
    match contour.elements().first() {
        Some(PathEl::MoveTo(p)) => Some(*p),
        _ => None,
    }
}

/// Reverse the direction of a single closed contour, keeping its start point.
pub(crate) fn reverse_contour(contour: &BezPath) -> BezPath {
    let segments: Vec<PathSeg> = contour.segments().collect();
    let Some(start) = start_point(contour) else {
        return contour.clone();
    };

    let mut reversed = BezPath::new();
    reversed.move_to(start);
    for (i, seg) in segments.iter().rev().enumerate() {
        let seg = seg.reverse();
        let is_last = i + 1 == segments.len();
        // the implied closing line
        if is_last && matches!(seg, PathSeg::Line(line) if line.p1 == start) {
            break;
        }
        reversed.push(seg.as_path_el());
    }
    reversed.close_path();
    reversed
}
