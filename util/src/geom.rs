use glam::{ivec2, IVec2};

use crate::HashSet;

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

/// 4 directions, clock face order.
pub const DIR_4: [IVec2; 4] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 0]),
];

/// Step through the cells of a line from `a` towards `b`.
///
/// The end point `b` itself is not yielded.
pub fn bresenham_line(
    a: impl Into<IVec2>,
    b: impl Into<IVec2>,
) -> impl Iterator<Item = IVec2> {
    let (a, b): (IVec2, IVec2) = (a.into(), b.into());

    let d = b - a;
    let step = d.signum();
    let d = d.abs() * ivec2(1, -1);
    let mut p = a;
    let mut err = d.x + d.y;

    std::iter::from_fn(move || {
        if p == b {
            None
        } else {
            let ret = p;

            let e2 = 2 * err;
            if e2 >= d.y {
                err += d.y;
                p.x += step.x;
            }
            if e2 <= d.x {
                err += d.x;
                p.y += step.y;
            }
            Some(ret)
        }
    })
}

// The plotting functions below only know about the target grid through the
// `is_valid` predicate. Cells that fail it are left out of the result.

/// Plot a line between two points, both end points included.
pub fn plot_line(
    a: impl Into<IVec2>,
    b: impl Into<IVec2>,
    is_valid: impl Fn(IVec2) -> bool,
) -> HashSet<IVec2> {
    let b = b.into();
    bresenham_line(a, b)
        .chain(Some(b))
        .filter(|&p| is_valid(p))
        .collect()
}

/// Plot every cell of the rectangle spanned by two opposite corners.
pub fn plot_filled_rect(
    a: impl Into<IVec2>,
    b: impl Into<IVec2>,
    is_valid: impl Fn(IVec2) -> bool,
) -> HashSet<IVec2> {
    let (a, b): (IVec2, IVec2) = (a.into(), b.into());
    let (min, max) = (a.min(b), a.max(b));

    let mut ret = HashSet::default();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let p = ivec2(x, y);
            if is_valid(p) {
                ret.insert(p);
            }
        }
    }
    ret
}

/// Plot the outline of the rectangle spanned by two opposite corners.
pub fn plot_empty_rect(
    a: impl Into<IVec2>,
    b: impl Into<IVec2>,
    is_valid: impl Fn(IVec2) -> bool,
) -> HashSet<IVec2> {
    let (a, b): (IVec2, IVec2) = (a.into(), b.into());
    let corners = [a, ivec2(b.x, a.y), b, ivec2(a.x, b.y)];

    let mut ret = HashSet::default();
    for i in 0..4 {
        ret.extend(plot_line(corners[i], corners[(i + 1) % 4], &is_valid));
    }
    ret
}

/// Plot a circle by scanning its bounding box.
///
/// A cell at offset (x, y) from the center is inside the circle when
/// `x² + y² < r² + r` and on the outline when it is inside and also
/// `x² + y² > r² - r`. If `filled` is false, only the outline is plotted.
pub fn plot_circle(
    center: impl Into<IVec2>,
    radius: i32,
    filled: bool,
    is_valid: impl Fn(IVec2) -> bool,
) -> HashSet<IVec2> {
    let center = center.into();
    let r = radius.abs();
    let (inner, outer) = (r * r - r, r * r + r);

    let mut ret = HashSet::default();
    for y in -r..=r {
        for x in -r..=r {
            let d = x * x + y * y;
            let accept = if filled {
                d < outer
            } else {
                d < outer && d > inner
            };

            let p = center + ivec2(x, y);
            if accept && is_valid(p) {
                ret.insert(p);
            }
        }
    }
    ret
}
