//! Boolean contractors: closed truth-table propagation. Operands are first
//! forced into `[0,1]`, then the surviving rows of the table are hulled per
//! coordinate; no surviving row is a failure.

use crate::error::NarrowError;
use crate::interval::Interval;

type Pair = (Interval, Interval);
type Triple = (Interval, Interval, Interval);

pub(crate) fn narrow_not(x: Interval, z: Interval) -> Result<Pair, NarrowError> {
    let x = x.intersect(Interval::BOOL_ANY)?;
    let z = z.intersect(Interval::BOOL_ANY)?;

    let mut xs = None;
    let mut zs = None;
    for a in [false, true] {
        if x.admits(a) && z.admits(!a) {
            xs = hull_point(xs, a);
            zs = hull_point(zs, !a);
        }
    }
    match (xs, zs) {
        (Some(x), Some(z)) => Ok((x, z)),
        _ => Err(NarrowError::Empty),
    }
}

pub(crate) fn narrow_and(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    narrow_table(|a, b| a && b, x, y, z)
}

pub(crate) fn narrow_or(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    narrow_table(|a, b| a || b, x, y, z)
}

pub(crate) fn narrow_xor(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    narrow_table(|a, b| a ^ b, x, y, z)
}

pub(crate) fn narrow_nand(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    narrow_table(|a, b| !(a && b), x, y, z)
}

pub(crate) fn narrow_nor(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    narrow_table(|a, b| !(a || b), x, y, z)
}

pub(crate) fn narrow_implies(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    narrow_table(|a, b| !a || b, x, y, z)
}

fn narrow_table(
    op: impl Fn(bool, bool) -> bool,
    x: Interval,
    y: Interval,
    z: Interval,
) -> Result<Triple, NarrowError> {
    let x = x.intersect(Interval::BOOL_ANY)?;
    let y = y.intersect(Interval::BOOL_ANY)?;
    let z = z.intersect(Interval::BOOL_ANY)?;

    let mut xs = None;
    let mut ys = None;
    let mut zs = None;
    for a in [false, true] {
        if !x.admits(a) {
            continue;
        }
        for b in [false, true] {
            if !y.admits(b) {
                continue;
            }
            let c = op(a, b);
            if !z.admits(c) {
                continue;
            }
            xs = hull_point(xs, a);
            ys = hull_point(ys, b);
            zs = hull_point(zs, c);
        }
    }
    match (xs, ys, zs) {
        (Some(x), Some(y), Some(z)) => Ok((x, y, z)),
        _ => Err(NarrowError::Empty),
    }
}

fn hull_point(acc: Option<Interval>, b: bool) -> Option<Interval> {
    let p = if b { Interval::TRUE } else { Interval::FALSE };
    Some(match acc {
        None => p,
        Some(iv) => iv.hull(p),
    })
}
