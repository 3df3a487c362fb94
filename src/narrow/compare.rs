//! Comparison contractors. Each takes the two compared domains plus a
//! boolean result domain, decides the result from bound order where it can,
//! and narrows the operands once the result is settled.

use super::ops::Params;
use crate::error::NarrowError;
use crate::interval::Interval;

type Triple = (Interval, Interval, Interval);

pub(crate) fn narrow_eq(
    x: Interval,
    y: Interval,
    z: Interval,
    params: &Params,
) -> Result<Triple, NarrowError> {
    let z = z.intersect(Interval::BOOL_ANY)?;
    match z.known_bool() {
        Some(true) => {
            let w = x.intersect(y)?;
            Ok((w, w, z))
        }
        Some(false) => {
            let (x, y) = if params.persistent {
                ne_trim(x, y)?
            } else {
                (x, y)
            };
            if x.is_point() && y.is_point() && x.lo == y.lo {
                return Err(NarrowError::Empty);
            }
            Ok((x, y, z))
        }
        None => {
            let z = if x.is_disjoint(&y) {
                z.intersect(Interval::FALSE)?
            } else if x.is_point() && y.is_point() && x.lo == y.lo {
                z.intersect(Interval::TRUE)?
            } else {
                z
            };
            Ok((x, y, z))
        }
    }
}

pub(crate) fn narrow_ne(
    x: Interval,
    y: Interval,
    z: Interval,
    params: &Params,
) -> Result<Triple, NarrowError> {
    let z = z.intersect(Interval::BOOL_ANY)?;
    match z.known_bool() {
        Some(true) => {
            let (x, y) = if params.persistent {
                ne_trim(x, y)?
            } else {
                (x, y)
            };
            if x.is_point() && y.is_point() && x.lo == y.lo {
                return Err(NarrowError::Empty);
            }
            Ok((x, y, z))
        }
        Some(false) => {
            let w = x.intersect(y)?;
            Ok((w, w, z))
        }
        None => {
            let z = if x.is_disjoint(&y) {
                z.intersect(Interval::TRUE)?
            } else if x.is_point() && y.is_point() && x.lo == y.lo {
                z.intersect(Interval::FALSE)?
            } else {
                z
            };
            Ok((x, y, z))
        }
    }
}

pub(crate) fn narrow_le(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    let z = z.intersect(Interval::BOOL_ANY)?;
    let z = if x.hi <= y.lo {
        z.intersect(Interval::TRUE)?
    } else if y.hi < x.lo {
        z.intersect(Interval::FALSE)?
    } else {
        z
    };
    match z.known_bool() {
        Some(true) => {
            let x = x.intersect(Interval::below(y.hi))?;
            let y = y.intersect(Interval::above(x.lo))?;
            Ok((x, y, z))
        }
        Some(false) => {
            let (y, x) = strictly_less(y, x)?;
            Ok((x, y, z))
        }
        None => Ok((x, y, z)),
    }
}

pub(crate) fn narrow_lt(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    let z = z.intersect(Interval::BOOL_ANY)?;
    let z = if x.hi < y.lo {
        z.intersect(Interval::TRUE)?
    } else if y.hi <= x.lo {
        z.intersect(Interval::FALSE)?
    } else {
        z
    };
    match z.known_bool() {
        Some(true) => {
            let (x, y) = strictly_less(x, y)?;
            Ok((x, y, z))
        }
        Some(false) => {
            // ¬(x < y) is y ≤ x
            let y = y.intersect(Interval::below(x.hi))?;
            let x = x.intersect(Interval::above(y.lo))?;
            Ok((x, y, z))
        }
        None => Ok((x, y, z)),
    }
}

/// Inclusion constraint X ⊆ Y.
pub(crate) fn narrow_sub(
    x: Interval,
    y: Interval,
    z: Interval,
    params: &Params,
) -> Result<Triple, NarrowError> {
    let z = z.intersect(Interval::BOOL_ANY)?;
    match x.intersect(y) {
        Ok(w) if z.known_bool() != Some(false) => {
            let z = z.intersect(Interval::TRUE)?;
            Ok((w, y, z))
        }
        Ok(_) => {
            if x.subset(&y) {
                // The inclusion already holds everywhere; z = 0 is infeasible.
                return Err(NarrowError::Empty);
            }
            Ok((x, y, z))
        }
        Err(_) => {
            if z.known_bool() == Some(true) {
                return Err(NarrowError::Empty);
            }
            let z = if params.persistent {
                z.intersect(Interval::FALSE)?
            } else {
                z
            };
            Ok((x, y, z))
        }
    }
}

/// Enforce `a < b`, using one-apart bounds on integer kinds and closed
/// bounds on reals.
fn strictly_less(a: Interval, b: Interval) -> Result<(Interval, Interval), NarrowError> {
    let gap = if a.kind.is_integer() && b.kind.is_integer() {
        1.0
    } else {
        0.0
    };
    let a = a.intersect(Interval::below(b.hi - gap))?;
    let b = b.intersect(Interval::above(a.lo + gap))?;
    Ok((a, b))
}

/// A point operand touching the other operand's matching endpoint excludes
/// that endpoint; meaningful for integer kinds only.
fn ne_trim(x: Interval, y: Interval) -> Result<(Interval, Interval), NarrowError> {
    let x = trim_endpoint(x, &y)?;
    let y = trim_endpoint(y, &x)?;
    Ok((x, y))
}

fn trim_endpoint(t: Interval, point: &Interval) -> Result<Interval, NarrowError> {
    if !t.kind.is_integer() || !point.is_point() || point.lo.fract() != 0.0 {
        return Ok(t);
    }
    let v = point.lo;
    if t.is_point() && t.lo == v {
        return Err(NarrowError::Empty);
    }
    if t.lo == v {
        Ok(Interval { lo: v + 1.0, ..t })
    } else if t.hi == v {
        Ok(Interval { hi: v - 1.0, ..t })
    } else {
        Ok(t)
    }
}
