//! Arithmetic contractors: forward evaluation composed with backward
//! projection so every variable of the relation shrinks.

use crate::error::NarrowError;
use crate::interval::Interval;
use crate::round::{div_hi, div_lo};

type Pair = (Interval, Interval);
type Triple = (Interval, Interval, Interval);

pub(crate) fn narrow_add(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    let z = z.intersect(x.add(y)?)?;
    let x = x.intersect(z.sub(y)?)?;
    let y = y.intersect(z.sub(x)?)?;
    Ok((x, y, z))
}

pub(crate) fn narrow_mul(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    let z = z.intersect(x.mul(y))?;
    let y = intersect_odiv(y, &z, &x)?;
    let x = intersect_odiv(x, &z, &y)?;
    Ok((x, y, z))
}

pub(crate) fn narrow_minus(x: Interval, z: Interval) -> Result<Pair, NarrowError> {
    let z = z.intersect(x.neg())?;
    let x = x.intersect(z.neg())?;
    Ok((x, z))
}

pub(crate) fn narrow_abs(x: Interval, z: Interval) -> Result<Pair, NarrowError> {
    let z = z.intersect(x.fabs())?;
    // Keep the signed preimages of z that x already meets.
    let neg = x.intersect(z.neg());
    let pos = x.intersect(z);
    let x = match (neg, pos) {
        (Ok(a), Ok(b)) => a.hull(b),
        (Ok(a), Err(_)) => a,
        (Err(_), Ok(b)) => b,
        (Err(_), Err(_)) => return Err(NarrowError::Empty),
    };
    Ok((x, z))
}

pub(crate) fn narrow_min(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    let z = z.intersect(x.fmin(y))?;
    let mut x = x.intersect(Interval::above(z.lo))?;
    let mut y = y.intersect(Interval::above(z.lo))?;
    // An argument that cannot reach the minimum forces the other onto z.
    if y.lo > z.hi {
        x = x.intersect(z)?;
    } else if x.lo > z.hi {
        y = y.intersect(z)?;
    }
    Ok((x, y, z))
}

pub(crate) fn narrow_max(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    let z = z.intersect(x.fmax(y))?;
    let mut x = x.intersect(Interval::below(z.hi))?;
    let mut y = y.intersect(Interval::below(z.hi))?;
    if y.hi < z.lo {
        x = x.intersect(z)?;
    } else if x.hi < z.lo {
        y = y.intersect(z)?;
    }
    Ok((x, y, z))
}

pub(crate) fn narrow_exp(x: Interval, z: Interval) -> Result<Pair, NarrowError> {
    let z = z.intersect(x.exp())?;
    let x = x.intersect(z.log()?)?;
    Ok((x, z))
}

pub(crate) fn narrow_pow(x: Interval, y: Interval, z: Interval) -> Result<Triple, NarrowError> {
    // Exponent pinned at zero: z = 1 by convention, the base is unconstrained.
    if y.lo == 0.0 && y.hi == 0.0 {
        let z = z.intersect(Interval::point(1.0))?;
        return Ok((x, y, z));
    }

    // Point integer exponent: exact case dispatch forward, root backward.
    if y.is_point() && y.lo.fract() == 0.0 && y.lo.abs() <= i32::MAX as f64 {
        let n = y.lo as i32;
        let z = z.intersect(x.powi(n))?;
        let x = x.intersect(z.nth_root(n, &x)?)?;
        return Ok((x, y, z));
    }

    // General exponent: the base must be nonnegative.
    let x = x.intersect(Interval::above(0.0))?;
    let (x, z) = if x.hi == 0.0 {
        let z = if y.lo > 0.0 {
            z.intersect(Interval::point(0.0))?
        } else {
            z.intersect(Interval::above(0.0))?
        };
        (x, z)
    } else {
        let z = z.intersect(x.pow(y)?)?;
        // x ← z^(1/y) when the reciprocal exponent is informative.
        let x = match Interval::point(1.0).div(y) {
            Ok(inv) if inv != Interval::UNIVERSAL => match z.pow(inv) {
                Ok(p) => x.intersect(p)?,
                Err(_) => x,
            },
            _ => x,
        };
        (x, z)
    };

    // y ← log z / log x, defined only when the base stays positive.
    let y = if x.lo > 0.0 {
        match (z.log(), x.log()) {
            (Ok(lz), Ok(lx)) => match lz.div(lx) {
                Ok(q) => y.intersect(q)?,
                Err(_) => y,
            },
            _ => y,
        }
    } else {
        y
    };

    Ok((x, y, z))
}

pub(crate) fn narrow_integral(x: Interval) -> Result<Interval, NarrowError> {
    x.integer()
}

/// `target ← target ∩ num/den`, refined for a divisor that straddles zero:
/// the quotient is then two half-lines around zero, and only the half-lines
/// the target already reaches survive.
fn intersect_odiv(
    target: Interval,
    num: &Interval,
    den: &Interval,
) -> Result<Interval, NarrowError> {
    if den.lo == 0.0 && den.hi == 0.0 {
        return if num.contains(0.0) {
            Ok(target)
        } else {
            Err(NarrowError::Empty)
        };
    }
    if den.lo < 0.0 && den.hi > 0.0 {
        if num.contains(0.0) {
            return Ok(target);
        }
        let (left_hi, right_lo) = if num.lo > 0.0 {
            (div_hi(num.lo, den.lo), div_lo(num.lo, den.hi))
        } else {
            (div_hi(num.hi, den.hi), div_lo(num.hi, den.lo))
        };
        let left = target.intersect(Interval::below(left_hi));
        let right = target.intersect(Interval::above(right_lo));
        return match (left, right) {
            (Ok(l), Ok(r)) => Ok(l.hull(r)),
            (Ok(l), Err(_)) => Ok(l),
            (Err(_), Ok(r)) => Ok(r),
            (Err(_), Err(_)) => Err(NarrowError::Empty),
        };
    }
    target.intersect(num.div(*den)?)
}
