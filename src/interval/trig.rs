//! Periodic functions over a principal cylinder.
//! Inputs are projected onto one period by an integer multiplier, treated
//! sector-by-sector where the function is monotone, and projected back.

use super::value::Interval;
use crate::error::NarrowError;
use crate::round::{
    acos_hi, acos_lo, add_hi, add_lo, asin_hi, asin_lo, atan_hi, atan_lo, cos_hi, cos_lo,
    next_down, next_up, sin_hi, sin_lo, sub_hi, sub_lo, tan_hi, tan_lo,
};

pub(crate) const PI_LO: f64 = std::f64::consts::PI;
pub(crate) const PI_HI: f64 = f64::from_bits(std::f64::consts::PI.to_bits() + 1);
pub(crate) const TWO_PI_LO: f64 = std::f64::consts::TAU;
pub(crate) const TWO_PI_HI: f64 = f64::from_bits(std::f64::consts::TAU.to_bits() + 1);
pub(crate) const HALF_PI_LO: f64 = std::f64::consts::FRAC_PI_2;
pub(crate) const HALF_PI_HI: f64 = f64::from_bits(std::f64::consts::FRAC_PI_2.to_bits() + 1);

/// Outcome of projecting an interval onto the principal cylinder of width
/// `w`: both ends in one cylinder, spread over two adjacent cylinders, or
/// too wide to benefit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Wrap {
    Same(f64),
    Split(f64),
    TooWide,
}

pub(crate) fn cylinder(x: &Interval, w: f64) -> Wrap {
    if !x.lo.is_finite() || !x.hi.is_finite() || x.hi - x.lo > w {
        return Wrap::TooWide;
    }
    // The same rounding is applied at both ends so point intervals are
    // preserved.
    let ml = (x.lo / w).round();
    let mh = (x.hi / w).round();
    if ml == mh {
        Wrap::Same(ml)
    } else if mh - ml == 1.0 {
        Wrap::Split(ml)
    } else {
        Wrap::TooWide
    }
}

/// Lower bound of `t·w` where the period `w` is only known to lie in
/// `[w_lo, w_hi]`.
fn offset_lo(t: f64, w_lo: f64, w_hi: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t > 0.0 {
        next_down(t * w_lo)
    } else {
        next_down(t * w_hi)
    }
}

fn offset_hi(t: f64, w_lo: f64, w_hi: f64) -> f64 {
    if t == 0.0 {
        0.0
    } else if t > 0.0 {
        next_up(t * w_hi)
    } else {
        next_up(t * w_lo)
    }
}

fn project(x: &Interval, m: f64, w_lo: f64, w_hi: f64) -> Interval {
    if m == 0.0 {
        return Interval::real(x.lo, x.hi);
    }
    Interval::real(
        sub_lo(x.lo, offset_hi(m, w_lo, w_hi)),
        sub_hi(x.hi, offset_lo(m, w_lo, w_hi)),
    )
}

fn unproject(xp: &Interval, m: f64, w_lo: f64, w_hi: f64) -> Interval {
    if m == 0.0 {
        return *xp;
    }
    Interval::real(
        add_lo(xp.lo, offset_lo(m, w_lo, w_hi)),
        add_hi(xp.hi, offset_hi(m, w_lo, w_hi)),
    )
}

/// Reflection `c − v` for a constant `c` enclosed by `[c_lo, c_hi]`; its own
/// inverse, used to fold outer sectors onto the monotone middle sector.
fn reflect(c_lo: f64, c_hi: f64, iv: &Interval) -> Interval {
    Interval::real(sub_lo(c_lo, iv.hi), sub_hi(c_hi, iv.lo))
}

fn accumulate(
    acc: Option<(Interval, Interval)>,
    x: Interval,
    z: Interval,
) -> Option<(Interval, Interval)> {
    Some(match acc {
        None => (x, z),
        Some((ax, az)) => (ax.hull(x), az.hull(z)),
    })
}

/// Monotone-increasing sine over a sector within `[−π/2, π/2]`: forward
/// enclosure, then backward arcsine. A result bound that reaches ±1 leaves
/// the matching side unconstrained, so values hugging the extremum from the
/// far side of the quarter-period survive.
fn mono_sin(r: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    let z2 = z.intersect(Interval::real(
        sin_lo(r.lo).max(-1.0),
        sin_hi(r.hi).min(1.0),
    ))?;
    let back_lo = if z2.lo <= -1.0 {
        f64::NEG_INFINITY
    } else {
        asin_lo(z2.lo)
    };
    let back_hi = if z2.hi >= 1.0 {
        f64::INFINITY
    } else {
        asin_hi(z2.hi)
    };
    let r2 = r.intersect(Interval::real(back_lo, back_hi))?;
    Ok((r2, z2))
}

/// Monotone-decreasing cosine over a sector within `[0, π]`.
fn mono_cos(r: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    let z2 = z.intersect(Interval::real(
        cos_lo(r.hi).max(-1.0),
        cos_hi(r.lo).min(1.0),
    ))?;
    let back_lo = if z2.hi >= 1.0 {
        f64::NEG_INFINITY
    } else {
        acos_lo(z2.hi)
    };
    let back_hi = if z2.lo <= -1.0 {
        f64::INFINITY
    } else {
        acos_hi(z2.lo)
    };
    let r2 = r.intersect(Interval::real(back_lo, back_hi))?;
    Ok((r2, z2))
}

/// Sector treatment of sine on one cylinder: `[−π, −π/2]` and `[π/2, π]`
/// fold onto the middle sector through `±π − x`.
fn sin_sectors(xp: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    let mut acc = None;

    if let Ok(s) = xp.intersect(Interval::below(-HALF_PI_LO)) {
        let r = reflect(-PI_HI, -PI_LO, &s);
        if let Ok((r2, z2)) = mono_sin(r, z)
            && let Ok(x2) = reflect(-PI_HI, -PI_LO, &r2).intersect(s)
        {
            acc = accumulate(acc, x2, z2);
        }
    }
    if let Ok(s) = xp.intersect(Interval::real(-HALF_PI_HI, HALF_PI_HI)) {
        if let Ok((x2, z2)) = mono_sin(s, z) {
            acc = accumulate(acc, x2, z2);
        }
    }
    if let Ok(s) = xp.intersect(Interval::above(HALF_PI_LO)) {
        let r = reflect(PI_LO, PI_HI, &s);
        if let Ok((r2, z2)) = mono_sin(r, z)
            && let Ok(x2) = reflect(PI_LO, PI_HI, &r2).intersect(s)
        {
            acc = accumulate(acc, x2, z2);
        }
    }

    acc.ok_or(NarrowError::Empty)
}

/// Sector treatment of cosine on one cylinder: `[−π, 0]` folds onto
/// `[0, π]` through negation.
fn cos_sectors(xp: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    let mut acc = None;

    if let Ok(s) = xp.intersect(Interval::below(0.0)) {
        if let Ok((r2, z2)) = mono_cos(s.neg(), z)
            && let Ok(x2) = r2.neg().intersect(s)
        {
            acc = accumulate(acc, x2, z2);
        }
    }
    if let Ok(s) = xp.intersect(Interval::above(0.0)) {
        if let Ok((x2, z2)) = mono_cos(s, z) {
            acc = accumulate(acc, x2, z2);
        }
    }

    acc.ok_or(NarrowError::Empty)
}

/// Tangent on one cylinder, monotone increasing. An endpoint that may sit on
/// the far side of the pole saturates the matching bound.
fn tan_cyl(xp: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    let lo = if xp.lo <= -HALF_PI_LO {
        f64::NEG_INFINITY
    } else {
        tan_lo(xp.lo)
    };
    let hi = if xp.hi >= HALF_PI_LO {
        f64::INFINITY
    } else {
        tan_hi(xp.hi)
    };
    let z2 = z.intersect(Interval::real(lo, hi))?;
    let xp2 = xp.intersect(Interval::real(atan_lo(z2.lo), atan_hi(z2.hi)))?;
    Ok((xp2, z2))
}

type Sectors = fn(Interval, Interval) -> Result<(Interval, Interval), NarrowError>;

fn refine_periodic(
    x: Interval,
    z: Interval,
    w_lo: f64,
    w_hi: f64,
    w: f64,
    sectors: Sectors,
) -> Result<Option<(Interval, Interval)>, NarrowError> {
    match cylinder(&x, w) {
        Wrap::TooWide => Ok(None),
        Wrap::Same(m) => {
            let xp = project(&x, m, w_lo, w_hi);
            let (xp2, z2) = sectors(xp, z)?;
            let x2 = x.intersect(unproject(&xp2, m, w_lo, w_hi))?;
            Ok(Some((x2, z2)))
        }
        Wrap::Split(m) => {
            // Two adjacent cylinders: cut at the shared boundary and treat
            // each side on its own cylinder.
            let t = m + 0.5;
            let mut acc = None;

            if let Ok(half) = x.intersect(Interval::below(offset_hi(t, w_lo, w_hi))) {
                let xp = project(&half, m, w_lo, w_hi);
                if let Ok((xp2, z2)) = sectors(xp, z)
                    && let Ok(x2) = half.intersect(unproject(&xp2, m, w_lo, w_hi))
                {
                    acc = accumulate(acc, x2, z2);
                }
            }
            if let Ok(half) = x.intersect(Interval::above(offset_lo(t, w_lo, w_hi))) {
                let xp = project(&half, m + 1.0, w_lo, w_hi);
                if let Ok((xp2, z2)) = sectors(xp, z)
                    && let Ok(x2) = half.intersect(unproject(&xp2, m + 1.0, w_lo, w_hi))
                {
                    acc = accumulate(acc, x2, z2);
                }
            }

            acc.map(Some).ok_or(NarrowError::Empty)
        }
    }
}

/// Joint refinement of `z = sin(x)`. Returns the narrowed `(x, z)`; when the
/// input is too wide for cylinder projection only `z` narrows.
pub(crate) fn sin_refine(x: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    let z = z.intersect(Interval::real(-1.0, 1.0))?;
    match refine_periodic(x, z, TWO_PI_LO, TWO_PI_HI, std::f64::consts::TAU, sin_sectors)? {
        Some(narrowed) => Ok(narrowed),
        None => Ok((x, z)),
    }
}

/// Joint refinement of `z = cos(x)`.
pub(crate) fn cos_refine(x: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    let z = z.intersect(Interval::real(-1.0, 1.0))?;
    match refine_periodic(x, z, TWO_PI_LO, TWO_PI_HI, std::f64::consts::TAU, cos_sectors)? {
        Some(narrowed) => Ok(narrowed),
        None => Ok((x, z)),
    }
}

/// Joint refinement of `z = tan(x)` over the π-cylinder.
pub(crate) fn tan_refine(x: Interval, z: Interval) -> Result<(Interval, Interval), NarrowError> {
    match refine_periodic(x, z, PI_LO, PI_HI, std::f64::consts::PI, tan_cyl)? {
        Some(narrowed) => Ok(narrowed),
        None => Ok((x, z)),
    }
}

impl Interval {
    pub fn sin(self) -> Interval {
        sin_refine(self, Interval::real(-1.0, 1.0))
            .map(|(_, z)| z)
            .unwrap_or(Interval::real(-1.0, 1.0))
    }

    pub fn cos(self) -> Interval {
        cos_refine(self, Interval::real(-1.0, 1.0))
            .map(|(_, z)| z)
            .unwrap_or(Interval::real(-1.0, 1.0))
    }

    pub fn tan(self) -> Interval {
        tan_refine(self, Interval::UNIVERSAL)
            .map(|(_, z)| z)
            .unwrap_or(Interval::UNIVERSAL)
    }

    pub fn asin(self) -> Result<Interval, NarrowError> {
        let c = self.intersect(Interval::real(-1.0, 1.0))?;
        Ok(Interval::real(asin_lo(c.lo), asin_hi(c.hi)))
    }

    /// Comonotone: the low result bound comes from the high argument bound.
    pub fn acos(self) -> Result<Interval, NarrowError> {
        let c = self.intersect(Interval::real(-1.0, 1.0))?;
        Ok(Interval::real(acos_lo(c.hi).max(0.0), acos_hi(c.lo)))
    }

    pub fn atan(self) -> Interval {
        Interval::real(atan_lo(self.lo), atan_hi(self.hi))
    }
}
