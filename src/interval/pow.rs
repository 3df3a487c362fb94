//! Power and exponential interval operations

use super::value::{Interval, Kind, SignClass, classify};
use crate::error::NarrowError;
use crate::round::{exp_hi, exp_lo, ipow_hi, ipow_lo, is_exact_int, log_hi, log_lo, root_hi, root_lo};

impl Interval {
    pub fn exp(self) -> Interval {
        Interval::real(exp_lo(self.lo).max(0.0), exp_hi(self.hi))
    }

    /// Natural log; requires a positive upper bound. A nonpositive lower
    /// bound maps to the −∞ sentinel.
    pub fn log(self) -> Result<Interval, NarrowError> {
        if !(self.hi > 0.0) {
            return Err(NarrowError::Empty);
        }
        let lo = if self.lo <= 0.0 {
            f64::NEG_INFINITY
        } else {
            log_lo(self.lo)
        };
        Ok(Interval::real(lo, log_hi(self.hi)))
    }

    /// Integer power, dispatched on the base's sign class, the exponent's
    /// sign, and its parity.
    pub fn powi(self, n: i32) -> Interval {
        if n == 0 {
            let kind = if self.kind.is_integer() {
                Kind::Int
            } else {
                Kind::Real
            };
            return Interval {
                lo: 1.0,
                hi: 1.0,
                kind,
            };
        }

        let int = self.kind.is_integer() && n > 0;
        let kind = if int { Kind::Int } else { Kind::Real };
        let even = n % 2 == 0;
        let ep = |x: f64, up: bool| -> f64 {
            if int {
                ipow_int(x, n)
            } else if up {
                ipow_hi(x, n)
            } else {
                ipow_lo(x, n)
            }
        };

        if n > 0 {
            if !even {
                return Interval {
                    lo: ep(self.lo, false),
                    hi: ep(self.hi, true),
                    kind,
                };
            }
            match classify(&self, false) {
                SignClass::Pos => Interval {
                    lo: ep(self.lo, false),
                    hi: ep(self.hi, true),
                    kind,
                },
                SignClass::Neg => Interval {
                    lo: ep(self.hi, false),
                    hi: ep(self.lo, true),
                    kind,
                },
                SignClass::Mix => {
                    let big = if -self.lo > self.hi { self.lo } else { self.hi };
                    Interval {
                        lo: 0.0,
                        hi: ep(big, true),
                        kind,
                    }
                }
            }
        } else {
            // Reciprocal powers; a zero endpoint saturates to the infinity of
            // the matching sign.
            match classify(&self, false) {
                SignClass::Pos => {
                    let hi = if self.lo == 0.0 {
                        f64::INFINITY
                    } else {
                        ep(self.lo, true)
                    };
                    Interval {
                        lo: ep(self.hi, false),
                        hi,
                        kind,
                    }
                }
                SignClass::Neg if even => {
                    let hi = if self.hi == 0.0 {
                        f64::INFINITY
                    } else {
                        ep(self.hi, true)
                    };
                    Interval {
                        lo: ep(self.lo, false),
                        hi,
                        kind,
                    }
                }
                SignClass::Neg => {
                    let lo = if self.hi == 0.0 {
                        f64::NEG_INFINITY
                    } else {
                        ep(self.hi, false)
                    };
                    Interval {
                        lo,
                        hi: ep(self.lo, true),
                        kind,
                    }
                }
                SignClass::Mix if even => Interval {
                    lo: ep(self.lo, false).min(ep(self.hi, false)),
                    hi: f64::INFINITY,
                    kind,
                },
                SignClass::Mix => Interval::UNIVERSAL,
            }
        }
    }

    /// General power for a base with positive upper bound: `exp(y · log x)`.
    pub fn pow(self, exponent: Interval) -> Result<Interval, NarrowError> {
        let lx = self.log()?;
        Ok(exponent.mul(lx).exp())
    }

    /// Inverse of [`Interval::powi`]. `target` is the domain being narrowed;
    /// its sign decides which root branches participate. Branches are hulled,
    /// the caller intersects.
    pub fn nth_root(self, n: i32, target: &Interval) -> Result<Interval, NarrowError> {
        if n == 0 {
            return Err(NarrowError::Undefined);
        }
        if n < 0 {
            // x^(−m) = z  ⇔  x^m = 1/z
            let recip = Interval::point(1.0).div(self)?;
            return recip.nth_root(-n, target);
        }

        if n % 2 == 0 {
            // An even power is nonnegative; fails when the target of the
            // power is entirely negative.
            let z = self.intersect(Interval::above(0.0))?;
            let pos = Interval::real(root_lo(z.lo, n), root_hi(z.hi, n));
            match (target.hi >= 0.0, target.lo <= 0.0) {
                (true, true) => Ok(pos.neg().hull(pos)),
                (true, false) => Ok(pos),
                (false, true) => Ok(pos.neg()),
                (false, false) => Err(NarrowError::Empty),
            }
        } else {
            Ok(Interval::real(
                signed_root(self.lo, n, false),
                signed_root(self.hi, n, true),
            ))
        }
    }
}

fn signed_root(v: f64, n: i32, up: bool) -> f64 {
    if v >= 0.0 {
        if up { root_hi(v, n) } else { root_lo(v, n) }
    } else if up {
        -root_lo(-v, n)
    } else {
        -root_hi(-v, n)
    }
}

/// Saturating integer-kind power endpoint.
fn ipow_int(x: f64, n: i32) -> f64 {
    let r = x.powi(n);
    if x == 0.0 || is_exact_int(r) || r.is_infinite() {
        r
    } else {
        f64::INFINITY.copysign(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_power_of_negative_base() {
        let z = Interval::int(-3.0, -1.0).powi(2);
        assert_eq!((z.lo, z.hi), (1.0, 9.0));
        assert_eq!(z.kind, Kind::Int);
    }

    #[test]
    fn even_power_of_straddling_base() {
        let z = Interval::real(-3.0, 2.0).powi(2);
        assert_eq!((z.lo, z.hi), (0.0, 9.0));
    }

    #[test]
    fn zero_base_stays_exact() {
        let z = Interval::real(0.0, 0.0).powi(5);
        assert_eq!((z.lo, z.hi), (0.0, 0.0));
    }

    #[test]
    fn negative_exponent_saturates_at_zero() {
        let z = Interval::real(0.0, 2.0).powi(-1);
        assert!(z.lo <= 0.5 && z.hi == f64::INFINITY);
        let z = Interval::real(-1.0, 1.0).powi(-3);
        assert_eq!(z, Interval::UNIVERSAL);
    }

    #[test]
    fn root_branches_follow_target() {
        let z = Interval::int(1.0, 4.0);
        let both = z.nth_root(2, &Interval::real(-5.0, 0.0)).unwrap();
        assert_eq!((both.lo, both.hi), (-2.0, 2.0));
        let pos = z.nth_root(2, &Interval::real(0.5, 9.0)).unwrap();
        assert_eq!((pos.lo, pos.hi), (1.0, 2.0));
    }

    #[test]
    fn even_root_of_negative_fails() {
        let z = Interval::real(-4.0, -1.0);
        assert!(z.nth_root(2, &Interval::UNIVERSAL).is_err());
    }

    #[test]
    fn odd_root_preserves_sign() {
        let r = Interval::real(-8.0, 27.0)
            .nth_root(3, &Interval::UNIVERSAL)
            .unwrap();
        assert_eq!((r.lo, r.hi), (-2.0, 3.0));
    }

    #[test]
    fn exp_log_enclose() {
        let z = Interval::real(0.0, 1.0).exp();
        assert!(z.lo <= 1.0 && z.hi >= std::f64::consts::E);
        assert!(z.lo >= 0.0);

        let l = Interval::real(0.0, 1.0).log().unwrap();
        assert_eq!(l.lo, f64::NEG_INFINITY);
        assert!(l.hi >= 0.0);

        assert!(Interval::real(-2.0, 0.0).log().is_err());
    }
}
