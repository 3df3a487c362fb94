use super::value::{Interval, Kind, SignClass, classify};
use crate::error::NarrowError;
use crate::round::{
    add_hi, add_lo, div_hi, div_lo, iadd, imul, isub, mul_hi, mul_lo, sub_hi, sub_lo,
};

impl Interval {
    pub fn add(self, other: Interval) -> Result<Interval, NarrowError> {
        let kind = self.kind.join(other.kind);
        let (lo, hi) = if kind == Kind::Int {
            (iadd(self.lo, other.lo), iadd(self.hi, other.hi))
        } else {
            (add_lo(self.lo, other.lo), add_hi(self.hi, other.hi))
        };
        checked(lo, hi, kind)
    }

    pub fn sub(self, other: Interval) -> Result<Interval, NarrowError> {
        let kind = self.kind.join(other.kind);
        let (lo, hi) = if kind == Kind::Int {
            (isub(self.lo, other.hi), isub(self.hi, other.lo))
        } else {
            (sub_lo(self.lo, other.hi), sub_hi(self.hi, other.lo))
        };
        checked(lo, hi, kind)
    }

    /// Negation is exact at every endpoint.
    pub fn neg(self) -> Interval {
        let kind = if self.kind == Kind::Bool {
            Kind::Int
        } else {
            self.kind
        };
        Interval {
            lo: -self.hi,
            hi: -self.lo,
            kind,
        }
    }

    pub fn mul(self, other: Interval) -> Interval {
        let kind = self.kind.join(other.kind);
        // A zero interval annihilates even an unbounded partner.
        if (self.lo == 0.0 && self.hi == 0.0) || (other.lo == 0.0 && other.hi == 0.0) {
            return Interval {
                lo: 0.0,
                hi: 0.0,
                kind,
            };
        }

        let int = kind == Kind::Int;
        let mk = |lo_a: f64, lo_b: f64, hi_a: f64, hi_b: f64| Interval {
            lo: ep_mul(lo_a, lo_b, int, false),
            hi: ep_mul(hi_a, hi_b, int, true),
            kind,
        };

        let (a, b) = (&self, &other);
        match (classify(a, false), classify(b, false)) {
            (SignClass::Pos, SignClass::Pos) => mk(a.lo, b.lo, a.hi, b.hi),
            (SignClass::Pos, SignClass::Neg) => mk(a.hi, b.lo, a.lo, b.hi),
            (SignClass::Pos, SignClass::Mix) => mk(a.hi, b.lo, a.hi, b.hi),
            (SignClass::Neg, SignClass::Pos) => mk(a.lo, b.hi, a.hi, b.lo),
            (SignClass::Neg, SignClass::Neg) => mk(a.hi, b.hi, a.lo, b.lo),
            (SignClass::Neg, SignClass::Mix) => mk(a.lo, b.hi, a.lo, b.lo),
            (SignClass::Mix, SignClass::Pos) => mk(a.lo, b.hi, a.hi, b.hi),
            (SignClass::Mix, SignClass::Neg) => mk(a.hi, b.lo, a.lo, b.lo),
            (SignClass::Mix, SignClass::Mix) => {
                mk(a.hi, b.lo, a.lo, b.lo).hull(mk(a.lo, b.hi, a.hi, b.hi))
            }
        }
    }

    /// Quotient enclosure. A divisor that strictly straddles zero yields the
    /// universal interval; a signed-zero divisor endpoint saturates the
    /// corresponding bound to the signed infinity.
    pub fn div(self, other: Interval) -> Result<Interval, NarrowError> {
        if other.lo == 0.0 && other.hi == 0.0 {
            return if self.contains(0.0) {
                Ok(Interval::UNIVERSAL)
            } else {
                Err(NarrowError::Empty)
            };
        }
        if other.lo < 0.0 && other.hi > 0.0 {
            return Ok(Interval::UNIVERSAL);
        }

        let den_neg = other.hi <= 0.0;
        let mk = |num_lo: f64, den_lo: f64, num_hi: f64, den_hi: f64| {
            let lo = ep_div(num_lo, den_lo, den_neg, false)?;
            let hi = ep_div(num_hi, den_hi, den_neg, true)?;
            Ok(Interval::real(lo, hi))
        };

        let (a, b) = (&self, &other);
        match (classify(a, false), den_neg) {
            (SignClass::Pos, false) => mk(a.lo, b.hi, a.hi, b.lo),
            (SignClass::Pos, true) => mk(a.hi, b.hi, a.lo, b.lo),
            (SignClass::Neg, false) => mk(a.lo, b.lo, a.hi, b.hi),
            (SignClass::Neg, true) => mk(a.hi, b.lo, a.lo, b.hi),
            (SignClass::Mix, false) => mk(a.lo, b.lo, a.hi, b.lo),
            (SignClass::Mix, true) => mk(a.hi, b.hi, a.lo, b.hi),
        }
    }

    /// Endpointwise minimum; exact.
    pub fn fmin(self, other: Interval) -> Interval {
        Interval {
            lo: self.lo.min(other.lo),
            hi: self.hi.min(other.hi),
            kind: self.kind.join(other.kind),
        }
    }

    /// Endpointwise maximum; exact.
    pub fn fmax(self, other: Interval) -> Interval {
        Interval {
            lo: self.lo.max(other.lo),
            hi: self.hi.max(other.hi),
            kind: self.kind.join(other.kind),
        }
    }

    /// Absolute value; exact.
    pub fn fabs(self) -> Interval {
        match classify(&self, false) {
            SignClass::Pos => self,
            SignClass::Neg => self.neg().with_kind(self.kind),
            SignClass::Mix => Interval {
                lo: 0.0,
                hi: (-self.lo).max(self.hi),
                kind: self.kind,
            },
        }
    }
}

fn checked(lo: f64, hi: f64, kind: Kind) -> Result<Interval, NarrowError> {
    if lo.is_nan() || hi.is_nan() {
        return Err(NarrowError::Undefined);
    }
    Ok(Interval { lo, hi, kind })
}

fn ep_mul(a: f64, b: f64, int: bool, up: bool) -> f64 {
    // A zero endpoint pins the product endpoint at exact zero, which also
    // resolves the 0·∞ pairings the sign dispatch can produce.
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    if int {
        imul(a, b)
    } else if up {
        mul_hi(a, b)
    } else {
        mul_lo(a, b)
    }
}

fn ep_div(n: f64, d: f64, den_neg: bool, up: bool) -> Result<f64, NarrowError> {
    if d == 0.0 {
        if n == 0.0 {
            return Ok(0.0);
        }
        let toward_pos = (n > 0.0) != den_neg;
        return Ok(if toward_pos {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        });
    }
    if n.is_infinite() && d.is_infinite() {
        return Err(NarrowError::Undefined);
    }
    Ok(if up { div_hi(n, d) } else { div_lo(n, d) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_integer_endpoints_exact() {
        let z = Interval::real(2.0, 3.0)
            .add(Interval::real(-1.0, 4.0))
            .unwrap();
        assert_eq!((z.lo, z.hi), (1.0, 7.0));
    }

    #[test]
    fn add_real_endpoints_widen() {
        let z = Interval::real(0.1, 0.2)
            .add(Interval::real(0.3, 0.4))
            .unwrap();
        assert!(z.lo < 0.1 + 0.3 && 0.2 + 0.4 < z.hi);
    }

    #[test]
    fn mul_mixed_signs() {
        let z = Interval::real(-2.0, 3.0).mul(Interval::real(-1.0, 4.0));
        assert_eq!((z.lo, z.hi), (-8.0, 12.0));
    }

    #[test]
    fn mul_zero_annihilates() {
        let z = Interval::point(0.0).mul(Interval::UNIVERSAL);
        assert_eq!((z.lo, z.hi), (0.0, 0.0));
    }

    #[test]
    fn div_straddling_divisor_is_universal() {
        let z = Interval::point(1.0).div(Interval::real(-1.0, 1.0)).unwrap();
        assert_eq!(z, Interval::UNIVERSAL);
    }

    #[test]
    fn div_zero_endpoint_saturates() {
        let z = Interval::point(1.0).div(Interval::real(0.0, 2.0)).unwrap();
        assert!(z.lo <= 0.5 && z.hi == f64::INFINITY);

        let z = Interval::point(1.0).div(Interval::real(-2.0, 0.0)).unwrap();
        assert!(z.lo == f64::NEG_INFINITY && z.hi >= -0.5);
    }

    #[test]
    fn div_by_zero_interval() {
        assert!(Interval::point(3.0).div(Interval::point(0.0)).is_err());
        let z = Interval::real(-1.0, 1.0)
            .div(Interval::point(0.0))
            .unwrap();
        assert_eq!(z, Interval::UNIVERSAL);
    }

    #[test]
    fn sub_reverses_operand_bounds() {
        let z = Interval::int(4.0, 6.0).sub(Interval::int(1.0, 2.0)).unwrap();
        assert_eq!((z.lo, z.hi), (2.0, 5.0));
        assert_eq!(z.kind, Kind::Int);
    }

    #[test]
    fn undefined_form_fails() {
        let inf = Interval::real(f64::INFINITY, f64::INFINITY);
        let ninf = Interval::real(f64::NEG_INFINITY, f64::NEG_INFINITY);
        assert_eq!(inf.add(ninf), Err(NarrowError::Undefined));
    }

    #[test]
    fn abs_cases() {
        assert_eq!(Interval::real(2.0, 5.0).fabs(), Interval::real(2.0, 5.0));
        let neg = Interval::real(-5.0, -2.0).fabs();
        assert_eq!((neg.lo, neg.hi), (2.0, 5.0));
        let mix = Interval::real(-3.0, 2.0).fabs();
        assert_eq!((mix.lo, mix.hi), (0.0, 3.0));
    }

    #[test]
    fn minmax_endpointwise() {
        let a = Interval::int(1.0, 5.0);
        let b = Interval::int(3.0, 4.0);
        assert_eq!((a.fmin(b).lo, a.fmin(b).hi), (1.0, 4.0));
        assert_eq!((a.fmax(b).lo, a.fmax(b).hi), (3.0, 5.0));
    }
}
