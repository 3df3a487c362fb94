use crate::error::NarrowError;

/// Domain flavor of an interval. Arithmetic on two integer-family operands
/// stays integral; any real operand makes the result real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Real,
    Int,
    Bool,
}

impl Kind {
    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, Kind::Int | Kind::Bool)
    }

    /// Result kind of arithmetic combining two operands.
    #[inline]
    pub(crate) fn join(self, other: Kind) -> Kind {
        if self.is_integer() && other.is_integer() {
            Kind::Int
        } else {
            Kind::Real
        }
    }

    /// The stronger of two kinds, used when domains are intersected.
    #[inline]
    pub(crate) fn refine(self, other: Kind) -> Kind {
        match (self, other) {
            (Kind::Bool, _) | (_, Kind::Bool) => Kind::Bool,
            (Kind::Int, _) | (_, Kind::Int) => Kind::Int,
            _ => Kind::Real,
        }
    }
}

/// A closed interval over the extended reals, held as a pair of doubles
/// with the infinities as unbounded sentinels. Always `lo <= hi`; an
/// operation that would empty the interval fails instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
    pub kind: Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignClass {
    Pos = 1,
    Neg = -1,
    Mix = 0,
}

/// Sign classification of an interval. Nonstrict boundaries count a zero
/// endpoint with the signed side; `strict` demands the whole interval stay
/// clear of zero.
pub fn classify(iv: &Interval, strict: bool) -> SignClass {
    if strict {
        if iv.lo > 0.0 {
            SignClass::Pos
        } else if iv.hi < 0.0 {
            SignClass::Neg
        } else {
            SignClass::Mix
        }
    } else if iv.lo >= 0.0 {
        SignClass::Pos
    } else if iv.hi <= 0.0 {
        SignClass::Neg
    } else {
        SignClass::Mix
    }
}

impl Interval {
    /// Top of the interval lattice.
    pub const UNIVERSAL: Interval = Interval {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
        kind: Kind::Real,
    };

    /// Finite default real domain.
    pub const REAL_DEFAULT: Interval = Interval {
        lo: -f64::MAX,
        hi: f64::MAX,
        kind: Kind::Real,
    };

    /// Finite default integer domain: the contiguous exactly-representable
    /// integer range of the double carrier.
    pub const INT_DEFAULT: Interval = Interval {
        lo: -crate::round::INT_BOUND,
        hi: crate::round::INT_BOUND,
        kind: Kind::Int,
    };

    pub const BOOL_ANY: Interval = Interval {
        lo: 0.0,
        hi: 1.0,
        kind: Kind::Bool,
    };

    pub const TRUE: Interval = Interval {
        lo: 1.0,
        hi: 1.0,
        kind: Kind::Bool,
    };

    pub const FALSE: Interval = Interval {
        lo: 0.0,
        hi: 0.0,
        kind: Kind::Bool,
    };

    pub const fn real(lo: f64, hi: f64) -> Interval {
        Interval {
            lo,
            hi,
            kind: Kind::Real,
        }
    }

    pub const fn int(lo: f64, hi: f64) -> Interval {
        Interval {
            lo,
            hi,
            kind: Kind::Int,
        }
    }

    pub const fn point(v: f64) -> Interval {
        Interval {
            lo: v,
            hi: v,
            kind: Kind::Real,
        }
    }

    /// Validate a host-supplied interval.
    pub fn validate(&self) -> Result<(), NarrowError> {
        if self.lo.is_nan() || self.hi.is_nan() || self.lo > self.hi {
            return Err(NarrowError::Malformed);
        }
        if self.kind == Kind::Bool && (self.lo < 0.0 || self.hi > 1.0) {
            return Err(NarrowError::Malformed);
        }
        if self.kind.is_integer()
            && ((self.lo.is_finite() && self.lo.fract() != 0.0)
                || (self.hi.is_finite() && self.hi.fract() != 0.0))
        {
            return Err(NarrowError::Malformed);
        }
        Ok(())
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }

    #[inline]
    pub fn is_disjoint(&self, other: &Interval) -> bool {
        self.hi < other.lo || other.hi < self.lo
    }

    #[inline]
    pub fn subset(&self, other: &Interval) -> bool {
        other.lo <= self.lo && self.hi <= other.hi
    }

    /// Intersection; the sole producer of the failure that drives the
    /// host's backtracking.
    pub fn intersect(self, other: Interval) -> Result<Interval, NarrowError> {
        let kind = self.kind.refine(other.kind);
        let mut lo = self.lo.max(other.lo);
        let mut hi = self.hi.min(other.hi);
        if kind.is_integer() {
            lo = lo.ceil();
            hi = hi.floor();
        }
        if lo > hi {
            return Err(NarrowError::Empty);
        }
        Ok(Interval { lo, hi, kind })
    }

    /// Interval hull (the union's enclosure).
    pub fn hull(self, other: Interval) -> Interval {
        Interval {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
            kind: self.kind.refine(other.kind),
        }
    }

    /// Inward rounding to integer bounds; fails when no integer is left.
    pub fn integer(self) -> Result<Interval, NarrowError> {
        let lo = self.lo.ceil();
        let hi = self.hi.floor();
        if lo > hi {
            return Err(NarrowError::Empty);
        }
        let kind = if self.kind == Kind::Bool {
            Kind::Bool
        } else {
            Kind::Int
        };
        Ok(Interval { lo, hi, kind })
    }

    /// `Some(b)` when the interval is the settled boolean point `b`.
    pub fn known_bool(&self) -> Option<bool> {
        if self.lo == 0.0 && self.hi == 0.0 {
            Some(false)
        } else if self.lo == 1.0 && self.hi == 1.0 {
            Some(true)
        } else {
            None
        }
    }

    /// Whether a boolean value is still admitted by this domain.
    #[inline]
    pub(crate) fn admits(&self, b: bool) -> bool {
        self.contains(if b { 1.0 } else { 0.0 })
    }

    /// Half-line `[lo, +∞]`.
    pub(crate) fn above(lo: f64) -> Interval {
        Interval::real(lo, f64::INFINITY)
    }

    /// Half-line `[−∞, hi]`.
    pub(crate) fn below(hi: f64) -> Interval {
        Interval::real(f64::NEG_INFINITY, hi)
    }

    pub(crate) fn with_kind(mut self, kind: Kind) -> Interval {
        self.kind = kind;
        self
    }
}
