//! Kernel object: dispatch from op to contractor, plus the only mutable
//! state in the crate, the statistics block.

use std::time::Instant;

use itertools::izip;

use super::ops::{Op, Params};
use super::stats::Stats;
use super::{arith, boolean, compare};
use crate::error::NarrowError;
use crate::interval::{Interval, trig};

/// Narrowing kernel. Interval arguments pass by value and results are fresh
/// values, so a failed call leaves the host's domain store untouched and a
/// choice-point search can backtrack freely.
pub struct Kernel {
    stats: Stats,
    real_default: Interval,
    int_default: Interval,
    timed: bool,
}

/// Builder for a kernel with custom default domains.
pub struct KernelBuilder {
    real_default: Interval,
    int_default: Interval,
    timed: bool,
}

impl KernelBuilder {
    pub fn new() -> Self {
        Self {
            real_default: Interval::REAL_DEFAULT,
            int_default: Interval::INT_DEFAULT,
            timed: true,
        }
    }

    /// Set the finite default integer domain handed to new variables.
    pub fn integer_range(mut self, lo: f64, hi: f64) -> Self {
        self.int_default = Interval::int(lo, hi);
        self
    }

    /// Set the finite default real domain handed to new variables.
    pub fn real_range(mut self, lo: f64, hi: f64) -> Self {
        self.real_default = Interval::real(lo, hi);
        self
    }

    /// Enable or disable the user-time counter (enabled by default).
    pub fn time_primitives(mut self, on: bool) -> Self {
        self.timed = on;
        self
    }

    pub fn build(self) -> Kernel {
        Kernel {
            stats: Stats::new(),
            real_default: self.real_default,
            int_default: self.int_default,
            timed: self.timed,
        }
    }
}

impl Default for KernelBuilder {
    fn default() -> Self {
        KernelBuilder::new()
    }
}

impl Kernel {
    pub fn new() -> Kernel {
        KernelBuilder::new().build()
    }

    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    #[inline]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Fresh default domain for a real variable.
    pub fn real_default(&self) -> Interval {
        self.real_default
    }

    /// Fresh default domain for an integer variable.
    pub fn int_default(&self) -> Interval {
        self.int_default
    }

    /// Fresh undetermined boolean domain.
    pub fn bool_default(&self) -> Interval {
        Interval::BOOL_ANY
    }

    /// Narrow one relation. `args` is the op's interval tuple, operands
    /// first and the constrained variable last; on success the same-length
    /// tuple of contracted domains comes back, and any failure means the
    /// relation cannot hold over the supplied domains.
    pub fn eval_node(
        &self,
        op: Op,
        params: Params,
        args: &[Interval],
    ) -> Result<Vec<Interval>, NarrowError> {
        let start = self.timed.then(Instant::now);
        self.stats.record_call(op);

        let result = dispatch(op, &params, args);

        if let Err(err) = &result {
            self.stats.record_fail();
            log::debug!("{} failed: {err}", op.name());
        }
        if let Some(t0) = start {
            self.stats.add_time(t0.elapsed().as_nanos() as u64);
        }

        if let Ok(outs) = &result {
            debug_assert!(
                izip!(outs, args).all(|(out, arg)| out.subset(arg)),
                "{} expanded a domain",
                op.name()
            );
        }

        result
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::new()
    }
}

fn dispatch(op: Op, params: &Params, args: &[Interval]) -> Result<Vec<Interval>, NarrowError> {
    for arg in args {
        arg.validate()?;
    }
    log::trace!("eval {}/{}", op.name(), args.len());

    match (op, args) {
        (Op::Integral, &[x]) => arith::narrow_integral(x).map(|x| vec![x]),

        (Op::Minus, &[x, z]) => arith::narrow_minus(x, z).map(pair),
        (Op::Abs, &[x, z]) => arith::narrow_abs(x, z).map(pair),
        (Op::Exp, &[x, z]) => arith::narrow_exp(x, z).map(pair),
        (Op::Sin, &[x, z]) => trig::sin_refine(x, z).map(pair),
        (Op::Cos, &[x, z]) => trig::cos_refine(x, z).map(pair),
        (Op::Tan, &[x, z]) => trig::tan_refine(x, z).map(pair),
        (Op::Not, &[x, z]) => boolean::narrow_not(x, z).map(pair),

        (Op::Add, &[x, y, z]) => arith::narrow_add(x, y, z).map(triple),
        (Op::Mul, &[x, y, z]) => arith::narrow_mul(x, y, z).map(triple),
        (Op::Min, &[x, y, z]) => arith::narrow_min(x, y, z).map(triple),
        (Op::Max, &[x, y, z]) => arith::narrow_max(x, y, z).map(triple),
        (Op::Pow, &[x, y, z]) => arith::narrow_pow(x, y, z).map(triple),

        (Op::Eq, &[x, y, z]) => compare::narrow_eq(x, y, z, params).map(triple),
        (Op::Ne, &[x, y, z]) => compare::narrow_ne(x, y, z, params).map(triple),
        (Op::Le, &[x, y, z]) => compare::narrow_le(x, y, z).map(triple),
        (Op::Lt, &[x, y, z]) => compare::narrow_lt(x, y, z).map(triple),
        (Op::Sub, &[x, y, z]) => compare::narrow_sub(x, y, z, params).map(triple),

        (Op::And, &[x, y, z]) => boolean::narrow_and(x, y, z).map(triple),
        (Op::Or, &[x, y, z]) => boolean::narrow_or(x, y, z).map(triple),
        (Op::Xor, &[x, y, z]) => boolean::narrow_xor(x, y, z).map(triple),
        (Op::Nand, &[x, y, z]) => boolean::narrow_nand(x, y, z).map(triple),
        (Op::Nor, &[x, y, z]) => boolean::narrow_nor(x, y, z).map(triple),
        (Op::Implies, &[x, y, z]) => boolean::narrow_implies(x, y, z).map(triple),

        _ => Err(NarrowError::Malformed),
    }
}

fn pair((a, b): (Interval, Interval)) -> Vec<Interval> {
    vec![a, b]
}

fn triple((a, b, c): (Interval, Interval, Interval)) -> Vec<Interval> {
    vec![a, b, c]
}
