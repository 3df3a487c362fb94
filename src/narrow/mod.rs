//! Narrowing primitives: one contractor per relation

pub mod kernel;
pub mod ops;
pub mod stats;

pub(crate) mod arith;
pub(crate) mod boolean;
pub(crate) mod compare;

pub use kernel::{Kernel, KernelBuilder};
pub use ops::{Op, Params};
pub use stats::{Stats, StatsSnapshot};
