//! End-to-end narrowing through the kernel dispatch surface.
//!
//! Tuples follow the kernel convention: operands first, constrained
//! variable last.

use rein::{Interval, Kernel, NarrowError, Op, Params};

fn kernel() -> Kernel {
    Kernel::new()
}

#[test]
fn add_computes_sum_interval() {
    let k = kernel();
    let out = k
        .eval_node(
            Op::Add,
            Params::NONE,
            &[
                Interval::real(2.0, 3.0),
                Interval::real(-1.0, 4.0),
                Interval::UNIVERSAL,
            ],
        )
        .unwrap();
    assert_eq!((out[2].lo, out[2].hi), (1.0, 7.0));
}

#[test]
fn mul_computes_product_interval() {
    let k = kernel();
    let out = k
        .eval_node(
            Op::Mul,
            Params::NONE,
            &[
                Interval::real(-2.0, 3.0),
                Interval::real(-1.0, 4.0),
                Interval::UNIVERSAL,
            ],
        )
        .unwrap();
    assert_eq!((out[2].lo, out[2].hi), (-8.0, 12.0));
}

#[test]
fn division_by_straddling_interval_is_universal() {
    // x · y = z with x straddling zero leaves y's quotient universal.
    let z = Interval::point(1.0)
        .div(Interval::real(-1.0, 1.0))
        .unwrap();
    assert_eq!(z, Interval::UNIVERSAL);
}

#[test]
fn pow_even_negative_base() {
    let k = kernel();
    let out = k
        .eval_node(
            Op::Pow,
            Params::NONE,
            &[
                Interval::int(-3.0, -1.0),
                Interval::int(2.0, 2.0),
                Interval::UNIVERSAL,
            ],
        )
        .unwrap();
    assert_eq!((out[2].lo, out[2].hi), (1.0, 9.0));
}

#[test]
fn pow_backward_root_follows_sign() {
    let k = kernel();
    let out = k
        .eval_node(
            Op::Pow,
            Params::NONE,
            &[
                Interval::int(-5.0, 0.0),
                Interval::int(2.0, 2.0),
                Interval::int(1.0, 4.0),
            ],
        )
        .unwrap();
    assert_eq!((out[0].lo, out[0].hi), (-2.0, 0.0));
}

#[test]
fn sin_on_half_period() {
    let k = kernel();
    let pi = std::f64::consts::PI;
    let out = k
        .eval_node(
            Op::Sin,
            Params::NONE,
            &[Interval::real(0.0, pi), Interval::UNIVERSAL],
        )
        .unwrap();
    let z = out[1];
    assert!(z.lo <= 0.0 && z.lo > -1e-9);
    assert!((z.hi - 1.0).abs() < 1e-9);
}

#[test]
fn sin_on_wide_input_narrows_result_only() {
    let k = kernel();
    let x = Interval::real(0.0, 3.0 * std::f64::consts::PI);
    let out = k
        .eval_node(Op::Sin, Params::NONE, &[x, Interval::UNIVERSAL])
        .unwrap();
    assert_eq!(out[0], x);
    assert_eq!((out[1].lo, out[1].hi), (-1.0, 1.0));
}

#[test]
fn le_true_and_false_branches() {
    let k = kernel();
    let x = Interval::int(0.0, 10.0);
    let y = Interval::int(5.0, 5.0);

    let out = k
        .eval_node(Op::Le, Params::NONE, &[x, y, Interval::TRUE])
        .unwrap();
    assert_eq!((out[0].lo, out[0].hi), (0.0, 5.0));
    assert_eq!((out[1].lo, out[1].hi), (5.0, 5.0));

    let out = k
        .eval_node(Op::Le, Params::NONE, &[x, y, Interval::FALSE])
        .unwrap();
    assert_eq!((out[0].lo, out[0].hi), (6.0, 10.0));
    assert_eq!((out[1].lo, out[1].hi), (5.0, 5.0));
}

#[test]
fn and_propagates_partial_information() {
    let k = kernel();
    let out = k
        .eval_node(
            Op::And,
            Params::NONE,
            &[Interval::BOOL_ANY, Interval::TRUE, Interval::BOOL_ANY],
        )
        .unwrap();
    assert_eq!(out[0].known_bool(), None);
    assert_eq!(out[1].known_bool(), Some(true));
    assert_eq!(out[2].known_bool(), None);

    let out = k
        .eval_node(
            Op::And,
            Params::NONE,
            &[Interval::BOOL_ANY, Interval::BOOL_ANY, Interval::TRUE],
        )
        .unwrap();
    assert_eq!(out[0].known_bool(), Some(true));
    assert_eq!(out[1].known_bool(), Some(true));
    assert_eq!(out[2].known_bool(), Some(true));
}

#[test]
fn every_op_dispatches() {
    let k = kernel();
    for &op in Op::ALL {
        let args: Vec<Interval> = match op.arity() {
            1 => vec![Interval::real(0.5, 7.5)],
            2 => vec![Interval::BOOL_ANY, Interval::BOOL_ANY],
            _ => vec![Interval::BOOL_ANY, Interval::BOOL_ANY, Interval::BOOL_ANY],
        };
        let out = k.eval_node(op, Params::NONE, &args).unwrap();
        assert_eq!(out.len(), op.arity(), "{}", op.name());
    }
}

#[test]
fn malformed_input_is_a_failure() {
    let k = kernel();
    let bad = Interval::real(2.0, 1.0);
    let r = k.eval_node(Op::Minus, Params::NONE, &[bad, Interval::UNIVERSAL]);
    assert_eq!(r, Err(NarrowError::Malformed));

    let r = k.eval_node(Op::Add, Params::NONE, &[Interval::UNIVERSAL]);
    assert_eq!(r, Err(NarrowError::Malformed));
}

#[test]
fn failure_reports_and_counts() {
    let k = kernel();
    let r = k.eval_node(
        Op::Eq,
        Params::NONE,
        &[
            Interval::int(0.0, 2.0),
            Interval::int(5.0, 9.0),
            Interval::TRUE,
        ],
    );
    assert_eq!(r, Err(NarrowError::Empty));

    let snap = k.stats().snapshot();
    assert_eq!(snap.primitive_calls, 1);
    assert_eq!(snap.primitive_fails, 1);
}

#[test]
fn stats_track_calls_and_reset() {
    let k = kernel();
    let args = [
        Interval::real(1.0, 2.0),
        Interval::real(3.0, 4.0),
        Interval::UNIVERSAL,
    ];
    for _ in 0..5 {
        k.eval_node(Op::Add, Params::NONE, &args).unwrap();
    }
    k.eval_node(
        Op::Minus,
        Params::NONE,
        &[Interval::real(0.0, 1.0), Interval::UNIVERSAL],
    )
    .unwrap();

    let snap = k.stats().snapshot();
    assert_eq!(snap.primitive_calls, 6);
    assert_eq!(snap.primitive_fails, 0);
    assert_eq!(k.stats().calls_for(Op::Add), 5);
    assert_eq!(k.stats().calls_for(Op::Minus), 1);

    k.stats().reset();
    assert_eq!(k.stats().snapshot().primitive_calls, 0);
    assert_eq!(k.stats().calls_for(Op::Add), 0);
}

#[test]
fn persistent_flag_tightens_disequality() {
    let k = kernel();
    let args = [
        Interval::int(3.0, 10.0),
        Interval::int(3.0, 3.0),
        Interval::TRUE,
    ];

    let out = k.eval_node(Op::Ne, Params::NONE, &args).unwrap();
    assert_eq!((out[0].lo, out[0].hi), (3.0, 10.0));

    let out = k.eval_node(Op::Ne, Params::PERSISTENT, &args).unwrap();
    assert_eq!((out[0].lo, out[0].hi), (4.0, 10.0));
}

#[test]
fn builder_configures_default_domains() {
    let k = Kernel::builder()
        .integer_range(-1000.0, 1000.0)
        .real_range(-1e6, 1e6)
        .time_primitives(false)
        .build();
    assert_eq!((k.int_default().lo, k.int_default().hi), (-1000.0, 1000.0));
    assert_eq!((k.real_default().lo, k.real_default().hi), (-1e6, 1e6));
    assert_eq!(k.bool_default(), Interval::BOOL_ANY);

    k.eval_node(
        Op::Minus,
        Params::NONE,
        &[Interval::real(0.0, 1.0), Interval::UNIVERSAL],
    )
    .unwrap();
    // Timing disabled: calls still count, time does not.
    let snap = k.stats().snapshot();
    assert_eq!(snap.primitive_calls, 1);
    assert_eq!(snap.user_time.as_nanos(), 0);
}

#[test]
fn integral_narrows_real_domain() {
    let k = kernel();
    let out = k
        .eval_node(Op::Integral, Params::NONE, &[Interval::real(0.3, 4.7)])
        .unwrap();
    assert_eq!((out[0].lo, out[0].hi), (1.0, 4.0));
    assert!(out[0].kind.is_integer());
}

#[test]
fn solutions_survive_narrowing() {
    // 2 + 3 = 5 as singleton domains passes through add untouched.
    let k = kernel();
    let out = k
        .eval_node(
            Op::Add,
            Params::NONE,
            &[
                Interval::real(2.0, 2.0),
                Interval::real(3.0, 3.0),
                Interval::real(5.0, 5.0),
            ],
        )
        .unwrap();
    assert_eq!((out[0].lo, out[0].hi), (2.0, 2.0));
    assert_eq!((out[1].lo, out[1].hi), (3.0, 3.0));
    assert_eq!((out[2].lo, out[2].hi), (5.0, 5.0));
}
