//! Scoreboard data-hazard tests.

use crate::common::{asm, machine};

#[test]
fn dependent_add_stalls_then_sees_the_retired_value() {
    // x1 = 5; x2 = x1 + x1. The add reads x1 while its write is in flight.
    let mut m = machine(&[asm::addi(1, 0, 5), asm::add(2, 1, 1)]);

    m.run(3);
    assert!(m.reg_locked(1), "x1 is locked while its write is in flight");
    assert!(
        m.decode_execute().is_none(),
        "the dependent add must sit in decode as a bubble"
    );

    m.run(9);
    assert_eq!(m.reg(1), 5);
    assert_eq!(m.reg(2), 10, "the add must read the retired value, never stale zero");
    assert!(!m.reg_locked(1));
    assert!(!m.reg_locked(2));
}

#[test]
fn release_and_relock_in_one_cycle_stays_locked() {
    // Back-to-back writes to x1: the second locks x1 the same cycle the
    // first's retirement releases it, and the reader behind them must keep
    // stalling until the *second* write retires.
    let mut m = machine(&[
        asm::addi(1, 0, 1),
        asm::addi(1, 0, 2),
        asm::add(2, 1, 0),
    ]);

    m.run(20);
    assert_eq!(m.reg(1), 2);
    assert_eq!(m.reg(2), 2, "the reader must see the last write, not the first");
}

#[test]
fn independent_instructions_do_not_stall() {
    let mut m = machine(&[asm::addi(1, 0, 1), asm::addi(2, 0, 2), asm::addi(3, 0, 3)]);

    // Issue proceeds back to back: each cycle from 2 on, a micro-op leaves
    // decode until the program drains.
    m.run(2);
    assert!(m.decode_execute().is_some());
    m.run(1);
    assert!(m.decode_execute().is_some());
    m.run(1);
    assert!(m.decode_execute().is_some());

    m.run(8);
    assert_eq!((m.reg(1), m.reg(2), m.reg(3)), (1, 2, 3));
}

#[test]
fn hazard_stall_loses_no_instructions() {
    // A chain of dependent writes: every instruction stalls on its
    // predecessor, and every one must still retire exactly once.
    let mut m = machine(&[
        asm::addi(1, 0, 1),
        asm::add(2, 1, 1),
        asm::add(3, 2, 2),
        asm::add(4, 3, 3),
    ]);

    m.run(40);
    assert_eq!((m.reg(1), m.reg(2), m.reg(3), m.reg(4)), (1, 2, 4, 8));
}

#[test]
fn writes_to_x0_never_lock() {
    let mut m = machine(&[asm::addi(0, 0, 7), asm::add(1, 0, 0)]);

    m.run(2);
    assert!(!m.reg_locked(0));

    m.run(10);
    assert_eq!(m.reg(0), 0, "x0 is hardwired zero");
    assert_eq!(m.reg(1), 0);
}
