//! Control-flow tests: branch resolution and wrong-path containment.

use rstest::rstest;

use crate::common::{asm, machine};

/// Program layout for the conditional cases:
///   0: x1 = 10
///   4: branch over the next instruction when taken
///   8: x3 = 99   (skipped when the branch is taken)
///  12: x4 = 42
fn branch_program(branch: u32) -> Vec<u32> {
    vec![
        asm::addi(1, 0, 10),
        branch,
        asm::addi(3, 0, 99),
        asm::addi(4, 0, 42),
    ]
}

#[rstest]
#[case::taken_beq(asm::beq(1, 1, 8), 0)]
#[case::not_taken_bne(asm::bne(1, 1, 8), 99)]
#[case::taken_bge(asm::bge(1, 0, 8), 0)]
#[case::not_taken_bltu(asm::bltu(1, 0, 8), 99)]
fn conditional_branch_controls_the_next_instruction(#[case] branch: u32, #[case] x3: u32) {
    let mut m = machine(&branch_program(branch));
    m.run(30);

    assert_eq!(m.reg(1), 10);
    assert_eq!(m.reg(3), x3);
    assert_eq!(m.reg(4), 42, "the join point must always execute");
}

#[test]
fn wrong_path_word_never_issues() {
    // The instruction at 8 sits in the branch shadow of a taken branch; it
    // may be fetched, but a micro-op for it must never leave decode.
    let mut m = machine(&branch_program(asm::beq(1, 1, 8)));

    for _ in 0..30 {
        m.step();
        if let Some(op) = m.decode_execute() {
            assert_ne!(op.pc, 8, "wrong-path instruction issued");
        }
    }
    assert_eq!(m.reg(3), 0);
}

#[test]
fn jal_links_and_redirects() {
    //  0: jal x1, +8   → x1 = 4, continue at 8
    //  4: x3 = 99      (skipped)
    //  8: x4 = 42
    let mut m = machine(&[asm::jal(1, 8), asm::addi(3, 0, 99), asm::addi(4, 0, 42)]);
    m.run(20);

    assert_eq!(m.reg(1), 4, "link register holds the return address");
    assert_eq!(m.reg(3), 0);
    assert_eq!(m.reg(4), 42);
}

#[test]
fn jalr_jumps_through_a_register() {
    //  0: x1 = 16
    //  4: jalr x2, x1, 0 → x2 = 8, continue at 16
    //  8: x3 = 99        (skipped)
    // 12: nop
    // 16: x4 = 42
    let mut m = machine(&[
        asm::addi(1, 0, 16),
        asm::jalr(2, 1, 0),
        asm::addi(3, 0, 99),
        asm::nop(),
        asm::addi(4, 0, 42),
    ]);
    m.run(30);

    assert_eq!(m.reg(2), 8);
    assert_eq!(m.reg(3), 0);
    assert_eq!(m.reg(4), 42);
}

#[test]
fn backward_branch_forms_a_loop() {
    //  0: x1 = 0
    //  4: x1 = x1 + 1
    //  8: x2 = 4
    // 12: bne x1, x2, -8   → back to 4 until x1 == 4
    // 16: x3 = 7
    let mut m = machine(&[
        asm::addi(1, 0, 0),
        asm::addi(1, 1, 1),
        asm::addi(2, 0, 4),
        asm::bne(1, 2, -8),
        asm::addi(3, 0, 7),
    ]);
    m.run(200);

    assert_eq!(m.reg(1), 4);
    assert_eq!(m.reg(3), 7, "the loop must eventually fall through");
}

#[test]
fn not_taken_branch_resumes_the_fall_through_path() {
    // The stall-on-branch policy costs one bubble even when not taken; the
    // fall-through instruction must still issue exactly once afterwards.
    let mut m = machine(&branch_program(asm::bne(1, 1, 8)));

    let mut issues_of_8 = 0;
    for _ in 0..30 {
        m.step();
        if m.decode_execute().is_some_and(|op| op.pc == 8) {
            issues_of_8 += 1;
        }
    }
    assert_eq!(issues_of_8, 1);
    assert_eq!(m.reg(3), 99);
}
