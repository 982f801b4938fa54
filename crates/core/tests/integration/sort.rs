//! Bubble sort run to completion on the pipeline.
//!
//! The canonical whole-machine workload: sort a descending 16-word array in
//! data memory, ending in a terminal spin. Exercises every instruction
//! format, both hazard mechanisms, and store-to-load traffic, then compares
//! final architectural state against the sequential reference model.

use clocksim_core::{Config, Machine};
use pretty_assertions::assert_eq;

use crate::common::{asm, init_tracing, reference};

const WORDS: u32 = 16;

/// In-place bubble sort of `WORDS` words at data address 0, ascending.
///
/// Register use: x5 base, x6 n, x7 i, x8 j, x9 byte address of a[j],
/// x10/x11 the compared pair, x28 n-1, x29 inner limit.
fn sort_program() -> Vec<u32> {
    vec![
        asm::addi(5, 0, 0),              //  0: base = 0
        asm::addi(6, 0, WORDS as i32),   //  4: n = 16
        asm::addi(7, 0, 0),              //  8: i = 0
        asm::addi(28, 6, -1),            // 12: outer: x28 = n - 1
        asm::bge(7, 28, 60),             // 16: if i >= n-1 goto done (76)
        asm::addi(8, 0, 0),              // 20: j = 0
        asm::sub(29, 28, 7),             // 24: limit = n - 1 - i
        asm::bge(8, 29, 40),             // 28: inner: if j >= limit goto 68
        asm::slli(9, 8, 2),              // 32: x9 = j * 4
        asm::add(9, 9, 5),               // 36: x9 += base
        asm::lw(10, 0, 9),               // 40: x10 = a[j]
        asm::lw(11, 4, 9),               // 44: x11 = a[j + 1]
        asm::bge(11, 10, 12),            // 48: if a[j+1] >= a[j] goto 60
        asm::sw(11, 0, 9),               // 52: a[j] = x11
        asm::sw(10, 4, 9),               // 56: a[j + 1] = x10
        asm::addi(8, 8, 1),              // 60: j += 1
        asm::jal(0, -36),                // 64: goto inner (28)
        asm::addi(7, 7, 1),              // 68: i += 1
        asm::jal(0, -60),                // 72: goto outer (12)
        asm::jal(0, 0),                  // 76: done: spin
    ]
}

fn sort_config() -> Config {
    Config {
        dmem_words: 64,
        data_image: (1..=WORDS).rev().collect(),
        ..Config::default()
    }
}

#[test]
fn bubble_sort_matches_the_reference_model() {
    init_tracing();
    let program = sort_program();
    let config = sort_config();

    let mut machine = Machine::assemble(program.clone(), &config).unwrap();
    machine.run(20_000);

    let oracle = reference::run(&program, &config, 10_000);

    let sorted: Vec<u32> = (1..=WORDS).collect();
    assert_eq!(&oracle.dmem[..WORDS as usize], &sorted[..], "oracle must sort");

    let machine_dmem: Vec<u32> = (0..config.dmem_words)
        .map(|i| machine.data_word(i).unwrap())
        .collect();
    assert_eq!(machine_dmem, oracle.dmem);
    assert_eq!(machine.registers(), oracle.regs);
}

#[test]
fn sorted_input_stays_sorted() {
    let program = sort_program();
    let config = Config {
        data_image: (1..=WORDS).collect(),
        ..sort_config()
    };

    let mut machine = Machine::assemble(program.clone(), &config).unwrap();
    machine.run(20_000);

    let oracle = reference::run(&program, &config, 10_000);
    for i in 0..WORDS as usize {
        assert_eq!(machine.data_word(i), Some((i + 1) as u32));
    }
    assert_eq!(machine.registers(), oracle.regs);
}
