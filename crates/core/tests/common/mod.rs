//! Shared helpers for the test suite.


use clocksim_core::{Config, Machine};

/// Installs a fmt tracing subscriber honoring `RUST_LOG`, once.
///
/// Call at the top of a test to see stage-level trace output when running
/// with `RUST_LOG=trace`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Assembles a machine around `program` with the default configuration.
pub fn machine(program: &[u32]) -> Machine {
    Machine::assemble(program.to_vec(), &Config::default())
        .expect("default-config machine must assemble")
}
