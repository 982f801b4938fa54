//! Loading Intel-HEX images from disk into a running machine.

use std::io::Write as _;

use clocksim_core::common::{LoadError, SimError};
use clocksim_core::sim::load_hex_file;
use clocksim_core::{Config, Machine};

/// addi x1, x0, 5 as an Intel-HEX image.
const ADDI_IMAGE: &str = ":040000009300500019\n:00000001FF\n";

fn write_image(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write image");
    file
}

#[test]
fn hex_image_boots_and_executes() {
    let file = write_image(ADDI_IMAGE);
    let config = Config::default();
    let mut machine = Machine::from_hex_file(file.path(), &config).unwrap();

    machine.run(8);
    assert_eq!(machine.reg(1), 5);
}

#[test]
fn load_hex_file_returns_full_capacity_image() {
    let file = write_image(ADDI_IMAGE);
    let words = load_hex_file(file.path(), 16).unwrap();
    assert_eq!(words.len(), 16);
    assert_eq!(words[0], 0x0050_0093);
    assert!(words[1..].iter().all(|&w| w == 0));
}

#[test]
fn missing_file_is_an_io_error() {
    let config = Config::default();
    let err = Machine::from_hex_file("/nonexistent/boot.hex", &config).unwrap_err();
    assert!(matches!(err, SimError::Load(LoadError::Io { .. })));
}

#[test]
fn malformed_image_reports_its_line() {
    let file = write_image(":040000009300500018\n:00000001FF\n");
    let err = load_hex_file(file.path(), 16).unwrap_err();
    assert!(matches!(err, LoadError::Checksum { line: 1 }));
}
