// Integration tests for cli/op_mode.rs: mode enum and environment defaults
//
// The `_from` variants take the variable's value directly so the tests never
// touch the real process environment.

use rzlib::cli::op_mode::{init_max_output_from, init_nb_workers_from, OpMode};
use rzlib::config::NB_WORKERS_DEFAULT;

#[test]
fn default_mode_is_decompress() {
    assert_eq!(OpMode::default(), OpMode::Decompress);
    assert_ne!(OpMode::Test, OpMode::List);
}

#[test]
fn nb_workers_from_env() {
    assert_eq!(init_nb_workers_from(None), NB_WORKERS_DEFAULT);
    assert_eq!(init_nb_workers_from(Some("8")), 8);
    assert_eq!(init_nb_workers_from(Some("2K")), 2048);
    assert_eq!(init_nb_workers_from(Some("-1")), NB_WORKERS_DEFAULT);
    assert_eq!(init_nb_workers_from(Some("")), NB_WORKERS_DEFAULT);
}

#[test]
fn max_output_from_env() {
    assert_eq!(init_max_output_from(None), None);
    assert_eq!(init_max_output_from(Some("1024")), Some(1024));
    assert_eq!(init_max_output_from(Some("1K")), Some(1024));
    assert_eq!(init_max_output_from(Some("1K?")), None);
}
