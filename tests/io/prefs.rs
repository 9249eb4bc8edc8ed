// Integration tests for src/io/prefs.rs: CLI decompression preferences

use rzlib::config::NB_WORKERS_MAX;
use rzlib::io::prefs::{default_nb_workers, Prefs};
use rzlib::Options;

#[test]
fn default_prefs_never_overwrite_or_remove() {
    let prefs = Prefs::new();
    assert!(!prefs.overwrite);
    assert!(!prefs.remove_src_file);
    assert!(!prefs.use_stored_name);
    assert!(prefs.output_dir.is_none());
    assert_eq!(prefs.options, Options::default());
}

#[test]
fn setters_return_stored_value() {
    let mut prefs = Prefs::new();
    assert!(prefs.set_overwrite(true));
    assert!(prefs.set_test_mode(true));
    assert!(prefs.set_remove_src_file(true));
    assert_eq!(prefs.set_max_output(Some(42)), Some(42));
    assert!(prefs.set_allow_trailing(true));
    assert_eq!(prefs.set_nb_workers(1_000_000), NB_WORKERS_MAX);
}

#[test]
fn zero_workers_means_auto() {
    let mut prefs = Prefs::new();
    assert_eq!(prefs.set_nb_workers(0), default_nb_workers().min(NB_WORKERS_MAX));
}
