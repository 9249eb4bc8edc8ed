// Integration tests for cli/constants.rs: program identity and display level

use rzlib::cli::constants::{
    display_level, set_display_level, KNOWN_SUFFIXES, PROGRAM_NAME, ENV_MAX_OUTPUT, ENV_NBWORKERS,
};

#[test]
fn program_name_is_binary_name() {
    assert_eq!(PROGRAM_NAME, "rzlib");
}

#[test]
fn env_variables_share_program_prefix() {
    assert!(ENV_MAX_OUTPUT.starts_with("RZLIB_"));
    assert!(ENV_NBWORKERS.starts_with("RZLIB_"));
}

#[test]
fn suffix_table_covers_common_extensions() {
    for ext in [".gz", ".zz", ".z", ".zlib", ".tgz"] {
        assert!(KNOWN_SUFFIXES.iter().any(|(s, _)| *s == ext), "{}", ext);
    }
    let tgz = KNOWN_SUFFIXES.iter().find(|(s, _)| *s == ".tgz").unwrap();
    assert_eq!(tgz.1, ".tar");
}

#[test]
fn display_level_is_settable() {
    let before = display_level();
    set_display_level(4);
    assert_eq!(display_level(), 4);
    set_display_level(before);
}
