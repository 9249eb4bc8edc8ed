//! Operation mode selection and startup defaults for the CLI.
//!
//! This module provides:
//! - [`OpMode`]: what the CLI should do with its inputs.
//! - [`init_nb_workers`] / [`init_max_output`]: per-process defaults read
//!   from `RZLIB_NBWORKERS` / `RZLIB_MAX_OUTPUT`.

use crate::cli::arg_utils::{parse_size, read_u64_from_str};
use crate::cli::constants::{display_level, ENV_MAX_OUTPUT, ENV_NBWORKERS};
use crate::config::NB_WORKERS_DEFAULT;

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpMode {
    /// Decode and write the output.
    #[default]
    Decompress,
    /// Decode and discard, verifying integrity only.
    Test,
    /// Print container metadata.
    List,
}

/// Read the number of worker threads from `RZLIB_NBWORKERS`.
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`]: `None` simulates the variable being unset.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        if let Some((val, "")) = read_u64_from_str(env) {
            return val as usize;
        }
        if display_level() >= 2 {
            eprintln!(
                "Ignore environment variable setting {}={}: not a valid unsigned value ",
                ENV_NBWORKERS, env
            );
        }
    }
    NB_WORKERS_DEFAULT
}

/// Read the default output limit from `RZLIB_MAX_OUTPUT`.
pub fn init_max_output() -> Option<usize> {
    init_max_output_from(std::env::var(ENV_MAX_OUTPUT).ok().as_deref())
}

/// Testable core of [`init_max_output`]. Returns `None` (no limit) when the
/// variable is unset or invalid.
pub fn init_max_output_from(env_val: Option<&str>) -> Option<usize> {
    let env = env_val?;
    match parse_size(env) {
        Ok(limit) => Some(limit),
        Err(e) => {
            if display_level() >= 2 {
                eprintln!("Ignore environment variable setting {}: {}", ENV_MAX_OUTPUT, e);
            }
            None
        }
    }
}
