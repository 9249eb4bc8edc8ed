//! Command-line interface for the `rzlib` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, size multipliers, known suffixes and the shared `DISPLAY_LEVEL` atomic. |
//! | [`arg_utils`] | Size parsing (`64K`, `2G`) and path basename helpers. |
//! | [`op_mode`]   | `OpMode` and environment-based defaults (`RZLIB_NBWORKERS`, `RZLIB_MAX_OUTPUT`). |
//! | [`args`]      | `clap` definition and `ParsedArgs`, the resolved runtime options. |
//!
//! Typical call sequence: `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod arg_utils;
pub mod op_mode;
pub mod args;
