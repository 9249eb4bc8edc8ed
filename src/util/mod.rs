//! Filesystem utilities used by the CLI layer.
//!
//! - [`file_status`]: regular-file / directory checks, metadata copy
//! - [`file_list`]: recursive input expansion

pub mod file_status;
pub mod file_list;

pub use file_list::create_file_list;
pub use file_status::{file_mode, is_directory, is_reg_file, set_file_stat};
