// prefs.rs: file-level decompression preferences for the CLI.
//
// The library's `Options` carries the decoder knobs; `Prefs` wraps it with
// everything that only matters when sources and destinations are files.

use std::path::PathBuf;

use crate::config::NB_WORKERS_MAX;
use crate::types::{Format, Options};

/// Returns the worker count used for `-T0`.
///
/// Uses the physical core count and keeps a few cores spare on large hosts.
pub fn default_nb_workers() -> usize {
    let nb_cores = num_cpus::get_physical();
    let spared = 1 + (nb_cores >> 3);
    if nb_cores <= spared {
        1
    } else {
        nb_cores - spared
    }
}

/// Runtime preferences for file decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefs {
    /// Replace existing destination files. Default: false.
    pub overwrite: bool,
    /// Decode without writing any output. Default: false.
    pub test_mode: bool,
    /// Remove source file after successful decompression. Default: false.
    pub remove_src_file: bool,
    /// Name (and date) the output after the gzip stored name. Default: false.
    pub use_stored_name: bool,
    /// Forced container format; `None` detects it from the magic bytes.
    pub format: Option<Format>,
    /// Decoder options handed to the library.
    pub options: Options,
    /// Write outputs into this directory using library naming.
    pub output_dir: Option<PathBuf>,
    /// Number of files decoded concurrently in multi-file mode. Default: 1.
    pub nb_workers: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: false,
            test_mode: false,
            remove_src_file: false,
            use_stored_name: false,
            format: None,
            options: Options::default(),
            output_dir: None,
            nb_workers: crate::config::NB_WORKERS_DEFAULT,
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads; `0` selects [`default_nb_workers`].
    /// The value is clamped to `[1, NB_WORKERS_MAX]`; returns the value stored.
    pub fn set_nb_workers(&mut self, nb_workers: usize) -> usize {
        let requested = if nb_workers == 0 { default_nb_workers() } else { nb_workers };
        if requested > NB_WORKERS_MAX {
            crate::displaylevel!(
                3,
                "Requested {} threads too large => automatically reduced to {} \n",
                requested,
                NB_WORKERS_MAX
            );
        }
        self.nb_workers = requested.clamp(1, NB_WORKERS_MAX);
        self.nb_workers
    }

    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        yes
    }

    pub fn set_remove_src_file(&mut self, yes: bool) -> bool {
        self.remove_src_file = yes;
        yes
    }

    pub fn set_max_output(&mut self, limit: Option<usize>) -> Option<usize> {
        self.options.max_output = limit;
        limit
    }

    pub fn set_allow_trailing(&mut self, yes: bool) -> bool {
        self.options.allow_trailing_data = yes;
        yes
    }
}
