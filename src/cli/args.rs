//! Command-line argument parsing for `rzlib`.
//!
//! The entry points are [`parse_args`] (reads `std::env::args_os()`) and
//! [`parse_args_from`] (takes an explicit argument list, suitable for
//! unit-testing). Both return a [`ParsedArgs`] value that captures every
//! option and filename discovered during the parse.
//!
//! Option syntax is handled by `clap`; this module turns the raw [`Cli`]
//! into runtime [`Prefs`] and resolves the positional file names.
//!
//! Bad or unrecognised options return an `Err` whose message begins with
//! `"bad usage"`.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::error::ErrorKind as ClapErrorKind;
use clap::{ArgAction, Parser, ValueEnum};

use crate::cli::arg_utils::parse_size;
use crate::cli::op_mode::{init_max_output, init_nb_workers, OpMode};
use crate::io::file_io::{STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::Prefs;
use crate::types::Format;

// ── Raw clap surface ──────────────────────────────────────────────────────────

/// Container format selection for `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Detect from the magic bytes.
    Auto,
    Zlib,
    Gzip,
}

impl FormatArg {
    fn to_format(self) -> Option<Format> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Zlib => Some(Format::Zlib),
            FormatArg::Gzip => Some(Format::Gzip),
        }
    }
}

/// Options as declared to `clap`.
#[derive(Debug, Parser)]
#[command(
    name = "rzlib",
    version,
    about = "Decompress zlib (RFC 1950) and gzip (RFC 1952) files",
    after_help = "With no INPUT, or when INPUT is '-', read standard input.\n\
                  Without OUTPUT the name is derived by stripping .zz, .z, .zlib or .gz."
)]
pub struct Cli {
    /// Decompress (the default; accepted for symmetry with other tools)
    #[arg(short = 'd', long = "decompress")]
    pub decompress: bool,

    /// Test integrity: decode and discard
    #[arg(short = 't', long = "test", conflicts_with = "list")]
    pub test: bool,

    /// List format, sizes and ratio of compressed files
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Write to standard output
    #[arg(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Remove source files after successful decompression
    #[arg(long = "rm", overrides_with = "keep")]
    pub rm: bool,

    /// Keep source files (default)
    #[arg(short = 'k', long = "keep", overrides_with = "rm")]
    pub keep: bool,

    /// Treat every positional argument as an input file
    #[arg(short = 'm', long = "multiple")]
    pub multiple: bool,

    /// Write outputs into DIR, named by stored name or checksum
    #[arg(short = 'D', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Use the gzip stored file name and timestamp
    #[arg(short = 'N', long = "name")]
    pub name: bool,

    /// Container format
    #[arg(long = "format", value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    /// Refuse to produce more than SIZE bytes per file (K, M, G suffixes)
    #[arg(long = "max-output", value_name = "SIZE", value_parser = parse_size)]
    pub max_output: Option<usize>,

    /// Ignore bytes following the compressed stream
    #[arg(long = "allow-trailing")]
    pub allow_trailing: bool,

    /// Number of files decoded in parallel (0 = all cores)
    #[arg(short = 'T', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Recurse into directories (requires the `recursive` feature)
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Increase verbosity
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// INPUT [OUTPUT], or several inputs with -m
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by argument parsing.
#[derive(Debug, Default)]
pub struct ParsedArgs {
    /// Decompression preferences.
    pub prefs: Prefs,
    /// Resolved operation mode.
    pub op_mode: OpMode,
    /// Force output to stdout even if it is a terminal.
    pub force_stdout: bool,
    /// Treat all positional arguments as input files.
    pub multiple_inputs: bool,
    /// Single input filename (non-multiple-input mode).
    pub input_filename: Option<String>,
    /// Single output filename (non-multiple-input mode).
    pub output_filename: Option<String>,
    /// Input filenames collected in multiple-input mode.
    pub in_file_names: Vec<String>,
    /// Traverse directories recursively.
    pub recursive: bool,
    /// Display level requested by `-v` / `-q`, starting from 2.
    pub display_level: u32,
    /// When `true`, `--version` / `--help` was processed; the caller should
    /// exit 0 without performing any I/O operation.
    pub exit_early: bool,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse the process arguments.
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    parse_args_from(std::env::args_os())
}

/// Parse an explicit argument list; the first item is the program name.
pub fn parse_args_from<I, T>(argv: I) -> anyhow::Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli.into_parsed(),
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            e.print().context("cannot print help")?;
            Ok(ParsedArgs {
                exit_early: true,
                ..ParsedArgs::default()
            })
        }
        Err(e) => Err(anyhow!("bad usage: {}", e.render().to_string().trim_end())),
    }
}

fn map_dash(name: String, sentinel: &str) -> String {
    if name == "-" {
        sentinel.to_owned()
    } else {
        name
    }
}

impl Cli {
    /// Validates option combinations and builds the runtime view.
    pub fn into_parsed(self) -> anyhow::Result<ParsedArgs> {
        #[cfg(not(feature = "recursive"))]
        if self.recursive {
            return Err(anyhow!(
                "bad usage: -r: this executable was built without recursive directory support"
            ));
        }
        if self.stdout && self.output_dir.is_some() {
            return Err(anyhow!("bad usage: -c and -D are mutually exclusive"));
        }

        let op_mode = if self.list {
            OpMode::List
        } else if self.test {
            OpMode::Test
        } else {
            OpMode::Decompress
        };

        let mut prefs = Prefs::new();
        prefs.set_overwrite(self.force);
        prefs.set_remove_src_file(self.rm && !self.keep);
        prefs.set_test_mode(op_mode == OpMode::Test);
        prefs.use_stored_name = self.name;
        prefs.format = self.format.to_format();
        prefs.set_max_output(self.max_output.or_else(init_max_output));
        prefs.set_allow_trailing(self.allow_trailing);
        prefs.set_nb_workers(self.threads.unwrap_or_else(init_nb_workers));
        prefs.output_dir = self.output_dir;

        let display_level = (2 + u32::from(self.verbose)).saturating_sub(u32::from(self.quiet));

        // -r implies several inputs, as does --list with more than one name.
        let multiple_inputs = self.multiple
            || self.recursive
            || (op_mode == OpMode::List && self.files.len() > 1);

        let mut parsed = ParsedArgs {
            prefs,
            op_mode,
            force_stdout: self.stdout,
            multiple_inputs,
            recursive: self.recursive,
            display_level,
            ..ParsedArgs::default()
        };

        if multiple_inputs {
            parsed.in_file_names = self
                .files
                .into_iter()
                .map(|f| map_dash(f, STDIN_MARK))
                .collect();
            if self.stdout {
                parsed.output_filename = Some(STDOUT_MARK.to_owned());
            }
            return Ok(parsed);
        }

        let mut files = self.files.into_iter();
        parsed.input_filename = files.next().map(|f| map_dash(f, STDIN_MARK));
        parsed.output_filename = files.next().map(|f| map_dash(f, STDOUT_MARK));
        if let Some(extra) = files.next() {
            return Err(anyhow!(
                "bad usage: unexpected file name {} (use -m for several inputs)",
                extra
            ));
        }
        if self.stdout {
            if parsed.output_filename.is_some() {
                return Err(anyhow!("bad usage: -c conflicts with an output file name"));
            }
            parsed.output_filename = Some(STDOUT_MARK.to_owned());
        }
        Ok(parsed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
