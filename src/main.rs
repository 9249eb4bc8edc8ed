//! Binary entry point for the `rzlib` command-line tool.
//!
//! Handles post-parse validation, recursive directory expansion, automatic
//! output filename resolution, and operation dispatch (decompress, test,
//! list).
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. [`run`] resolves file names and dispatches to the I/O layer.
//! 3. `main` maps the outcome to exit status 0 or 1.

use std::io::IsTerminal;

use anyhow::{anyhow, bail};

use rzlib::cli::args::{parse_args, ParsedArgs};
use rzlib::cli::constants::{display_level, set_display_level, welcome_message, PROGRAM_NAME};
use rzlib::cli::op_mode::OpMode;
use rzlib::io::{
    decompress_filename, decompress_multiple_filenames, display_compressed_files_info,
    output_filename_for, NUL_MARK, STDIN_MARK, STDOUT_MARK,
};

/// Execute the operation selected by argument parsing.
fn run(args: ParsedArgs) -> anyhow::Result<()> {
    let ParsedArgs {
        prefs,
        op_mode,
        force_stdout,
        multiple_inputs,
        input_filename,
        mut output_filename,
        mut in_file_names,
        recursive,
        ..
    } = args;

    rzlib::displaylevel!(3, "{}", welcome_message());
    rzlib::displaylevel!(4, "{:?}\n", prefs);

    // ── Recursive directory expansion ─────────────────────────────────────
    #[cfg(feature = "recursive")]
    if recursive {
        use std::path::Path;
        let paths: Vec<&Path> = in_file_names.iter().map(Path::new).collect();
        let list = rzlib::util::create_file_list(&paths, rzlib::io::has_compressed_suffix)
            .map_err(|e| anyhow!("cannot expand directory: {}", e))?;
        for (u, p) in list.iter().enumerate() {
            rzlib::displaylevel!(4, "{} {}\n", u, p.display());
        }
        in_file_names = list
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
    }
    #[cfg(not(feature = "recursive"))]
    let _ = recursive;

    // ── List mode ─────────────────────────────────────────────────────────
    if op_mode == OpMode::List {
        if !multiple_inputs {
            in_file_names.push(input_filename.unwrap_or_else(|| STDIN_MARK.to_owned()));
        }
        let srcs: Vec<&str> = in_file_names.iter().map(String::as_str).collect();
        return display_compressed_files_info(&srcs, &prefs)
            .map_err(|_| anyhow!("some files could not be listed"));
    }

    if op_mode == OpMode::Test {
        output_filename = Some(NUL_MARK.to_owned());
    }

    // ── Multiple inputs ───────────────────────────────────────────────────
    if multiple_inputs {
        if in_file_names.is_empty() {
            bail!("no input files");
        }
        let dst_mark = output_filename.as_deref();
        if dst_mark == Some(STDOUT_MARK) {
            refuse_console_output(force_stdout)?;
        }
        if display_level() == 2 {
            set_display_level(1);
        }
        let srcs: Vec<&str> = in_file_names.iter().map(String::as_str).collect();
        return decompress_multiple_filenames(&srcs, dst_mark, &prefs).map_err(Into::into);
    }

    // ── Single input ──────────────────────────────────────────────────────
    let input_filename = input_filename.unwrap_or_else(|| STDIN_MARK.to_owned());
    if input_filename == STDIN_MARK && std::io::stdin().is_terminal() {
        bail!("refusing to read from a console");
    }

    let output_filename = match output_filename {
        Some(name) => name,
        None if prefs.output_dir.is_some() => NUL_MARK.to_owned(),
        None if input_filename == STDIN_MARK => STDOUT_MARK.to_owned(),
        None => {
            let derived = output_filename_for(&input_filename)
                .ok_or_else(|| anyhow!("{}: cannot determine an output filename", input_filename))?;
            rzlib::displaylevel!(3, "Decoding file {} \n", derived);
            derived
        }
    };

    if output_filename == STDOUT_MARK {
        refuse_console_output(force_stdout)?;
        if display_level() == 2 {
            set_display_level(1);
        }
    }

    decompress_filename(&input_filename, &output_filename, &prefs)?;
    Ok(())
}

fn refuse_console_output(force_stdout: bool) -> anyhow::Result<()> {
    if std::io::stdout().is_terminal() && !force_stdout {
        bail!("refusing to write to console without -c");
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {:#}", PROGRAM_NAME, e);
            std::process::exit(1);
        }
    };

    // --help / --version were printed by the parser.
    if args.exit_early {
        std::process::exit(0);
    }
    set_display_level(args.display_level);

    if let Err(e) = run(args) {
        rzlib::displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, e);
        std::process::exit(1);
    }
}
