//! File information display for the `--list` flag.
//!
//! Each file is decoded in full (the uncompressed size of a zlib stream is
//! only known after decoding, and decoding also validates the checksums),
//! then summarised in one table row. At verbosity 3+ the gzip header fields
//! are printed below the row.
//!
//! Entry point: [`display_compressed_files_info`].

use std::io;

use crate::cli::arg_utils::last_name_from_path;
use crate::cli::constants::display_level;
use crate::format::{decompress_as, decompress_auto};
use crate::gzip::header::GzHeader;
use crate::io::file_io::read_src_file;
use crate::io::prefs::Prefs;
use crate::types::Format;

/// Summary of one compressed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedFileInfo {
    pub file_name: String,
    pub format: Format,
    pub compressed_size: u64,
    pub decompressed_size: u64,
    /// Trailer checksum (Adler-32 or CRC-32).
    pub checksum: u32,
    pub header: Option<GzHeader>,
}

impl CompressedFileInfo {
    /// Compressed size as a percentage of the decompressed size.
    pub fn ratio(&self) -> Option<f64> {
        (self.decompressed_size != 0)
            .then(|| self.compressed_size as f64 / self.decompressed_size as f64 * 100.0)
    }
}

/// Decodes `path` and collects its summary.
pub fn get_compressed_file_info(path: &str, prefs: &Prefs) -> io::Result<CompressedFileInfo> {
    let data = read_src_file(path)?;
    let result = match prefs.format {
        Some(format) => decompress_as(format, &data, &prefs.options),
        None => decompress_auto(&data, &prefs.options),
    };
    let decoded = result.map_err(|e| {
        let msg = format!("{}: {}", path, e);
        io::Error::new(io::Error::from(e).kind(), msg)
    })?;
    Ok(CompressedFileInfo {
        file_name: last_name_from_path(path).to_owned(),
        format: decoded.format,
        compressed_size: data.len() as u64,
        decompressed_size: decoded.len() as u64,
        checksum: decoded.checksum,
        header: decoded.header,
    })
}

/// Formats a byte count with a binary unit suffix.
pub(crate) fn to_human(mut size: f64) -> String {
    const UNITS: &[&str] = &["", "K", "M", "G", "T", "P", "E"];
    let mut i = 0usize;
    while size >= 1024.0 && i + 1 < UNITS.len() {
        size /= 1024.0;
        i += 1;
    }
    format!("{:.2}{}", size, UNITS[i])
}

/// Name of a gzip OS byte (RFC 1952 §2.3.1).
fn os_name(os: u8) -> &'static str {
    match os {
        0 => "FAT",
        1 => "Amiga",
        2 => "VMS",
        3 => "Unix",
        4 => "VM/CMS",
        5 => "Atari TOS",
        6 => "HPFS",
        7 => "Macintosh",
        8 => "Z-System",
        9 => "CP/M",
        10 => "TOPS-20",
        11 => "NTFS",
        12 => "QDOS",
        13 => "Acorn RISCOS",
        _ => "unknown",
    }
}

fn print_header_details(info: &CompressedFileInfo) {
    println!("    {:<12} {:08x}", "checksum", info.checksum);
    let Some(h) = &info.header else {
        return;
    };
    println!("    {:<12} {}", "os", os_name(h.os));
    println!("    {:<12} {}", "mtime", h.mtime);
    if let Some(name) = &h.file_name {
        println!("    {:<12} {}", "stored name", name);
    }
    if let Some(comment) = &h.comment {
        println!("    {:<12} {}", "comment", comment);
    }
    if let Some(extra) = &h.extra {
        println!("    {:<12} {} bytes", "extra field", extra.len());
    }
    if h.is_text() {
        println!("    {:<12} yes", "text");
    }
}

/// Prints a compressed-file summary table for the `--list` flag.
///
/// Every file is attempted; returns the first error after the table is
/// complete, or `Ok(())` if all files were recognised.
pub fn display_compressed_files_info(paths: &[&str], prefs: &Prefs) -> io::Result<()> {
    println!(
        "{:>6} {:>11} {:>13} {:>8}   {}",
        "Format", "Compressed", "Uncompressed", "Ratio", "Filename"
    );

    let mut first_err: Option<io::Error> = None;
    for &path in paths {
        let info = match get_compressed_file_info(path, prefs) {
            Ok(info) => info,
            Err(e) => {
                crate::displaylevel!(1, "rzlib: {}\n", e);
                first_err.get_or_insert(e);
                continue;
            }
        };

        print!(
            "{:>6} {:>11} {:>13} ",
            info.format.name(),
            to_human(info.compressed_size as f64),
            to_human(info.decompressed_size as f64),
        );
        match info.ratio() {
            Some(ratio) => println!("{:>7.2}%   {}", ratio, info.file_name),
            None => println!("{:>8}   {}", "-", info.file_name),
        }
        if display_level() >= 3 {
            print_header_details(&info);
        }
    }

    first_err.map_or(Ok(()), Err)
}
