//! Capture file discovery and interactive selection.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// File name suffixes recognised as captures.
const CAPTURE_SUFFIXES: &[&str] = &[".pcap", ".pcapng", ".pcap.gz", ".pcapng.gz"];

/// Whether a file name looks like a capture.
pub fn is_capture_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_lowercase())
        .is_some_and(|name| CAPTURE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}

/// List the capture files directly inside `dir`, sorted by path.
pub fn find_capture_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_capture_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Pick one of `files`.
///
/// With no files returns `None`; with one, returns it without prompting.
/// Otherwise prints a numbered list to `output` and reads a 1-based choice
/// from `input`, asking again until the answer is valid. End of input is an
/// `UnexpectedEof` error.
pub fn select_capture_file<'a, R: BufRead, W: Write>(
    files: &'a [PathBuf],
    mut input: R,
    mut output: W,
) -> io::Result<Option<&'a Path>> {
    match files {
        [] => return Ok(None),
        [only] => return Ok(Some(only.as_path())),
        _ => {}
    }

    writeln!(output, "Capture files:")?;
    for (i, file) in files.iter().enumerate() {
        match file.file_name() {
            Some(name) => writeln!(output, "  {}. {}", i + 1, name.to_string_lossy())?,
            None => writeln!(output, "  {}. {}", i + 1, file.display())?,
        }
    }

    let mut line = String::new();
    loop {
        write!(output, "Select a file [1-{}]: ", files.len())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no capture file selected",
            ));
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => return Ok(Some(files[n - 1].as_path())),
            Ok(_) => writeln!(output, "Please enter a number between 1 and {}.", files.len())?,
            Err(_) => writeln!(output, "Please enter a number.")?,
        }
    }
}
