use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::{fs, io};

/// Reads a corpus file, keeping at most `max_lines` lines.
///
/// - Splits on `\n` / `\r\n`
/// - Joins the kept lines with `\n`, so every line break of the corpus
///   survives as a line break for the tokenizer
/// - `None` reads the whole file
pub fn read_corpus<P: AsRef<Path>>(filename: P, max_lines: Option<usize>) -> io::Result<String> {
	let reader = BufReader::new(File::open(filename)?);
	let limit = max_lines.unwrap_or(usize::MAX);

	let lines = reader.lines().take(limit).collect::<io::Result<Vec<String>>>()?;
	Ok(lines.join("\n"))
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./corpora/seinfeld.txt"` → `"seinfeld"`
/// - `"seinfeld.txt"` → `"seinfeld"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
