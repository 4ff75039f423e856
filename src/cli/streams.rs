use lz78::{Direction, Lz78Config};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Where a command writes its result.
#[derive(Debug, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Picks the destination from `-o`, the input path and the configured
    /// extensions. Refuses to overwrite the input.
    pub fn resolve(
        explicit: Option<&Path>,
        input: Option<&Path>,
        config: &Lz78Config,
        direction: Direction,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let output = match (explicit, input) {
            (Some(path), _) if path == Path::new("-") => Output::Stdout,
            (Some(path), _) => Output::File(path.to_path_buf()),
            (None, Some(input)) => Output::File(config.default_output_path(input, direction)),
            (None, None) => Output::Stdout,
        };

        if let (Output::File(path), Some(input)) = (&output, input) {
            if same_file(path, input) {
                return Err(format!(
                    "Output '{}' would overwrite the input. Use -o to choose another path.",
                    path.display()
                )
                .into());
            }
        }

        Ok(output)
    }

    /// Runs `write` against the destination, flushing on success and
    /// removing a half-written file on failure.
    pub fn write_with<T>(
        &self,
        write: impl FnOnce(&mut dyn Write) -> lz78::Result<T>,
    ) -> Result<T, Box<dyn std::error::Error>> {
        match self {
            Output::Stdout => {
                let mut stdout = io::stdout().lock();
                let result = write(&mut stdout)?;
                stdout.flush()?;
                Ok(result)
            }
            Output::File(path) => {
                let mut file = BufWriter::new(File::create(path)?);
                let result = write(&mut file).and_then(|value| {
                    file.flush()?;
                    Ok(value)
                });
                if result.is_err() {
                    drop(file);
                    let _ = fs::remove_file(path);
                }
                Ok(result?)
            }
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Enforces the size limit on an input file before it is opened.
pub fn check_file_size(
    path: &Path,
    max_size: usize,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if max_size == 0 {
        return Ok(());
    }

    let file_size = fs::metadata(path)?.len();
    check_size(file_size, max_size, force)
}

/// Reads all of stdin, enforcing the size limit.
pub fn read_stdin(max_size: usize, force: bool) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    read_limited(io::stdin().lock(), max_size, force)
}

/// Whether stdin must be read through [`read_stdin`] before processing.
pub fn stdin_is_limited(max_size: usize, force: bool) -> bool {
    max_size > 0 && !force
}

/// Reads `reader` to the end. Without `force`, stops one byte past
/// `max_size` so an oversize input is never held in full.
fn read_limited<R: Read>(
    reader: R,
    max_size: usize,
    force: bool,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    if stdin_is_limited(max_size, force) {
        reader
            .take(max_size as u64 + 1)
            .read_to_end(&mut buffer)?;
        if buffer.len() > max_size {
            return Err(format!(
                "Input exceeds limit ({} bytes). Use --force to process anyway.",
                max_size
            )
            .into());
        }
        return Ok(buffer);
    }

    let mut reader = reader;
    reader.read_to_end(&mut buffer)?;
    if max_size > 0 {
        check_size(buffer.len() as u64, max_size, force)?;
    }
    Ok(buffer)
}

/// Reads a whole input, from `path` or stdin.
pub fn read_input(
    path: Option<&Path>,
    max_size: usize,
    force: bool,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            check_file_size(path, max_size, force)?;
            Ok(fs::read(path)?)
        }
        None => read_stdin(max_size, force),
    }
}

fn check_size(size: u64, max_size: usize, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if size <= max_size as u64 {
        return Ok(());
    }

    if force {
        warn!(size, limit = max_size, "processing input over the size limit");
        Ok(())
    } else {
        Err(format!(
            "Input size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
            size, max_size
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Lz78Config {
        Lz78Config::load_default().unwrap()
    }

    #[test]
    fn test_resolve_dash_is_stdout() {
        let output = Output::resolve(
            Some(Path::new("-")),
            Some(Path::new("notes.txt")),
            &config(),
            Direction::Compress,
        )
        .unwrap();
        assert_eq!(output, Output::Stdout);
    }

    #[test]
    fn test_resolve_derives_from_input() {
        let output = Output::resolve(
            None,
            Some(Path::new("notes.txt")),
            &config(),
            Direction::Compress,
        )
        .unwrap();
        assert_eq!(output, Output::File(PathBuf::from("notes.z78")));

        let output = Output::resolve(None, None, &config(), Direction::Decompress).unwrap();
        assert_eq!(output, Output::Stdout);
    }

    #[test]
    fn test_resolve_refuses_to_overwrite_input() {
        let result = Output::resolve(
            None,
            Some(Path::new("archive.z78")),
            &config(),
            Direction::Compress,
        );
        assert!(result.is_err());

        let result = Output::resolve(
            Some(Path::new("same.bin")),
            Some(Path::new("same.bin")),
            &config(),
            Direction::Decompress,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_size_limit() {
        assert!(check_size(10, 10, false).is_ok());
        assert!(check_size(11, 10, false).is_err());
        assert!(check_size(11, 10, true).is_ok());
    }

    #[test]
    fn test_read_limited_stops_past_the_limit() {
        let data = vec![7u8; 100];
        assert_eq!(read_limited(&data[..10], 10, false).unwrap().len(), 10);

        let err = read_limited(&data[..], 10, false).unwrap_err();
        assert!(err.to_string().contains("exceeds limit (10 bytes)"));

        assert_eq!(read_limited(&data[..], 10, true).unwrap().len(), 100);
        assert_eq!(read_limited(&data[..], 0, false).unwrap().len(), 100);
    }

    #[test]
    fn test_failed_write_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let output = Output::File(path.clone());

        let result: Result<(), _> = output.write_with(|w| {
            w.write_all(b"partial")?;
            Err(lz78::Lz78Error::InvalidCodeWidth(0))
        });
        assert!(result.is_err());
        assert!(!path.exists());

        output.write_with(|w| Ok(w.write_all(b"done")?)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"done");
    }
}
