use crate::cli::{
    args::CompressArgs,
    global::GlobalArgs,
    streams::{self, Output},
};
use lz78::{Direction, Lz78Config};
use std::fs::File;
use std::io::{BufReader, Cursor};
use tracing::debug;

pub fn handle(
    args: CompressArgs,
    global: &GlobalArgs,
    config: &Lz78Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let max_size = global.max_size(config);
    let output = Output::resolve(
        args.output.as_deref(),
        args.file.as_deref(),
        config,
        Direction::Compress,
    )?;
    debug!(?output, "compressing");

    // The encoder reads its input twice, so stdin is buffered to make it seekable.
    let summary = match &args.file {
        Some(path) => {
            streams::check_file_size(path, max_size, global.force)?;
            let mut reader = BufReader::new(File::open(path)?);
            output.write_with(|writer| lz78::compress_stream(&mut reader, writer))?
        }
        None => {
            let mut reader = Cursor::new(streams::read_stdin(max_size, global.force)?);
            output.write_with(|writer| lz78::compress_stream(&mut reader, writer))?
        }
    };

    if let Output::File(path) = &output {
        if !global.quiet {
            eprintln!(
                "{} -> {} ({} -> {} bytes, {} entries, {}-byte codes)",
                args.file
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "stdin".to_string()),
                path.display(),
                summary.input_bytes,
                summary.output_bytes,
                summary.entries,
                summary.code_width
            );
        }
    }

    Ok(())
}
