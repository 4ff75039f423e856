use crate::cli::{
    args::DecompressArgs,
    global::GlobalArgs,
    streams::{self, Output},
};
use lz78::{Direction, Lz78Config};
use std::fs::File;
use std::io;

pub fn handle(
    args: DecompressArgs,
    global: &GlobalArgs,
    config: &Lz78Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = Output::resolve(
        args.output.as_deref(),
        args.file.as_deref(),
        config,
        Direction::Decompress,
    )?;

    let max_size = global.max_size(config);

    // Decoding is single-pass, so unlimited stdin streams straight through.
    // A limited one is read first so nothing is written for oversize input.
    let summary = match &args.file {
        Some(path) => {
            streams::check_file_size(path, max_size, global.force)?;
            let mut reader = File::open(path)?;
            output.write_with(|writer| lz78::decompress_stream(&mut reader, writer))?
        }
        None if streams::stdin_is_limited(max_size, global.force) => {
            let data = streams::read_stdin(max_size, global.force)?;
            output.write_with(|writer| lz78::decompress_stream(&mut data.as_slice(), writer))?
        }
        None => {
            let mut reader = io::stdin().lock();
            output.write_with(|writer| lz78::decompress_stream(&mut reader, writer))?
        }
    };

    if let Output::File(path) = &output {
        if !global.quiet {
            eprintln!(
                "{} -> {} ({} tokens, {} bytes)",
                args.file
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "stdin".to_string()),
                path.display(),
                summary.tokens,
                summary.output_bytes
            );
        }
    }

    Ok(())
}
