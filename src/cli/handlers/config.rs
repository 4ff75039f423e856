use crate::cli::{args::ConfigArgs, global::GlobalArgs};
use lz78::{Direction, ExtensionSettings, Lz78Config, Settings};

pub fn handle(
    args: ConfigArgs,
    global: &GlobalArgs,
    config: &Lz78Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let effective = effective_config(global, config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
    } else {
        print!("{}", toml::to_string_pretty(&effective)?);
    }

    Ok(())
}

/// Every key filled in with the value commands will actually use.
fn effective_config(global: &GlobalArgs, config: &Lz78Config) -> Lz78Config {
    Lz78Config {
        extensions: ExtensionSettings {
            compressed: Some(config.extension(Direction::Compress).to_string()),
            decompressed: Some(config.extension(Direction::Decompress).to_string()),
        },
        settings: Settings {
            max_size: Some(global.max_size(config)),
        },
    }
}
