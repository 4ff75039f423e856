use crate::cli::{args::InspectArgs, global::GlobalArgs, streams};
use lz78::{Lz78Config, Token};

pub fn handle(
    args: InspectArgs,
    global: &GlobalArgs,
    config: &Lz78Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = streams::read_input(args.file.as_deref(), global.max_size(config), global.force)?;
    let (code_width, tokens) = lz78::read_tokens(&data)?;
    let shown = &tokens[..args.limit.unwrap_or(tokens.len()).min(tokens.len())];

    if args.json {
        let output = serde_json::json!({
            "code_width": code_width,
            "token_count": tokens.len(),
            "tokens": shown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Code width: {} byte(s)", code_width);
    println!("Tokens: {}", tokens.len());
    for (index, token) in shown.iter().enumerate() {
        println!("{:>8}  {}", index + 1, describe(token));
    }
    if shown.len() < tokens.len() {
        println!("... {} more", tokens.len() - shown.len());
    }

    Ok(())
}

fn describe(token: &Token) -> String {
    let literal = if token.literal.is_ascii_graphic() || token.literal == b' ' {
        format!("{:?}", token.literal as char)
    } else {
        format!("0x{:02x}", token.literal)
    };
    format!("({}, {})", token.code, literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_literals() {
        assert_eq!(describe(&Token::new(0, b'a')), "(0, 'a')");
        assert_eq!(describe(&Token::new(12, b' ')), "(12, ' ')");
        assert_eq!(describe(&Token::new(3, 0)), "(3, 0x00)");
        assert_eq!(describe(&Token::new(3, 0xff)), "(3, 0xff)");
    }
}
