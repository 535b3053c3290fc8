//! Interactive console command parsing.

use std::path::PathBuf;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the endpoint list.
    List,
    /// Select an endpoint.
    Use { key: String },
    /// Show the form and last response.
    Show,
    /// Set a parameter value.
    Set { name: String, value: String },
    /// Replace the body text.
    Body { text: String },
    /// Send the current request.
    Send,
    /// Show connectivity.
    Status,
    /// Export the last response.
    Export { path: Option<PathBuf> },
    /// Print command help.
    Help,
    /// Leave the console.
    Quit,
    /// Blank line.
    Empty,
}

/// Help text for the interactive console.
pub const HELP: &str = "\
Commands:
  list                   show endpoints
  use <key>              select an endpoint
  show                   show the form and last response
  set <param> <value>    set a parameter (value may contain spaces;
                         \\n starts a new line in multi-line fields)
  body <json>            replace the request body
  send                   send the request
  status                 show server connectivity
  export [path]          save the last response as JSON
  help                   show this help
  quit                   leave the console";

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Ok(Command::List),
        "use" | "select" => {
            if rest.is_empty() {
                Err("usage: use <key>".to_string())
            } else {
                Ok(Command::Use {
                    key: rest.to_string(),
                })
            }
        }
        "show" => Ok(Command::Show),
        "set" => match rest.split_once(char::is_whitespace) {
            Some((name, value)) => Ok(Command::Set {
                name: name.to_string(),
                value: value.trim_start().to_string(),
            }),
            None if !rest.is_empty() => Ok(Command::Set {
                name: rest.to_string(),
                value: String::new(),
            }),
            None => Err("usage: set <param> <value>".to_string()),
        },
        "body" => Ok(Command::Body {
            text: rest.to_string(),
        }),
        "send" => Ok(Command::Send),
        "status" => Ok(Command::Status),
        "export" => Ok(Command::Export {
            path: (!rest.is_empty()).then(|| PathBuf::from(rest)),
        }),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command: {} (try help)", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_commands() {
        assert_eq!(parse_command("  "), Ok(Command::Empty));
        assert_eq!(parse_command("LIST"), Ok(Command::List));
        assert_eq!(parse_command("send"), Ok(Command::Send));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert_eq!(
            parse_command("use wishlist-add"),
            Ok(Command::Use {
                key: "wishlist-add".to_string()
            })
        );
    }

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            parse_command("set review  Great game, ten out of ten"),
            Ok(Command::Set {
                name: "review".to_string(),
                value: "Great game, ten out of ten".to_string(),
            })
        );
    }

    #[test]
    fn set_without_value_clears_field() {
        assert_eq!(
            parse_command("set title"),
            Ok(Command::Set {
                name: "title".to_string(),
                value: String::new(),
            })
        );
        assert!(parse_command("set").is_err());
    }

    #[test]
    fn body_takes_rest_of_line() {
        assert_eq!(
            parse_command(r#"body {"title": "Hades"}"#),
            Ok(Command::Body {
                text: r#"{"title": "Hades"}"#.to_string()
            })
        );
    }

    #[test]
    fn export_path_is_optional() {
        assert_eq!(parse_command("export"), Ok(Command::Export { path: None }));
        assert_eq!(
            parse_command("export out/r.json"),
            Ok(Command::Export {
                path: Some(PathBuf::from("out/r.json"))
            })
        );
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(parse_command("fly").unwrap_err().contains("unknown command: fly"));
        assert!(parse_command("use").is_err());
    }
}
