//! REPL input parsing.

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(String),
    New,
    /// Conversation id, or a 1-based index into the last `/list`.
    Open(String),
    List,
    Rename { target: String, title: String },
    Delete(String),
    Hospitals {
        latitude: f64,
        longitude: f64,
        search_term: Option<String>,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <text>                        send a message
  /new                          start a new chat
  /list                         list your conversations
  /open <id|#>                  open a conversation
  /rename <id|#> <title>        rename a conversation
  /delete <id|#>                delete a conversation
  /hospitals <lat> <lon> [term] nearest hospitals
  /help                         this help
  /quit                         exit";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Send(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "new" => Ok(Command::New),
        "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "open" => required(args, "/open <id|#>").map(Command::Open),
        "delete" | "rm" => required(args, "/delete <id|#>").map(Command::Delete),
        "rename" => {
            let (target, title) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: /rename <id|#> <title>".to_string())?;
            Ok(Command::Rename {
                target: target.to_string(),
                title: title.trim().to_string(),
            })
        }
        "hospitals" => parse_hospitals(args),
        other => Err(format!("unknown command /{} (try /help)", other)),
    }
}

fn required(args: &str, usage: &str) -> Result<String, String> {
    if args.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(args.to_string())
    }
}

fn parse_hospitals(args: &str) -> Result<Command, String> {
    const USAGE: &str = "usage: /hospitals <lat> <lon> [term]";

    let mut parts = args.splitn(3, char::is_whitespace);
    let latitude = parts
        .next()
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(|| USAGE.to_string())?;
    let longitude = parts
        .next()
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(|| USAGE.to_string())?;
    let search_term = parts
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Ok(Command::Hospitals {
        latitude,
        longitude,
        search_term,
    })
}
