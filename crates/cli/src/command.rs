//! Parsing of interactive commands.

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the query (empty clears it).
    Search(String),
    /// Open a result by 1-based position or by id.
    Open(String),
    Close,
    Rate(u8),
    Add,
    Remove(String),
    Watched,
    Stats,
    /// Simulate a key press.
    Key(String),
    Metrics,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <text>   search the catalog (fewer than 3 characters clears)
  open <n|id>     open result n, or a title id; again to close
  close           close the open title
  rate <1-10>     rate the open title
  add             add the open title to your watched list
  remove <id>     remove a title from your watched list
  watched         show your watched list
  stats           show watched list statistics
  key <name>      press a key (enter, escape)
  metrics         print metrics
  help            show this help
  quit            exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "search" | "s" => Command::Search(arg.to_string()),
            "open" | "o" => Command::Open(required(name, arg)?),
            "close" => Command::Close,
            "rate" | "r" => {
                let rating = arg
                    .parse()
                    .map_err(|_| format!("rate expects a number from 1 to 10, got '{}'", arg))?;
                Command::Rate(rating)
            }
            "add" => Command::Add,
            "remove" | "rm" => Command::Remove(required(name, arg)?),
            "watched" | "w" => Command::Watched,
            "stats" => Command::Stats,
            "key" => Command::Key(required(name, arg)?),
            "metrics" => Command::Metrics,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err("type 'help' for commands".to_string()),
            other => return Err(format!("unknown command '{}'", other)),
        };
        Ok(command)
    }
}

fn required(name: &str, arg: &str) -> Result<String, String> {
    if arg.is_empty() {
        Err(format!("{} needs an argument", name))
    } else {
        Ok(arg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("search  the dark knight ").unwrap(),
            Command::Search("the dark knight".to_string())
        );
        assert_eq!(Command::parse("search").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(Command::parse("rate 8").unwrap(), Command::Rate(8));
        assert!(Command::parse("rate eight").is_err());
    }

    #[test]
    fn test_parse_requires_argument() {
        assert!(Command::parse("open").is_err());
        assert!(Command::parse("remove").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Command::parse("Q").unwrap(), Command::Quit);
        assert_eq!(
            Command::parse("o 2").unwrap(),
            Command::Open("2".to_string())
        );
    }
}
