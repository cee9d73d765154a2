use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  /upload <path>       upload a PDF and ask questions against it
  /collection          show the collection questions go to
  /collection <name>   use an existing collection by name
  /history             show the conversation so far
  /help                show this help
  /quit                leave
Anything else is sent as a question.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    ShowCollection,
    SetCollection(String),
    History,
    Help,
    Quit,
    Ask(String),
    Blank,
    Usage(&'static str),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };

    match name {
        "upload" if argument.is_empty() => Command::Usage("usage: /upload <path to pdf>"),
        "upload" => Command::Upload(PathBuf::from(argument)),
        "collection" if argument.is_empty() => Command::ShowCollection,
        "collection" => Command::SetCollection(argument.to_string()),
        "history" => Command::History,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Usage("unknown command, try /help"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_question() {
        assert_eq!(
            parse("  What is covered?  "),
            Command::Ask("What is covered?".to_string())
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Command::Blank);
    }

    #[test]
    fn upload_keeps_spaces_in_path() {
        assert_eq!(
            parse("/upload ~/docs/annual report.pdf"),
            Command::Upload(PathBuf::from("~/docs/annual report.pdf"))
        );
        assert!(matches!(parse("/upload"), Command::Usage(_)));
    }

    #[test]
    fn collection_shows_or_sets() {
        assert_eq!(parse("/collection"), Command::ShowCollection);
        assert_eq!(
            parse("/collection policy"),
            Command::SetCollection("policy".to_string())
        );
    }

    #[test]
    fn unknown_command_gets_usage() {
        assert!(matches!(parse("/frobnicate"), Command::Usage(_)));
        assert_eq!(parse("/exit"), Command::Quit);
    }
}
