//! services/reader/src/cli.rs
//!
//! Command-line arguments for the `reader` binary.

use clap::{Parser, Subcommand, ValueEnum};
use story_reader_core::ports::CollectionKind;

#[derive(Debug, Parser)]
#[command(name = "reader", version, about = "Read illustrated stories from the story API.")]
pub struct Cli {
    /// Story API base URL. Overrides STORY_API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open a story in the interactive reader.
    Read {
        /// Story identifier.
        story_id: String,
    },
    /// List one of the curated story collections.
    List {
        #[arg(value_enum)]
        collection: CollectionArg,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollectionArg {
    Featured,
    New,
    Popular,
}

impl From<CollectionArg> for CollectionKind {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Featured => CollectionKind::Featured,
            CollectionArg::New => CollectionKind::New,
            CollectionArg::Popular => CollectionKind::Popular,
        }
    }
}

/// A command typed at the reader prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderCommand {
    Next,
    Prev,
    /// 1-based stop number, as printed in the progress label.
    GoTo(usize),
    Like,
    Dislike,
    Back,
    Retry,
    Quit,
    Help,
}

impl ReaderCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()?.to_lowercase().as_str() {
            "n" | "next" | "sonraki" => ReaderCommand::Next,
            "p" | "prev" | "onceki" | "önceki" => ReaderCommand::Prev,
            "g" | "go" => ReaderCommand::GoTo(words.next()?.parse().ok()?),
            "like" | "begendim" | "beğendim" => ReaderCommand::Like,
            "dislike" | "begenmedim" | "beğenmedim" => ReaderCommand::Dislike,
            "b" | "back" | "geri" => ReaderCommand::Back,
            "r" | "retry" => ReaderCommand::Retry,
            "q" | "quit" | "exit" => ReaderCommand::Quit,
            "h" | "help" | "?" => ReaderCommand::Help,
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reader_commands() {
        assert_eq!(ReaderCommand::parse(" n "), Some(ReaderCommand::Next));
        assert_eq!(ReaderCommand::parse("Önceki"), Some(ReaderCommand::Prev));
        assert_eq!(ReaderCommand::parse("g 3"), Some(ReaderCommand::GoTo(3)));
        assert_eq!(ReaderCommand::parse("like"), Some(ReaderCommand::Like));
        assert_eq!(ReaderCommand::parse("g"), None);
        assert_eq!(ReaderCommand::parse("g x"), None);
        assert_eq!(ReaderCommand::parse(""), None);
        assert_eq!(ReaderCommand::parse("dance"), None);
    }

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::try_parse_from(["reader", "list", "popular", "--limit", "5"]).unwrap();
        match cli.command {
            Command::List { collection, limit } => {
                assert_eq!(CollectionKind::from(collection), CollectionKind::Popular);
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
