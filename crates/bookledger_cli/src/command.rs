//! Shell command grammar.
//!
//! One command per line: a verb, then arguments. Multi-field arguments are
//! separated by `|` so titles and authors may contain spaces:
//!
//! ```text
//! add The Left Hand of Darkness | Ursula K. Le Guin | 17
//! borrow The Left Hand of Darkness
//! ```

use bookledger_core::{parse_book_id, BookId, BookValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const HELP_TEXT: &str = "\
commands:
  add <title> | <author> | <id>
  update <title> | <author> | <id>
  remove <title>
  get <title>
  borrow <title>
  return <title>
  list
  borrowed
  reload
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        title: String,
        author: String,
        id: BookId,
    },
    Update {
        title: String,
        author: String,
        id: BookId,
    },
    Remove(String),
    Get(String),
    Borrow(String),
    Return(String),
    List,
    Borrowed,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    /// Extra `|`-separated fields after the id.
    TooManyFields,
    InvalidInput(BookValidationError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(verb) => write!(f, "unknown command `{verb}`; try `help`"),
            Self::MissingArgument(name) => write!(f, "missing argument: {name}"),
            Self::TooManyFields => write!(f, "expected <title> | <author> | <id>"),
            Self::InvalidInput(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {}

impl From<BookValidationError> for ParseError {
    fn from(value: BookValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// Parses one non-blank input line.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "add" => {
            let (title, author, id) = parse_record_fields(rest)?;
            Ok(Command::Add { title, author, id })
        }
        "update" => {
            let (title, author, id) = parse_record_fields(rest)?;
            Ok(Command::Update { title, author, id })
        }
        "remove" => Ok(Command::Remove(require_title(rest)?)),
        "get" => Ok(Command::Get(require_title(rest)?)),
        "borrow" => Ok(Command::Borrow(require_title(rest)?)),
        "return" => Ok(Command::Return(require_title(rest)?)),
        "list" => Ok(Command::List),
        "borrowed" => Ok(Command::Borrowed),
        "reload" => Ok(Command::Reload),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn require_title(rest: &str) -> Result<String, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument("title"));
    }
    Ok(rest.to_string())
}

fn parse_record_fields(rest: &str) -> Result<(String, String, BookId), ParseError> {
    let mut fields = rest.split('|').map(str::trim);
    let title = fields
        .next()
        .filter(|value| !value.is_empty())
        .ok_or(ParseError::MissingArgument("title"))?;
    let author = fields.next().ok_or(ParseError::MissingArgument("author"))?;
    let id = fields.next().ok_or(ParseError::MissingArgument("id"))?;
    if fields.next().is_some() {
        return Err(ParseError::TooManyFields);
    }
    let id = parse_book_id(id)?;
    Ok((title.to_string(), author.to_string(), id))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command, ParseError};
    use bookledger_core::BookValidationError;

    #[test]
    fn parses_add_with_spaces_in_fields() {
        let command = parse_command("add  The Dispossessed | Ursula K. Le Guin | 42 ")
            .expect("add should parse");
        assert_eq!(
            command,
            Command::Add {
                title: "The Dispossessed".to_string(),
                author: "Ursula K. Le Guin".to_string(),
                id: 42,
            }
        );
    }

    #[test]
    fn rejects_non_numeric_id_before_reaching_core() {
        let err = parse_command("update Emma | Austen | seven").expect_err("id must be numeric");
        assert_eq!(
            err,
            ParseError::InvalidInput(BookValidationError::InvalidId("seven".to_string()))
        );
    }

    #[test]
    fn reports_missing_fields() {
        assert_eq!(
            parse_command("add Emma | Austen"),
            Err(ParseError::MissingArgument("id"))
        );
        assert_eq!(
            parse_command("borrow"),
            Err(ParseError::MissingArgument("title"))
        );
        assert_eq!(
            parse_command("add Emma | Austen | 1 | extra"),
            Err(ParseError::TooManyFields)
        );
    }

    #[test]
    fn parses_single_title_and_bare_verbs() {
        assert_eq!(
            parse_command("RETURN Dune Messiah"),
            Ok(Command::Return("Dune Messiah".to_string()))
        );
        assert_eq!(parse_command("borrowed"), Ok(Command::Borrowed));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert!(matches!(
            parse_command("lend Emma"),
            Err(ParseError::UnknownCommand(verb)) if verb == "lend"
        ));
    }
}
