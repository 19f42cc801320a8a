//! Parsing of REPL input lines.

use std::path::PathBuf;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: a chat turn.
    Say(String),
    Attach(PathBuf),
    Detach,
    Clear,
    History,
    Instructions,
    Teach(String),
    Memory,
    Remember(String),
    Forget(i64),
    /// Show the current model, or select one.
    Model(Option<String>),
    /// List models, optionally filtered.
    Models(Option<String>),
    /// Save a key, or clear it when absent.
    Key(Option<String>),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command /{0} (try /help)")]
    Unknown(String),
    #[error("/{command} needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("\"{0}\" is not a valid id")]
    InvalidId(String),
}

pub const HELP: &str = "\
Type a message and press enter to chat.

  /attach <path>     stage a file for the next message
  /detach            drop the staged file
  /clear             forget the conversation
  /history           show the conversation so far
  /instructions      list instructions
  /teach <text>      add an instruction
  /memory            list remembered facts
  /remember <text>   add a fact
  /forget <id>       delete a fact
  /model [id]        show or select the model
  /models [search]   list models by provider
  /key [key]         use your own API key (no key clears it)
  /help              this text
  /quit              leave";

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Say(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let arg = (!arg.is_empty()).then(|| arg.to_string());

    let command = match name.to_lowercase().as_str() {
        "attach" => Command::Attach(required(arg, "attach", "a file path")?.into()),
        "detach" => Command::Detach,
        "clear" => Command::Clear,
        "history" => Command::History,
        "instructions" => Command::Instructions,
        "teach" => Command::Teach(required(arg, "teach", "instruction text")?),
        "memory" => Command::Memory,
        "remember" => Command::Remember(required(arg, "remember", "fact text")?),
        "forget" => {
            let id = required(arg, "forget", "a fact id")?;
            Command::Forget(id.parse().map_err(|_| CommandError::InvalidId(id))?)
        }
        "model" => Command::Model(arg),
        "models" => Command::Models(arg),
        "key" => Command::Key(arg),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(command)
}

fn required(
    arg: Option<String>,
    command: &'static str,
    what: &'static str,
) -> Result<String, CommandError> {
    arg.ok_or(CommandError::MissingArgument { command, what })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_turn() {
        assert_eq!(parse("  hi there "), Ok(Command::Say("hi there".into())));
        assert_eq!(parse(""), Ok(Command::Say(String::new())));
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse("/attach ~/notes/cv.pdf"),
            Ok(Command::Attach("~/notes/cv.pdf".into()))
        );
        assert_eq!(
            parse("/teach   Always mention the dog  "),
            Ok(Command::Teach("Always mention the dog".into()))
        );
        assert_eq!(parse("/forget 12"), Ok(Command::Forget(12)));
        assert_eq!(
            parse("/models claude"),
            Ok(Command::Models(Some("claude".into())))
        );
    }

    #[test]
    fn optional_arguments_may_be_absent() {
        assert_eq!(parse("/model"), Ok(Command::Model(None)));
        assert_eq!(parse("/key"), Ok(Command::Key(None)));
        assert_eq!(parse("/KEY sk-1"), Ok(Command::Key(Some("sk-1".into()))));
    }

    #[test]
    fn missing_required_argument() {
        assert_eq!(
            parse("/remember"),
            Err(CommandError::MissingArgument {
                command: "remember",
                what: "fact text"
            })
        );
        assert_eq!(
            parse("/attach").unwrap_err().to_string(),
            "/attach needs a file path"
        );
    }

    #[test]
    fn bad_id_and_unknown_command() {
        assert_eq!(parse("/forget two"), Err(CommandError::InvalidId("two".into())));
        assert_eq!(parse("/dance"), Err(CommandError::Unknown("dance".into())));
    }

    #[test]
    fn aliases() {
        assert_eq!(parse("/exit"), Ok(Command::Quit));
        assert_eq!(parse("/?"), Ok(Command::Help));
    }
}
