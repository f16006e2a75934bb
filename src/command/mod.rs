//! Line commands for the interactive loop. Each variant routes to one
//! widget action; parsing stays pure so it can be tested directly.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenDialog,
    CloseDialog,
    Pick(PathBuf),
    Submit,
    TogglePanel,
    Merge,
    /// Replace the notes pane; `None` starts multi-line capture.
    Notes(Option<String>),
    /// Replace the template pane; `None` starts multi-line capture.
    Template(Option<String>),
    Show,
    Status,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP_TEXT: &str = "\
Commands:
  open             open the upload dialog
  pick <path>      choose an audio file (mp3, wav, m4a, flac, ogg, aac)
  submit           upload the chosen file for transcription
  close            close the upload dialog
  toggle           expand or collapse the transcript panel
  notes [text]     replace the notes pane (bare form reads lines until '.')
  template [text]  replace the template pane (bare form reads lines until '.')
  merge            complete the template from transcript and notes
  show             print the workspace
  status           check the transcription server
  help             show this text
  quit             exit";

impl Command {
    /// Parse one input line. `None` means the line was blank.
    pub fn parse(line: &str) -> Option<Result<Command, CommandError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head {
            "open" => Command::OpenDialog,
            "close" => Command::CloseDialog,
            "pick" => {
                if rest.is_empty() {
                    return Some(Err(CommandError::Usage("pick <path-to-audio-file>")));
                }
                Command::Pick(PathBuf::from(rest))
            }
            "submit" | "transcribe" => Command::Submit,
            "toggle" => Command::TogglePanel,
            "merge" | "complete" => Command::Merge,
            "notes" => Command::Notes(if rest.is_empty() { None } else { Some(rest.to_string()) }),
            "template" => {
                Command::Template(if rest.is_empty() { None } else { Some(rest.to_string()) })
            }
            "show" => Command::Show,
            "status" => Command::Status,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Some(Err(CommandError::Unknown(other.to_string()))),
        };

        Some(Ok(command))
    }
}
