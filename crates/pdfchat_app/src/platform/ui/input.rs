use std::path::{Path, PathBuf};

use super::constants::*;

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    Upload(PathBuf),
    Clear,
    Help,
    Quit,
    /// Rejected before it reaches the chat state; the text explains why.
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        // Blank questions are passed through; the chat state ignores them.
        return Command::Ask(line.to_string());
    }
    if let Some(escaped) = trimmed.strip_prefix(COMMAND_ESCAPE) {
        return Command::Ask(format!("/{escaped}"));
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };
    match name {
        CMD_UPLOAD => parse_upload(rest),
        CMD_CLEAR => Command::Clear,
        CMD_HELP => Command::Help,
        CMD_QUIT => Command::Quit,
        // Not a command, e.g. "/etc/hosts format?".
        _ => Command::Ask(line.to_string()),
    }
}

fn parse_upload(arg: &str) -> Command {
    let arg = strip_quotes(arg);
    if arg.is_empty() {
        return Command::Invalid(format!("Usage: {CMD_UPLOAD} <path to a .pdf file>"));
    }
    let path = PathBuf::from(arg);
    if !is_pdf(&path) {
        return Command::Invalid(format!("Only .{PDF_EXTENSION} files can be uploaded."));
    }
    Command::Upload(path)
}

fn strip_quotes(arg: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = arg
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    arg
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}
