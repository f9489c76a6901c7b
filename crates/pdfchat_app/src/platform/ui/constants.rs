pub const APP_TITLE: &str = "PDF Chatbot";
pub const APP_SUBTITLE: &str = "Upload a PDF and ask questions about it";
pub const PROMPT: &str = "> ";

pub const CMD_UPLOAD: &str = "/upload";
pub const CMD_CLEAR: &str = "/clear";
pub const CMD_HELP: &str = "/help";
pub const CMD_QUIT: &str = "/quit";
/// A question starting with `/` can be written with `//` to skip command parsing.
pub const COMMAND_ESCAPE: &str = "//";

/// Extension the file picker accepts.
pub const PDF_EXTENSION: &str = "pdf";

pub const BUSY_NOTICE: &str = "Still waiting for the backend, please wait.";
pub const NOTHING_TO_CLEAR_NOTICE: &str = "No document uploaded; nothing to clear.";

pub const PROGRESS_BAR_WIDTH: usize = 20;

pub const HELP_TEXT: &str = "\
Type a question and press Enter to ask it.
  /upload <path>   upload a PDF to ask questions about
  /clear           clear the chat and forget the current PDF
  /help            show this help
  /quit            exit
Start a line with // to ask a question that begins with /.";
