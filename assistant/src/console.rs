use pdf_qa::query_service::CURSOR;
use pdf_qa::{
    CollectionName, QueryError, QueryEvent, Role, Transcript, UploadError, ValidationError,
};
use std::io::{self, Stdout, Write};

const ERASE_CURSOR: &str = "\u{8} \u{8}";
const ASSISTANT_PREFIX: &str = "assistant> ";

pub fn describe_query_error(err: &QueryError) -> String {
    match err {
        QueryError::Backend { message, .. } => format!("Error: {}", message),
        QueryError::Connection { reason } => format!("Connection error: {}", reason),
    }
}

/// Terminal rendering of the session: prompts, upload results and the live answer.
pub struct Console<W: Write> {
    out: W,
    cursor_shown: bool,
    streamed: bool,
    needs_prefix: bool,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cursor_shown: false,
            streamed: false,
            needs_prefix: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "PDF QA Assistant")?;
        writeln!(self.out, "Type /help for commands.")?;
        writeln!(self.out)
    }

    pub fn help(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// The collection field is shown pre-filled with whatever the session holds.
    pub fn prompt(&mut self, collection_name: &CollectionName) -> io::Result<()> {
        if collection_name.is_empty() {
            write!(self.out, "[no collection] Ask a question about the PDF> ")?;
        } else {
            write!(self.out, "[{}] Ask a question about the PDF> ", collection_name)?;
        }
        self.out.flush()
    }

    pub fn upload_started(&mut self, file_name: &str) -> io::Result<()> {
        writeln!(self.out, "Processing PDF {}...", file_name)?;
        self.out.flush()
    }

    pub fn upload_succeeded(&mut self, collection_name: &CollectionName) -> io::Result<()> {
        writeln!(self.out, "PDF processed successfully!")?;
        writeln!(self.out, "Collection name: `{}`", collection_name)
    }

    pub fn upload_failed(&mut self, err: &UploadError) -> io::Result<()> {
        writeln!(self.out, "Error processing PDF: {}", err.message)
    }

    pub fn collection(&mut self, collection_name: &CollectionName) -> io::Result<()> {
        if collection_name.is_empty() {
            writeln!(self.out, "No collection selected. Upload a PDF or use /collection <name>.")
        } else {
            writeln!(self.out, "Collection name: `{}`", collection_name)
        }
    }

    pub fn history(&mut self, transcript: &Transcript) -> io::Result<()> {
        if transcript.is_empty() {
            return writeln!(self.out, "No questions asked yet.");
        }
        for message in transcript.iter() {
            let speaker = match message.role {
                Role::User => "you",
                Role::Assistant => "assistant",
            };
            writeln!(self.out, "{}> {}", speaker, message.content)?;
        }
        Ok(())
    }

    pub fn validation_failed(&mut self, err: &ValidationError) -> io::Result<()> {
        match err {
            ValidationError::MissingCollectionName => {
                writeln!(self.out, "Please enter a collection name first")
            }
            ValidationError::EmptyQuestion => Ok(()),
        }
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }

    pub fn on_event(&mut self, event: QueryEvent) -> io::Result<()> {
        match event {
            QueryEvent::Question(_) => {
                self.cursor_shown = false;
                self.streamed = false;
                self.needs_prefix = false;
                write!(self.out, "{}", ASSISTANT_PREFIX)?;
            }
            QueryEvent::Provisional { fragment, .. } => {
                self.erase_cursor()?;
                write!(self.out, "{}{}", fragment, CURSOR)?;
                self.cursor_shown = true;
                self.streamed = true;
            }
            QueryEvent::Failed(err) => {
                self.erase_cursor()?;
                writeln!(self.out)?;
                writeln!(self.out, "{}", describe_query_error(&err))?;
                self.streamed = false;
                self.needs_prefix = true;
            }
            QueryEvent::Committed(answer) => {
                self.erase_cursor()?;
                if !self.streamed {
                    if self.needs_prefix {
                        write!(self.out, "{}", ASSISTANT_PREFIX)?;
                    }
                    write!(self.out, "{}", answer)?;
                }
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    fn erase_cursor(&mut self) -> io::Result<()> {
        if self.cursor_shown {
            write!(self.out, "{}", ERASE_CURSOR)?;
            self.cursor_shown = false;
        }
        Ok(())
    }
}
