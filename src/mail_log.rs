use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::contact_email::ContactEmail;
use crate::domain::contact_name::ContactName;

/// Format shared by log lines and the "Sent on" footer of the email
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one delivery attempt, as recorded in the plaintext log
#[derive(Debug, Clone)]
pub enum MailLogEntry {
    Sent {
        timestamp: String,
        from: ContactEmail,
        name: ContactName,
        to: ContactEmail,
        cc: ContactEmail,
    },
    Failed {
        timestamp: String,
        from: ContactEmail,
        name: ContactName,
    },
}

impl std::fmt::Display for MailLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MailLogEntry::Sent {
                timestamp,
                from,
                name,
                to,
                cc,
            } => write!(
                f,
                "{} - Email sent successfully from: {} ({}) to: {} (CC: {})",
                timestamp,
                from,
                single_line(name.as_ref()),
                to,
                cc
            ),
            MailLogEntry::Failed {
                timestamp,
                from,
                name,
            } => write!(
                f,
                "{} - Email failed to send from: {} ({})",
                timestamp,
                from,
                single_line(name.as_ref())
            ),
        }
    }
}

// A name with embedded line breaks would otherwise split one record across lines
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

#[derive(thiserror::Error, Debug)]
pub enum MailLogError {
    #[error("Failed to append to the mail log.")]
    WriteError(#[from] std::io::Error),
    #[error("The mail log writer did not finish.")]
    TaskError(#[from] tokio::task::JoinError),
}

/// Append-only text file shared by every request
#[derive(Debug, Clone)]
pub struct MailLog {
    path: PathBuf,
}

impl MailLog {
    pub fn new(path: impl Into<PathBuf>) -> MailLog {
        MailLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(name = "Append to the mail log", skip(self), fields(path = %self.path.display()))]
    pub async fn append(&self, entry: &MailLogEntry) -> Result<(), MailLogError> {
        let line = format!("{}\n", entry);
        let path = self.path.clone();

        // File locking blocks, so keep it off the async workers
        tokio::task::spawn_blocking(move || append_line(&path, &line)).await??;

        Ok(())
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    // The exclusive lock serializes writers from this and any other process; it is released
    // when `file` is dropped.
    file.lock()?;
    file.write_all(line.as_bytes())?;
    file.flush()
}
