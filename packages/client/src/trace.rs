//! Verbose protocol trace
//!
//! Lines follow the familiar `*` (info), `>` (sent) and `<` (received)
//! prefixes. The trace goes to a log file truncated per request, or to the
//! `log` facade when verbose output was requested without a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{self, Result};

const LOG_TARGET: &str = "cekmutasi::trace";

enum Sink {
    Off,
    Log,
    File { path: PathBuf, out: BufWriter<File> },
}

/// Trace sink scoped to one request; the file is closed when it is dropped
pub struct DebugTrace {
    sink: Sink,
}

impl DebugTrace {
    #[must_use]
    pub fn disabled() -> Self {
        Self { sink: Sink::Off }
    }

    /// Open the trace for a request.
    ///
    /// With a path the file is created or truncated. Without one, `verbose`
    /// routes the trace to the `log` facade at debug level.
    pub fn open(path: Option<&Path>, verbose: bool) -> Result<Self> {
        let sink = match path {
            Some(path) => {
                let file = File::create(path).map_err(|e| error::io(e, path))?;
                Sink::File {
                    path: path.to_path_buf(),
                    out: BufWriter::new(file),
                }
            }
            None if verbose => Sink::Log,
            None => Sink::Off,
        };
        Ok(Self { sink })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self.sink, Sink::Off)
    }

    pub fn info(&mut self, message: &str) {
        self.line('*', message);
    }

    pub fn sent(&mut self, line: &str) {
        self.line('>', line);
    }

    pub fn received(&mut self, line: &str) {
        self.line('<', line);
    }

    fn line(&mut self, prefix: char, text: &str) {
        match &mut self.sink {
            Sink::Off => {}
            Sink::Log => log::debug!(target: LOG_TARGET, "{prefix} {text}"),
            Sink::File { path, out } => {
                if let Err(e) = writeln!(out, "{prefix} {text}") {
                    log::warn!("debug trace {} write failed: {e}", path.display());
                    self.sink = Sink::Off;
                }
            }
        }
    }

    /// Flush and close the trace
    pub fn finish(self) {
        if let Sink::File { path, mut out } = self.sink {
            if let Err(e) = out.flush() {
                log::warn!("debug trace {} flush failed: {e}", path.display());
            }
        }
    }
}
