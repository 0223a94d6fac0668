//! Configuration used when opening a store.

use std::fmt;
use std::sync::Arc;

use crate::logger::{ConsoleLogger, Logger};

pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Options for [`Driver::open`](crate::Driver::open).
///
/// ```rust
/// use std::sync::Arc;
/// use docfs_store::{ConsoleLogger, Level, Options};
///
/// let options = Options::new()
///     .logger(Arc::new(ConsoleLogger::new(Level::Debug)))
///     .file_mode(0o600);
/// assert_eq!(options.file_mode, 0o600);
/// ```
#[derive(Clone)]
pub struct Options {
    /// Diagnostic sink. `None` means a [`ConsoleLogger`] at `Info`.
    pub logger: Option<Arc<dyn Logger>>,
    /// Permission bits for created directories (Unix only).
    pub dir_mode: u32,
    /// Permission bits for record files (Unix only).
    pub file_mode: u32,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    pub(crate) fn logger_or_default(&self) -> Arc<dyn Logger> {
        self.logger
            .clone()
            .unwrap_or_else(|| Arc::new(ConsoleLogger::default()))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            logger: None,
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("logger", &self.logger.as_ref().map(|_| "<dyn Logger>"))
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("file_mode", &format_args!("{:o}", self.file_mode))
            .finish()
    }
}
