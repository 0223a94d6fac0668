//! docfs: an embedded JSON document store.
//!
//! Records are grouped into collections. Each collection is a directory under
//! the store root and each record is a single pretty-printed JSON file:
//!
//! ```text
//! <root>/<collection>/<resource>.json
//! ```
//!
//! Writes go through a staging file that is renamed into place, so a record
//! is always either its previous version or its new version on disk. Writes
//! and deletes are serialized per collection; reads take no locks.
//!
//! Only threads within one process are coordinated. Two processes opening the
//! same root are not.
//!
//! # Example
//!
//! ```rust
//! use docfs_store::Driver;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let db = Driver::open_default(dir.path()).unwrap();
//!
//! let alice = User { name: "Alice".to_string(), age: 30 };
//! db.write("users", "alice", &alice).unwrap();
//!
//! let read_back: User = db.read("users", "alice").unwrap();
//! assert_eq!(read_back, alice);
//!
//! assert_eq!(db.read_all("users").unwrap().len(), 1);
//!
//! db.delete("users", "alice").unwrap();
//! assert!(db.read::<User>("users", "alice").unwrap_err().is_not_found());
//! ```

mod driver;
mod error;
pub mod logger;
mod options;
pub mod path;
mod registry;

pub use driver::Driver;
pub use error::{Error, Result};
pub use logger::{ConsoleLogger, Level, LogFacade, Logger};
pub use options::{Options, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
pub use registry::MutexRegistry;
