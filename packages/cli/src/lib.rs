//! # docfs-cli
//!
//! Command-line access to a docfs store, plus the demo that seeds a few
//! sample users.
//!
//! ## Usage
//!
//! ```bash
//! # Seed and print the sample users under ./users
//! docfs demo
//!
//! docfs --root /tmp/db write users alice '{"Name": "Alice", "Age": "30"}'
//! docfs --root /tmp/db read users alice
//! docfs --root /tmp/db read-all users
//! docfs --root /tmp/db delete users alice
//! docfs --root /tmp/db delete users
//! ```
//!
//! The root defaults to `DOCFS_ROOT` when set, otherwise the current
//! directory.

pub mod commands;
pub mod demo;

pub use commands::{execute, Command, CommandError};
