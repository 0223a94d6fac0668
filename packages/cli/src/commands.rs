//! Command parsing and execution.
//!
//! Commands:
//! - `demo` - Seed the sample users and print them
//! - `write <collection> <resource> <json>` - Store a JSON record
//! - `read <collection> <resource>` - Print a record
//! - `read-all <collection>` - Print every record in a collection
//! - `delete <collection> [resource]` - Delete a record or a whole collection

use std::io::{self, Write};

use clap::Subcommand;
use serde_json::Value as JsonValue;

use docfs_store::Driver;

use crate::demo;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Store(#[from] docfs_store::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Seed sample users into the `users` collection and print them
    Demo,

    /// Write a JSON record
    Write {
        collection: String,
        resource: String,
        /// Record contents as JSON
        json: String,
    },

    /// Read one record and print it
    Read { collection: String, resource: String },

    /// Print the raw text of every record in a collection
    ReadAll { collection: String },

    /// Delete a record, or the whole collection if no resource is given
    Delete {
        collection: String,
        resource: Option<String>,
    },
}

/// Run `command` against `db`, printing results to `out`.
pub fn execute(command: &Command, db: &Driver, out: &mut impl Write) -> Result<(), CommandError> {
    match command {
        Command::Demo => {
            demo::run(db, out)?;
        }
        Command::Write {
            collection,
            resource,
            json,
        } => {
            let value: JsonValue = serde_json::from_str(json)?;
            db.write(collection, resource, &value)?;
            writeln!(out, "Wrote {}/{}", collection, resource)?;
        }
        Command::Read {
            collection,
            resource,
        } => {
            let value: JsonValue = db.read(collection, resource)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        Command::ReadAll { collection } => {
            for record in db.read_all(collection)? {
                write!(out, "{}", record)?;
            }
        }
        Command::Delete {
            collection,
            resource,
        } => {
            let resource = resource.as_deref().unwrap_or("");
            db.delete(collection, resource)?;
            if resource.is_empty() {
                writeln!(out, "Deleted {}", collection)?;
            } else {
                writeln!(out, "Deleted {}/{}", collection, resource)?;
            }
        }
    }
    Ok(())
}
