//! Sample records used by `docfs demo`.

use std::io::Write;

use serde::{Deserialize, Serialize};

use docfs_store::Driver;

use crate::commands::CommandError;

pub const COLLECTION: &str = "users";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub company: String,
    pub address: Address,
}

impl User {
    fn new(name: &str, contact: &str, company: &str, city: &str, state: &str) -> Self {
        User {
            name: name.to_string(),
            age: 23,
            contact: contact.to_string(),
            company: company.to_string(),
            address: Address {
                city: city.to_string(),
                state: state.to_string(),
                country: "Canada".to_string(),
                pincode: 234234,
            },
        }
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        User::new("Seb", "17781234567", "VTS", "Waterloo", "Ontario"),
        User::new("Charles", "17781234567", "PW", "Vancouver", "British Columbia"),
        User::new(
            "Supreme Leader",
            "17781234567",
            "Stay home",
            "Vancouver",
            "British Columbia",
        ),
        User::new(
            "Buc",
            "1778621234567",
            "Watching anime",
            "Vancouver",
            "British Columbia",
        ),
    ]
}

/// Seeds the sample users, then prints the raw records followed by the
/// decoded users.
pub fn run(db: &Driver, out: &mut impl Write) -> Result<Vec<User>, CommandError> {
    for user in sample_users() {
        db.write(COLLECTION, &user.name, &user)?;
    }

    let records = db.read_all(COLLECTION)?;
    for record in &records {
        write!(out, "{}", record)?;
    }

    let mut users = Vec::with_capacity(records.len());
    for record in &records {
        let user: User = serde_json::from_str(record)?;
        users.push(user);
    }
    writeln!(out, "{:#?}", users)?;

    Ok(users)
}
