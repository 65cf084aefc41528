//! Graph dump export: serialize a store in the line-oriented text format.
//!
//! The output is what `loader::text::read_store` reads back:
//!
//! ```text
//! SocialGraph → export_text_dump() → username / name / location / website
//!   / bio… / ENDBIO / following… / END, one record per user
//! ```
//!
//! Records are written in ascending username order. A store whose records
//! would not read back unchanged is rejected with `Error::Unrepresentable`
//! before any output is written: an empty username, a line break inside a
//! single-line field, surrounding whitespace (lines are trimmed on the way
//! in), a bio line equal to `ENDBIO`, or a followed username equal to `END`.

use std::io::Write;

use tracing::debug;

use crate::loader::text::{END_BIO, END_FOLLOWING};
use crate::model::User;
use crate::storage::SocialGraph;
use crate::{Error, Result};

/// Export every user record of `store` as a text graph dump.
pub fn export_text_dump<S: SocialGraph + ?Sized>(store: &S, writer: &mut dyn Write) -> Result<()> {
    let usernames = store.usernames();
    let users = usernames
        .iter()
        .map(|username| store.require(username))
        .collect::<Result<Vec<_>>>()?;
    for user in &users {
        check_user(user)?;
    }
    for user in &users {
        write_user(user, writer)?;
    }

    debug!(users = usernames.len(), edges = store.edge_count(), "exported text dump");
    Ok(())
}

/// Reject a record that `read_users` would not reproduce.
fn check_user(user: &User) -> Result<()> {
    let fail = |field, problem| Error::Unrepresentable {
        username: user.username.clone(),
        field,
        problem,
    };

    if user.username.is_empty() {
        return Err(fail("username", "is empty"));
    }
    check_line(&user.username).map_err(|p| fail("username", p))?;
    check_line(&user.name).map_err(|p| fail("name", p))?;
    check_line(&user.location).map_err(|p| fail("location", p))?;
    check_line(&user.website).map_err(|p| fail("website", p))?;

    if !user.bio.is_empty() {
        for line in user.bio.split('\n') {
            check_line(line).map_err(|p| fail("bio", p))?;
            if line == END_BIO {
                return Err(fail("bio", "has a line equal to the ENDBIO marker"));
            }
        }
    }

    for followed in &user.following {
        check_line(followed).map_err(|p| fail("following", p))?;
        if followed == END_FOLLOWING {
            return Err(fail("following", "has an entry equal to the END marker"));
        }
    }
    Ok(())
}

/// A value that must come back from a single trimmed line.
fn check_line(value: &str) -> std::result::Result<(), &'static str> {
    if value.contains(['\n', '\r']) {
        Err("contains a line break")
    } else if value.trim() != value {
        Err("has leading or trailing whitespace")
    } else {
        Ok(())
    }
}

/// Write a single record.
fn write_user(user: &User, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "{}", user.username)?;
    writeln!(writer, "{}", user.name)?;
    writeln!(writer, "{}", user.location)?;
    writeln!(writer, "{}", user.website)?;
    if !user.bio.is_empty() {
        for line in user.bio.split('\n') {
            writeln!(writer, "{line}")?;
        }
    }
    writeln!(writer, "{END_BIO}")?;
    for followed in &user.following {
        writeln!(writer, "{followed}")?;
    }
    writeln!(writer, "{END_FOLLOWING}")?;
    Ok(())
}
