//! Line-oriented text formats for graph dumps and queries.
//!
//! Graph dump, repeated until EOF or a blank username line:
//!
//! ```text
//! username
//! name
//! location
//! website
//! bio line (zero or more)
//! ENDBIO
//! followed username (zero or more)
//! END
//! ```
//!
//! Query:
//!
//! ```text
//! SEARCH
//! username
//! operation (zero or more)
//! FILTER
//! key argument (zero or more)
//! PRESENT
//! key value (until EOF or a blank line)
//! ```
//!
//! Every line is trimmed before use.

use std::io::BufRead;

use tracing::debug;

use crate::model::User;
use crate::query::{FilterSpec, Predicate, PresentSpec, Query, SearchSpec};
use crate::storage::MemoryStore;
use crate::{Error, Result};

pub const END_BIO: &str = "ENDBIO";
pub const END_FOLLOWING: &str = "END";

const SEARCH: &str = "SEARCH";
const FILTER: &str = "FILTER";
const PRESENT: &str = "PRESENT";

// ============================================================================
// Line reader
// ============================================================================

/// Trimmed lines with 1-based line numbers for error reporting.
struct Lines<R> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self { inner: reader.lines(), line: 0 }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.inner.next() {
            Some(line) => {
                self.line += 1;
                Ok(Some(line?.trim().to_string()))
            }
            None => Ok(None),
        }
    }

    /// Next line, or a syntax error naming what was expected.
    fn expect_line(&mut self, what: &str) -> Result<String> {
        self.next_line()?
            .ok_or_else(|| self.error(format!("unexpected end of input, expected {what}")))
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Syntax { line: self.line, message: message.into() }
    }
}

// ============================================================================
// Graph dump
// ============================================================================

/// Read user records from a graph dump.
pub fn read_users<R: BufRead>(reader: R) -> Result<Vec<User>> {
    let mut lines = Lines::new(reader);
    let mut users = Vec::new();

    while let Some(username) = lines.next_line()? {
        if username.is_empty() {
            break;
        }
        let mut user = User::new(username);
        user.name = lines.expect_line("name")?;
        user.location = lines.expect_line("location")?;
        user.website = lines.expect_line("website")?;

        let mut bio = Vec::new();
        loop {
            let line = lines.expect_line(END_BIO)?;
            if line == END_BIO {
                break;
            }
            bio.push(line);
        }
        user.bio = bio.join("\n");

        loop {
            let line = lines.expect_line(END_FOLLOWING)?;
            if line == END_FOLLOWING {
                break;
            }
            user.following.push(line);
        }

        users.push(user);
    }

    debug!(users = users.len(), lines = lines.line, "read graph dump");
    Ok(users)
}

/// Read a graph dump into a store.
pub fn read_store<R: BufRead>(reader: R) -> Result<MemoryStore> {
    Ok(MemoryStore::from_users(read_users(reader)?))
}

// ============================================================================
// Query
// ============================================================================

/// Read a query description.
///
/// Blank lines inside the search and filter sections are skipped; in the
/// presentation section a blank line ends the query.
pub fn read_query<R: BufRead>(reader: R) -> Result<Query> {
    let mut lines = Lines::new(reader);

    let header = lines.expect_line(SEARCH)?;
    if header != SEARCH {
        return Err(lines.error(format!("expected {SEARCH}, found `{header}`")));
    }

    let username = lines.expect_line("search username")?;
    if username.is_empty() {
        return Err(lines.error("search username is empty"));
    }
    let mut search = SearchSpec::new(username);
    loop {
        let line = lines.expect_line(FILTER)?;
        match line.as_str() {
            FILTER => break,
            "" => continue,
            op => search.operations.push(op.parse()?),
        }
    }

    let mut filter = FilterSpec::new();
    loop {
        let line = lines.expect_line(PRESENT)?;
        match line.as_str() {
            PRESENT => break,
            "" => continue,
            pair => {
                let (key, argument) = split_predicate(&lines, pair)?;
                filter.push(Predicate::parse(key, argument)?);
            }
        }
    }

    let mut present = Vec::new();
    while let Some(line) = lines.next_line()? {
        if line.is_empty() {
            break;
        }
        let (key, value) = split_pair(&lines, &line)?;
        present.push((key.to_string(), value.to_string()));
    }
    let present = PresentSpec::from_pairs(present)?;

    Ok(Query::new(search, filter, present))
}

/// Read a query from a string.
pub fn parse_query(text: &str) -> Result<Query> {
    read_query(text.as_bytes())
}

/// Split a filter line. Trimming turns `name-includes ` into a bare key, so
/// the substring predicates take a missing argument as the empty text.
fn split_predicate<'l, R: BufRead>(lines: &Lines<R>, line: &'l str) -> Result<(&'l str, &'l str)> {
    match line {
        "name-includes" | "location-includes" => Ok((line, "")),
        _ => split_pair(lines, line),
    }
}

/// Split `key value` at the first space.
fn split_pair<'l, R: BufRead>(lines: &Lines<R>, line: &'l str) -> Result<(&'l str, &'l str)> {
    line.split_once(' ')
        .ok_or_else(|| lines.error(format!("expected `key value`, found `{line}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Format, Operation, SortKey};
    use crate::storage::SocialGraph;

    const DUMP: &str = "\
tomCruise
Tom Cruise
Los Angeles, CA
http://www.tomcruise.com
Official TomCruise.com crew tweets.
We love you guys!
ENDBIO
katieH
NicoleKidman
END
katieH
Katie Holmes

www.tomkat.com
ENDBIO
END
";

    #[test]
    fn test_read_users() {
        let users = read_users(DUMP.as_bytes()).unwrap();
        assert_eq!(users.len(), 2);

        let tom = &users[0];
        assert_eq!(tom.username, "tomCruise");
        assert_eq!(tom.location, "Los Angeles, CA");
        assert_eq!(tom.bio, "Official TomCruise.com crew tweets.\nWe love you guys!");
        assert_eq!(tom.following, vec!["katieH", "NicoleKidman"]);

        let katie = &users[1];
        assert_eq!(katie.location, "");
        assert_eq!(katie.website, "www.tomkat.com");
        assert_eq!(katie.bio, "");
        assert!(katie.following.is_empty());
    }

    #[test]
    fn test_read_store_keeps_dangling_edges() {
        let store = read_store(DUMP.as_bytes()).unwrap();
        assert_eq!(store.user_count(), 2);
        assert_eq!(store.followers_of("NicoleKidman"), vec!["tomCruise"]);
    }

    #[test]
    fn test_blank_username_ends_dump() {
        let text = format!("{DUMP}\nignored\n");
        assert_eq!(read_users(text.as_bytes()).unwrap().len(), 2);
        assert!(read_users("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_dump() {
        let err = read_users("a\nname\nloc\nweb\nbio\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 5, .. }));
    }

    #[test]
    fn test_read_query() {
        let query = parse_query(
            "SEARCH\ntomCruise\nfollowing\nfollowers\nFILTER\nname-includes Katie H\nfollower tomCruise\nPRESENT\nsort-by popularity\nformat long\n",
        )
        .unwrap();

        assert_eq!(query.search.username, "tomCruise");
        assert_eq!(query.search.operations, vec![Operation::Following, Operation::Followers]);
        assert_eq!(query.filter.predicates[0], Predicate::NameIncludes("Katie H".into()));
        assert_eq!(query.filter.predicates[1], Predicate::Follower("tomCruise".into()));
        assert_eq!(query.present, PresentSpec::new(SortKey::Popularity, Format::Long));
    }

    #[test]
    fn test_read_query_empty_sections() {
        let query = parse_query("SEARCH\na\nFILTER\nPRESENT\nsort-by username\nformat short").unwrap();
        assert!(query.search.operations.is_empty());
        assert!(query.filter.is_empty());
    }

    #[test]
    fn test_bare_substring_predicate() {
        let query = parse_query(
            "SEARCH\na\nFILTER\nname-includes \nlocation-includes\nPRESENT\nsort-by username\nformat short\n",
        )
        .unwrap();
        assert_eq!(
            query.filter.predicates.to_vec(),
            vec![Predicate::NameIncludes(String::new()), Predicate::LocationIncludes(String::new())]
        );
    }

    #[test]
    fn test_read_query_errors() {
        assert!(matches!(parse_query("FIND\na\n"), Err(Error::Syntax { line: 1, .. })));
        assert!(matches!(parse_query("SEARCH\na\nfollowing\n"), Err(Error::Syntax { .. })));
        assert!(matches!(
            parse_query("SEARCH\na\nfriends\nFILTER\nPRESENT\n"),
            Err(Error::UnrecognizedOperation(_))
        ));
        assert!(matches!(
            parse_query("SEARCH\na\nFILTER\nfollower\nPRESENT\n"),
            Err(Error::Syntax { line: 4, .. })
        ));
        assert!(matches!(
            parse_query("SEARCH\na\nFILTER\nbio-includes x\nPRESENT\n"),
            Err(Error::UnrecognizedPredicate(_))
        ));
        assert!(matches!(
            parse_query("SEARCH\na\nFILTER\nPRESENT\nsort-by username\n"),
            Err(Error::MalformedDescriptor(_))
        ));
        assert!(matches!(
            parse_query("SEARCH\na\nFILTER\nPRESENT\nsort-by username\nformat wide\n"),
            Err(Error::UnrecognizedFormat(_))
        ));
    }
}
