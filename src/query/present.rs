//! Presentation stage: order the results and render the report.

use std::fmt;

use tracing::debug;

use crate::model::User;
use crate::storage::SocialGraph;
use crate::Result;
use super::literal::ListLiteral;
use super::sort::sort_usernames;
use super::{Format, PresentSpec, SortKey};

const SEPARATOR: &str = "----------";

/// Run the presentation stage.
///
/// `results` is sorted in place by `spec.sort_by`, then rendered. Sorting by
/// name or rendering the long format needs a record for every username, so
/// a dangling one fails with `UnknownUser` before anything is reordered.
pub fn present<S: SocialGraph + ?Sized>(
    store: &S,
    results: &mut [String],
    spec: &PresentSpec,
) -> Result<String> {
    if spec.sort_by == SortKey::Name || spec.format == Format::Long {
        for username in results.iter() {
            store.require(username)?;
        }
    }

    sort_usernames(store, results, spec.sort_by);

    let report = match spec.format {
        Format::Short => ListLiteral(&*results).to_string(),
        Format::Long => {
            let users = results
                .iter()
                .map(|u| store.require(u))
                .collect::<Result<Vec<_>>>()?;
            LongReport(&users).to_string()
        }
    };

    debug!(results = results.len(), sort_by = %spec.sort_by, format = %spec.format, "present");
    Ok(report)
}

/// Long format: one separator-delimited block per user, trailing newline.
pub struct LongReport<'a>(pub &'a [&'a User]);

impl fmt::Display for LongReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SEPARATOR)?;
        if self.0.is_empty() {
            write!(f, "\n{SEPARATOR}")?;
        }
        for user in self.0 {
            write!(f, "\n{}", user.username)?;
            write!(f, "\nname: {}", user.name)?;
            write!(f, "\nlocation: {}", user.location)?;
            write!(f, "\nwebsite: {}", user.website)?;
            write!(f, "\nbio:\n{}", user.bio)?;
            write!(f, "\nfollowing: {}", ListLiteral(user.following.as_slice()))?;
            write!(f, "\n{SEPARATOR}")?;
        }
        f.write_str("\n")
    }
}
