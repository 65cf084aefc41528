//! User profile record.

use serde::{Deserialize, Serialize};

/// A user profile in the social graph.
///
/// `following` keeps the source order and any repeated entries. Names in it
/// are plain identifiers and may not have a record of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "web")]
    pub website: String,
    /// Free-form text, may span several lines.
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub following: Vec<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_following(mut self, following: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.following = following.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `username` appears in this user's following sequence.
    pub fn follows(&self, username: &str) -> bool {
        self.following.iter().any(|f| f == username)
    }
}
