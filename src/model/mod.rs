//! # Social Graph Model
//!
//! Plain data shared by the store, the query stages and the loaders.
//! Follow edges are username references, never object links.
//!
//! Design rule: no I/O, no state here.

pub mod user;

pub use user::User;
