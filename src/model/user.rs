//! User profile document

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::time::iso_seconds;

/// Profile record at `/users/{uid}`.
///
/// The uid comes from the auth provider and is the node's key in the
/// path; it is never stored inside the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    /// Avatar name, resolved to a texture client-side
    pub avatar: String,
    #[serde(with = "iso_seconds")]
    pub joined_on: NaiveDateTime,
    #[serde(with = "iso_seconds")]
    pub last_online: NaiveDateTime,
}
