use serde::{Deserialize, Serialize};

use crate::filtering::tags::TagSet;

/// The user's profile. Skills act as an always-on filter over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub skills: TagSet,
}
