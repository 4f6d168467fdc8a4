//! Curated channel records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A channel the user added to the collection. `name` is unique across channels.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub profile_image: Option<String>,
    pub channel_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChannel {
    pub name: String,
    pub profile_image: Option<String>,
    pub channel_id: Option<String>,
    pub description: Option<String>,
}

impl NewChannel {
    pub fn with_id(self, id: i64) -> Channel {
        Channel {
            id,
            name: self.name,
            profile_image: self.profile_image,
            channel_id: self.channel_id,
            description: self.description,
        }
    }
}
