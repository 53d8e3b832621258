use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Game server region a friend request is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Asia,
    Europe,
    Na,
    Sa,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Asia, Region::Europe, Region::Na, Region::Sa];

    /// Wire value used in the `server` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Na => "na",
            Region::Sa => "sa",
        }
    }

    /// Human-facing label for the region selector
    pub fn label(&self) -> &'static str {
        match self {
            Region::Asia => "ASIA-PACIFIC [AP-01]",
            Region::Europe => "EUROPE [EU-03]",
            Region::Na => "NORTH AMERICA [NA-02]",
            Region::Sa => "SOUTH AMERICA [SA-01]",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Region {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Region {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asia" => Ok(Region::Asia),
            "europe" => Ok(Region::Europe),
            "na" => Ok(Region::Na),
            "sa" => Ok(Region::Sa),
            other => Err(format!("unknown server region: {other}")),
        }
    }
}

/// Outbound friend request, sent as query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRequest {
    /// Authorization secret; never logged in clear
    pub code: String,
    pub server: Region,
    pub uid: String,
}

impl FriendRequest {
    pub fn query_pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("code", self.code.as_str()),
            ("server", self.server.as_str()),
            ("uid", self.uid.as_str()),
        ]
    }
}

/// Server reply to a friend request.
///
/// Only `success` is required. `id` may arrive as a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FriendResponse {
    pub fn accepted(id: impl Into<Value>) -> Self {
        Self {
            success: true,
            id: Some(id.into()),
            message: None,
        }
    }

    pub fn rejected(message: Option<&str>) -> Self {
        Self {
            success: false,
            id: None,
            message: message.map(str::to_string),
        }
    }

    /// The request id rendered for display, if it is a string or number
    pub fn id_text(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The server's failure message, treating an empty string as absent
    pub fn server_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
