//! Ticket records
//!
//! A [`Ticket`] is the immutable record of one completed interaction:
//! either a general inquiry resolved at a leaf of the menu, or an
//! emergency escalation filed through the contact form.
//!
//! The serialized shape is fixed by existing snapshots:
//!
//! ```json
//! { "id": "TICKET-...", "type": "general", "createdAt": "2024-05-01T09:30:00.000Z",
//!   "status": "open", "data": { "path": "A > 1", "nodeId": "A.1" } }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of every generated ticket id
pub const TICKET_ID_PREFIX: &str = "TICKET-";

/// Ticket identifier
///
/// Generated ids are `TICKET-<ulid>`. Ids loaded from a snapshot are kept
/// verbatim whatever their shape; older snapshots use `TICKET-<unix millis>`.
///
/// Ids order by the creation time they encode, so generated and millisecond
/// ids interleave chronologically. Ids with no readable time sort first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl TicketId {
    /// Build id from a ULID
    #[inline]
    #[must_use]
    pub fn from_ulid(ulid: ulid::Ulid) -> Self {
        Self(format!("{TICKET_ID_PREFIX}{ulid}"))
    }

    /// Get id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time encoded in the id, in Unix milliseconds
    #[must_use]
    pub fn timestamp_ms(&self) -> Option<u64> {
        let suffix = self.0.strip_prefix(TICKET_ID_PREFIX)?;
        match ulid::Ulid::from_string(suffix) {
            Ok(ulid) => Some(ulid.timestamp_ms()),
            Err(_) => suffix.parse().ok(),
        }
    }
}

impl Ord for TicketId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp_ms()
            .cmp(&other.timestamp_ms())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TicketId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketKind {
    /// Inquiry resolved at a leaf of the menu
    General,
    /// Escalation through the emergency contact form
    Emergency,
}

impl std::fmt::Display for TicketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Emergency => write!(f, "emergency"),
        }
    }
}

/// Ticket status
///
/// Tickets are created open and nothing here closes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting staff follow-up
    #[default]
    Open,
}

/// Payload of a general ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralPayload {
    /// Breadcrumb labels joined with [`GeneralPayload::SEPARATOR`]
    pub path: String,

    /// Id of the resolved leaf node
    pub node_id: String,

    /// Keys written by other tools, kept across rewrites
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GeneralPayload {
    /// Separator between breadcrumb labels in `path`
    pub const SEPARATOR: &'static str = " > ";

    /// Build payload from breadcrumb labels and the leaf id
    #[must_use]
    pub fn new<S: AsRef<str>>(breadcrumb: &[S], node_id: impl Into<String>) -> Self {
        let path = breadcrumb
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(Self::SEPARATOR);
        Self {
            path,
            node_id: node_id.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Contact details submitted with an emergency ticket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Customer name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Store the booking was made at
    pub store: String,
    /// Free-text description of the situation
    pub situation: String,

    /// Keys written by other tools, kept across rewrites
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Ticket payload
///
/// Stored verbatim. Unknown keys next to a known shape land in the
/// payload's `extra` map; records whose `data` matches neither shape are
/// kept as raw JSON. A snapshot rewrite loses neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketPayload {
    /// Resolved breadcrumb and leaf id
    General(GeneralPayload),
    /// Submitted contact fields
    Emergency(EmergencyContact),
    /// Unrecognized shape from an older snapshot
    Other(serde_json::Value),
}

impl From<GeneralPayload> for TicketPayload {
    fn from(value: GeneralPayload) -> Self {
        Self::General(value)
    }
}

impl From<EmergencyContact> for TicketPayload {
    fn from(value: EmergencyContact) -> Self {
        Self::Emergency(value)
    }
}

/// Immutable record of a completed interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique, time-ordered id
    pub id: TicketId,

    /// General or emergency
    #[serde(rename = "type")]
    pub kind: TicketKind,

    /// Creation timestamp
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    /// Always open
    pub status: TicketStatus,

    /// Kind-specific data
    #[serde(rename = "data")]
    pub payload: TicketPayload,
}

/// RFC 3339 with millisecond precision, the format existing snapshots use
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
