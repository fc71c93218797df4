use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use strum::EnumString;

/// One observation of a support ticket's lifecycle.
///
/// Field names follow the export format of the ticket store. Timestamps keep
/// their recorded UTC offset so calendar bucketing happens in the offset the
/// ticket was recorded in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TicketEvent {
    /// Creation timestamp
    #[serde(rename = "CreatedDate")]
    pub created_date: DateTime<FixedOffset>,

    /// Severity level
    #[serde(rename = "Severity", default)]
    pub severity: Severity,

    /// Ticket status
    #[serde(rename = "Status", default)]
    pub status: TicketStatus,

    /// Issue type identifier
    #[serde(rename = "IssueTypeId", default, deserialize_with = "null_as_empty")]
    pub issue_type_id: String,

    /// Last modification timestamp, present only once the ticket was touched
    #[serde(rename = "LastModifiedDate", default)]
    pub last_modified_date: Option<DateTime<FixedOffset>>,

    /// Lifecycle event kind
    #[serde(rename = "eventType", default)]
    pub event_type: EventKind,

    /// Stable identifier correlating a ticket's events
    #[serde(rename = "partitionKey", default, deserialize_with = "null_as_empty")]
    pub partition_key: String,
}

/// Exports write `null` for string fields the store never filled in.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TicketEvent {
    /// Time from creation to last modification, if the ticket was modified.
    pub fn close_duration(&self) -> Option<Duration> {
        self.last_modified_date
            .map(|modified| modified.signed_duration_since(self.created_date))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Severity {
    High,
    Medium,
    Low,
    /// Anything outside the known levels; counted in totals only
    #[strum(default)]
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Other(raw) => raw,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Other(String::new())
    }
}

impl From<Option<String>> for Severity {
    fn from(raw: Option<String>) -> Self {
        raw.unwrap_or_default().into()
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        Severity::from_str(&raw).unwrap_or(Severity::Other(raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Deserialize)]
#[serde(from = "Option<String>")]
pub enum TicketStatus {
    #[strum(serialize = "closed", serialize = "close", ascii_case_insensitive)]
    Closed,
    #[strum(serialize = "open", ascii_case_insensitive)]
    Open,
    /// Duplicates and every unrecognized status share this bucket
    #[strum(default)]
    Other(String),
}

impl TicketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TicketStatus::Closed => "Closed",
            TicketStatus::Open => "Open",
            TicketStatus::Other(raw) => raw,
        }
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        TicketStatus::Other(String::new())
    }
}

impl From<Option<String>> for TicketStatus {
    fn from(raw: Option<String>) -> Self {
        raw.unwrap_or_default().into()
    }
}

impl From<String> for TicketStatus {
    fn from(raw: String) -> Self {
        TicketStatus::from_str(&raw).unwrap_or(TicketStatus::Other(raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Deserialize)]
#[serde(from = "Option<String>")]
pub enum EventKind {
    #[strum(serialize = "SupportRequestTicketCreated", serialize = "Created")]
    Created,
    #[strum(serialize = "SupportRequestTicketUpdated", serialize = "Updated")]
    Updated,
    #[strum(default)]
    Other(String),
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Other(String::new())
    }
}

impl From<Option<String>> for EventKind {
    fn from(raw: Option<String>) -> Self {
        raw.unwrap_or_default().into()
    }
}

impl From<String> for EventKind {
    fn from(raw: String) -> Self {
        EventKind::from_str(&raw).unwrap_or(EventKind::Other(raw))
    }
}
