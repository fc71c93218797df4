//! Shared fixtures for ticket-metrics integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

/// Build one ticket-event object in the ticket store's export format
pub fn ticket(
    created: &str,
    severity: &str,
    status: &str,
    issue_type: &str,
    last_modified: Option<&str>,
    event_type: &str,
    partition_key: &str,
) -> Value {
    json!({
        "id": format!("{}-{}", partition_key, event_type),
        "CreatedDate": created,
        "Severity": severity,
        "Status": status,
        "IssueTypeId": issue_type,
        "LastModifiedDate": last_modified,
        "eventType": event_type,
        "partitionKey": partition_key,
        "_etag": "\"00000000-0000-0000-0000-000000000000\"",
    })
}

pub const CREATED: &str = "SupportRequestTicketCreated";
pub const UPDATED: &str = "SupportRequestTicketUpdated";

/// Serialize a list of event objects as the raw input batch
pub fn batch(events: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&Value::Array(events)).expect("fixture serializes")
}
