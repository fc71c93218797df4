use crate::error::{AppError, Result};
use crate::models::TicketEvent;
use tracing::{debug, info};

/// Decode a JSON array of ticket-event objects, preserving input order.
///
/// Unknown fields are ignored. Anything that is not an array of objects with
/// at least a valid `CreatedDate` fails the whole batch.
pub fn decode_events(bytes: &[u8]) -> Result<Vec<TicketEvent>> {
    let events: Vec<TicketEvent> = serde_json::from_slice(bytes).map_err(|e| {
        debug!(error = %e, line = e.line(), column = e.column(), "Failed to decode ticket events");
        AppError::Decode(e.to_string())
    })?;

    info!(events = events.len(), "Decoded ticket events");
    Ok(events)
}
