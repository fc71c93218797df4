//! Input loading and decoding of ticket-event batches

mod decoder;
mod source;

pub use decoder::decode_events;
pub use source::read_source;
