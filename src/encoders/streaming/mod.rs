mod decoder;
mod encoder;

pub use decoder::{DecodeSummary, StreamingDecoder};
pub use encoder::{EncodeSummary, StreamingEncoder};
