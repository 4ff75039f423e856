pub mod errors;
pub mod streaming;
pub mod token;
