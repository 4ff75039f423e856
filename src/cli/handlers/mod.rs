pub mod compress;
pub mod config;
pub mod decompress;
pub mod inspect;
