pub mod config;
pub mod smear;
pub mod version;
