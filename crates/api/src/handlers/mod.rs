pub mod backup;
pub mod client;
pub mod measurement;
