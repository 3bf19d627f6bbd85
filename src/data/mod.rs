pub mod client;
pub mod export;
pub mod request;
pub mod snapshot;
