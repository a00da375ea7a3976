pub mod block;
pub mod config;
pub mod constants;
pub mod hashing;
pub mod header;
pub mod network;
pub mod tx;
