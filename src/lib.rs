pub mod config;
pub mod db;
pub mod pagination;
pub mod selection;
pub mod server;
pub mod telemetry;
pub mod transfer;
