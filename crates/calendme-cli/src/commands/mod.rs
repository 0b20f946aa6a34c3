pub mod config;
pub mod events;
pub mod export;
pub mod import;
pub mod theme;
