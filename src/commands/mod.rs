pub mod config;
pub mod download;
pub mod encode;
pub mod extract;
pub mod ics;
