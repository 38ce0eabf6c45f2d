#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
pub mod config;
pub mod fightsnake;
pub mod server;
pub mod strategies;
