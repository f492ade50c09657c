pub mod config;
pub mod player;
pub mod playlist;
pub mod upload;
