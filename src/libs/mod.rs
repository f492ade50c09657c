pub mod constants;
pub mod error;
pub mod events;
pub mod media;
pub mod player;
pub mod supabase;
pub mod upload;
pub mod utils;
