pub mod export;
pub mod health;
pub mod sessions;
pub mod tracks;
pub mod views;
