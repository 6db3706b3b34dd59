pub mod ar;
pub mod health;
pub mod idols;
