pub mod boggle;
pub mod config;
