pub mod chart;
pub mod library;
pub mod session;
pub mod song;
pub mod unlocks;
