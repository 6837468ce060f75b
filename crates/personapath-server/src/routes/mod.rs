pub mod admin;
pub mod health;
pub mod questions;
pub mod reports;
pub mod session;
