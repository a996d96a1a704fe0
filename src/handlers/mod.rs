//! HTTP handlers

pub mod health;
pub mod about;
pub mod view;
pub mod dashboard;
pub mod history;
pub mod verifications;
pub mod uploads;
