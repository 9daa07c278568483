pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod message;
pub mod notification;
pub mod timer;
pub mod upload;
