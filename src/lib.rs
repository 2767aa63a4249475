//! Xabar - a small news publishing service
//!
//! Authors publish categorized news items, visitors browse and search
//! them, logged-in readers comment, and a contact form collects visitor
//! messages. Superusers manage the content through the admin endpoints.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
