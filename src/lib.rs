pub mod config;
pub mod errors;
pub mod feed;
pub mod models;
pub mod services;
pub mod sources;
pub mod web;
