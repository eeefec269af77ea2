pub mod cache;
pub mod catalog_store;
pub mod config;
pub mod errors;
pub mod models;
pub mod object_storage;
pub mod services;
pub mod utils;
pub mod web;
