pub mod backend;
pub mod db;
pub mod error;
pub mod favorites;
pub mod history;
pub mod models;
pub mod service;
pub mod session;
pub mod timer;
