pub mod config;
pub mod constants;
pub mod dao;
pub mod model;
pub mod service;
pub mod types;
