pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod paths;
pub mod repository;
pub mod services;
pub mod state;

#[cfg(test)]
mod testing;
