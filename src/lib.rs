pub mod error;

pub mod cache;
pub mod client;
pub mod command;
pub mod config;
pub mod context;
pub mod credentials;
pub mod env;
pub mod provider;
pub mod request;
pub mod resolver;

pub mod cmd;

#[cfg(test)]
mod dev;
