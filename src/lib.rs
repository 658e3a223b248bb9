pub mod app;
pub mod cli;
pub mod common;
pub mod config;
pub mod downloader;
pub mod search;
pub mod selection;
