pub mod catalog;
pub mod config;
pub mod data;
pub mod fetch;
pub mod present;
pub mod view;
