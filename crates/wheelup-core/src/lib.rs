pub mod config;
pub mod logging;

pub mod error;
pub mod http;
pub mod listing;
pub mod run;
pub mod select;
pub mod upload;
pub mod wheel_name;
