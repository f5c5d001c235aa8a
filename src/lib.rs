pub mod config;
pub mod error;
pub mod db;
pub mod plans;
pub mod services;
pub mod api;
pub mod mailer;
pub mod identity;
pub mod alert_checker;

pub use config::Config;
pub use error::{ AppError, Result };
