pub mod assign;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod io;
pub mod model;
pub mod notify;

pub use error::{Result, SetupError};
