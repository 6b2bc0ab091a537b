pub mod aggregate;
pub mod assign;
pub mod config;
pub mod error;
pub mod io;
pub mod labels;
pub mod model;
pub mod pipeline;

pub use error::{Result, ToolError};
