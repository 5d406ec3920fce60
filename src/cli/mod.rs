pub mod app;
mod commands;

pub use app::App;
pub use commands::{execute_command, Args, Commands};
