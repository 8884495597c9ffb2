mod activity;
mod config_cmd;
mod values_cmd;

pub use activity::ActivityCommand;
pub use config_cmd::ConfigCommand;
pub use values_cmd::ValuesCommand;
