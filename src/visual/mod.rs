pub mod host;
pub mod plugin;
