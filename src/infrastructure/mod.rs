pub mod providers;
pub mod static_host;
