mod adapter;
mod message;
mod provider;
mod role;
mod slash_commands;

pub use adapter::*;
pub use message::*;
pub use provider::*;
pub use role::*;
pub use slash_commands::*;
