pub mod actions;
pub mod auth;
pub mod callbacks;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod keyboards;
pub mod kinds;
pub mod list;
pub mod session;
pub mod telegram;
pub mod types;
pub mod utils;

pub use config::BotConfig;
pub use error::{BotError, BotResult};
pub use session::{SessionStore, SetupStore};
pub use teloxide::prelude::Dispatcher;
pub use types::{Command, HandlerResult, MyDialogue, Services, State};
