use crate::types::Command;
use crate::{auth, callbacks, commands};
use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
    utils::command::BotCommands,
};

pub use crate::types::State;

/// Register bot commands in Telegram menu
pub async fn set_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    // Commands work in every dialogue state
    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(commands::start))
        .branch(case![Command::Help].endpoint(commands::help))
        .branch(case![Command::Find(query)].endpoint(commands::find))
        .branch(case![Command::List].endpoint(commands::list))
        .branch(case![Command::Lsts].endpoint(commands::lsts))
        .branch(case![Command::Magnet].endpoint(commands::get_magnet))
        .branch(case![Command::Setup].endpoint(commands::setup))
        .branch(case![Command::Cancel].endpoint(commands::cancel));

    let message_handler = Update::filter_message()
        .filter(auth::message_allowed)
        .branch(command_handler)
        .branch(case![State::GetMagnet].endpoint(commands::magnet))
        .branch(case![State::AwaitQuery].endpoint(commands::search_text))
        .branch(case![State::Start].endpoint(commands::search_text))
        .branch(dptree::endpoint(commands::invalid_state));

    // Handle callback queries from inline keyboards
    let callback_handler = Update::filter_callback_query()
        .filter(auth::callback_allowed)
        .endpoint(callbacks::handle_callback);

    dialogue::enter::<Update, InMemStorage<State>, State, _>()
        .branch(message_handler)
        .branch(callback_handler)
}
