//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use avatarka_core::{advance, Event, SessionState, Step};

use super::commands::{handle_help_command, handle_start_command};
use super::photos::handle_media_message;
use super::types::{user_key, HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::menu::handle_menu_callback;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Returns a handler tree usable with teloxide's Dispatcher; the same schema
/// serves production and tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_media = deps.clone();
    let deps_text = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        // Command handler
        .branch(command_handler())
        // Photo/document handler
        .branch(media_handler(deps_media))
        // Fallback for plain text
        .branch(text_handler(deps_text))
        // Callback query handler (inline keyboard buttons)
        .branch(callback_handler(deps_callback))
}

/// Handler for bot commands (/start, /help)
fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| async move {
            log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

            match cmd {
                Command::Start => handle_start_command(&bot, &msg).await?,
                Command::Help => handle_help_command(&bot, &msg).await?,
            }
            Ok(())
        },
    ))
}

/// Handler for messages carrying a photo or document
fn media_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.photo().is_some() || msg.document().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_media_message(bot, msg, deps).await }
        })
}

/// Fallback handler for plain text messages (anything but a known command)
fn text_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let user_id = user_key(&msg);
                let state = SessionState::from(deps.session_store.get(user_id));
                let outcome = advance(&state, &Event::SubmitText);
                deps.session_store.apply(user_id, outcome.effect);

                let reply = match outcome.step {
                    Step::AskForImage => "Жду фотографию — пришли её сообщением или файлом.",
                    _ => "Сначала выбери тип аватарки через /start",
                };
                bot.send_message(msg.chat.id, reply).await?;
                Ok(())
            }
        })
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            let result: teloxide::RequestError = match handle_menu_callback(bot, q, deps).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };
            Err(Box::new(result) as HandlerError)
        }
    })
}
