//! Command handlers (/start, /help)

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::HandlerError;
use crate::telegram::menu::category_keyboard;
use crate::telegram::Bot;

/// Handles /start: shows the category menu.
pub async fn handle_start_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, "Выбери тип аватарки:")
        .reply_markup(category_keyboard())
        .await?;
    Ok(())
}

/// Handles /help.
pub async fn handle_help_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    bot.send_message(
        msg.chat.id,
        "Я делаю статусные аватарки: выбери тип через /start, пришли фотографию — \
         и получишь её с наложенной рамкой файлом avatar.png.",
    )
    .await?;
    Ok(())
}
