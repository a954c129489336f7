//! Inline keyboard menus and callback routing
//!
//! The category and region keyboards, and the callback handler that turns
//! button presses into state-machine events. Callback data uses structured
//! prefixes (`avatar:<category>`, `region:<region>`); parsing happens at
//! this boundary and anything unparseable is logged and dropped.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use avatarka_core::{advance, Category, Event, Region, SessionState, Step};

use crate::telegram::handlers::HandlerDeps;
use crate::telegram::Bot;

/// Top-level category menu shown by /start
pub fn category_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🛌 Day Off", "avatar:day_off")],
        vec![InlineKeyboardButton::callback("🏖 Vacation", "avatar:vacation")],
        vec![InlineKeyboardButton::callback("💼 Business Trip", "avatar:business_trip")],
    ])
}

/// Time-zone sub-menu for the business-trip category
pub fn region_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🌍 UTC", "region:utc")],
        vec![InlineKeyboardButton::callback("🇦🇪 Dubai (+4)", "region:dubai")],
        vec![InlineKeyboardButton::callback("🇷🇺 Moscow (+3)", "region:moscow")],
        vec![InlineKeyboardButton::callback("🇺🇸 New York (-4)", "region:ny")],
    ])
}

/// Parses callback data into a state-machine event.
pub fn parse_callback(data: &str) -> Option<Event> {
    if let Some(category) = data.strip_prefix("avatar:") {
        Category::parse(category).map(Event::ChooseCategory)
    } else if let Some(region) = data.strip_prefix("region:") {
        Region::parse(region).map(Event::ChooseRegion)
    } else {
        None
    }
}

/// Handles callback queries from the menu inline keyboards.
///
/// Answers the query first, then feeds the parsed event through the state
/// machine and sends the reply its step calls for.
pub async fn handle_menu_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> ResponseResult<()> {
    let callback_id = q.id.clone();
    let Some(data) = q.data else {
        return Ok(());
    };

    let user_id = i64::try_from(q.from.id.0).ok().unwrap_or(0);
    let chat_id = q.message.as_ref().map(|m| m.chat().id).unwrap_or(ChatId(user_id));

    let _ = bot.answer_callback_query(callback_id).await;

    let Some(event) = parse_callback(&data) else {
        log::warn!("Unknown callback data from user {}: {}", user_id, data);
        return Ok(());
    };

    let state = SessionState::from(deps.session_store.get(user_id));
    let outcome = advance(&state, &event);
    deps.session_store.apply(user_id, outcome.effect);

    match outcome.step {
        Step::ShowRegionMenu => {
            bot.send_message(chat_id, "Выбери часовой пояс:")
                .reply_markup(region_keyboard())
                .await?;
        }
        Step::PromptForPhoto(key) => {
            log::info!("User {} selected {}", user_id, key);
            bot.send_message(chat_id, "Отправь мне свою фотографию").await?;
        }
        // Menu events never produce the photo-path steps
        other => log::warn!("Unexpected step {:?} for callback data {}", other, data),
    }

    Ok(())
}
