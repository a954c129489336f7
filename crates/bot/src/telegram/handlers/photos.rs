//! Photo and document handling
//!
//! The image-submission endpoint: classify the attachment, run it through
//! the state machine, and for the compose step download the bytes, resolve
//! the overlay and run the composition pipeline on a blocking thread. The
//! session is cleared on terminal outcomes (delivery, missing overlay,
//! undecodable photo) and preserved on retryable ones (wrong attachment
//! type, download hiccup).

use std::sync::Arc;

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileMeta, InputFile, Message};

use avatarka_core::{advance, compose_avatar, AppError, Event, SelectionKey, SessionState, Step};

use super::types::{user_key, HandlerDeps, HandlerError};
use crate::telegram::Bot;

/// Handles any message carrying a photo or document.
pub async fn handle_media_message(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let user_id = user_key(&msg);

    // Classify the attachment. Photos come as size variants, largest last;
    // documents count as photos when their MIME type is image/*.
    let (event, file) = if let Some(sizes) = msg.photo() {
        match sizes.last() {
            Some(largest) => (Event::SubmitPhoto, Some(largest.file.clone())),
            None => return Ok(()),
        }
    } else if let Some(doc) = msg.document() {
        let is_image = doc.mime_type.as_ref().map(|m| m.type_() == mime::IMAGE).unwrap_or(false);
        let file = is_image.then(|| doc.file.clone());
        (Event::SubmitAttachment { is_image }, file)
    } else {
        return Ok(());
    };

    let state = SessionState::from(deps.session_store.get(user_id));
    let outcome = advance(&state, &event);
    deps.session_store.apply(user_id, outcome.effect);

    match outcome.step {
        Step::RemindToStart => {
            log::debug!("Rejecting submission: {}", AppError::SelectionMissing(user_id));
            bot.send_message(msg.chat.id, "Сначала выбери тип аватарки через /start").await?;
        }
        Step::AskForImage => {
            let kind = msg
                .document()
                .and_then(|d| d.mime_type.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            log::debug!("Rejecting submission: {}", AppError::UnsupportedAttachment(kind));
            bot.send_message(msg.chat.id, "Пришли мне именно картинку — фото или файл с изображением.")
                .await?;
        }
        Step::Compose(key) => {
            // Compose only comes out of the machine for image submissions
            if let Some(file) = file {
                compose_and_send(&bot, &msg, &deps, user_id, key, file).await?;
            }
        }
        other => log::warn!("Unexpected step {:?} for media message from user {}", other, user_id),
    }

    Ok(())
}

/// Downloads the photo, composites it with the overlay for `key` and sends
/// the result back as a document.
async fn compose_and_send(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
    user_id: i64,
    key: SelectionKey,
    file: FileMeta,
) -> Result<(), HandlerError> {
    let file = bot.get_file(file.id).await?;
    log::debug!(
        "Downloading photo for user {}: path={}, size={} bytes",
        user_id,
        file.path,
        file.size
    );

    let mut photo_bytes: Vec<u8> = Vec::with_capacity(file.size as usize);
    if let Err(e) = bot.download_file(&file.path, &mut photo_bytes).await {
        // Transport hiccup: keep the session so a resend still works
        log::error!("Failed to download photo for user {}: {}", user_id, e);
        bot.send_message(msg.chat.id, "Не получилось скачать фото, попробуй отправить его ещё раз.")
            .await?;
        return Ok(());
    }

    // Resolve + compose are blocking (disk read, CPU-bound pixel work);
    // isolate them per request so a slow codec can't stall other sessions.
    let catalog = Arc::clone(&deps.catalog);
    let result = tokio::task::spawn_blocking(move || {
        let overlay = catalog.resolve(key)?;
        compose_avatar(&photo_bytes, &overlay)
    })
    .await?;

    match result {
        Ok(composite) => {
            let size = composite.bytes.len();
            let document = InputFile::memory(composite.bytes).file_name(composite.filename);
            bot.send_document(msg.chat.id, document).await?;
            deps.session_store.clear(user_id);
            log::info!("Sent {} avatar to user {} ({} bytes)", key, user_id, size);
            bot.send_message(msg.chat.id, "Готово! Хочешь ещё одну — жми /start").await?;
        }
        Err(AppError::AssetNotFound(name)) => {
            deps.session_store.clear(user_id);
            bot.send_message(msg.chat.id, format!("Оверлей {} не найден.", name)).await?;
        }
        Err(AppError::Decode(e)) => {
            log::warn!("Undecodable photo from user {}: {}", user_id, e);
            deps.session_store.clear(user_id);
            bot.send_message(
                msg.chat.id,
                "Не получилось прочитать это фото. Выбери тип через /start и пришли другое изображение.",
            )
            .await?;
        }
        Err(e) => {
            log::error!("Composition failed for user {}: {}", user_id, e);
            deps.session_store.clear(user_id);
            bot.send_message(msg.chat.id, "Что-то пошло не так. Попробуй ещё раз через /start").await?;
        }
    }

    Ok(())
}
