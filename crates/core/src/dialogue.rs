//! Selection state machine
//!
//! Explicit transition table for the avatar conversation. The transport layer
//! translates Telegram updates into [`Event`]s, feeds them through
//! [`advance`] together with the user's current [`SessionState`], applies the
//! returned [`SessionEffect`] to the store, and sends whatever reply the
//! [`Step`] calls for. The machine itself never touches the store, the
//! catalog, or the network; it is a pure function and is tested as one.
//!
//! The region sub-menu is deliberately stateless: the region keyboard's
//! callback payload already names the region, so pressing "business trip"
//! only shows the menu and leaves any previously stored selection untouched.
//! Only a region press (or a plain category press) writes to the store.

use crate::selection::{Category, Region, SelectionKey};

/// Where a user currently is in the conversation
///
/// `Idle` is represented in the store by the absence of an entry; a stored
/// selection means the user is awaiting-photo for that key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingPhoto(SelectionKey),
}

impl From<Option<SelectionKey>> for SessionState {
    fn from(stored: Option<SelectionKey>) -> Self {
        match stored {
            Some(key) => SessionState::AwaitingPhoto(key),
            None => SessionState::Idle,
        }
    }
}

/// An inbound event, already parsed at the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A category button was pressed
    ChooseCategory(Category),
    /// A region button was pressed
    ChooseRegion(Region),
    /// A photo (or image-typed document) arrived
    SubmitPhoto,
    /// A document arrived; `is_image` reflects its MIME type
    SubmitAttachment { is_image: bool },
    /// A plain text message arrived
    SubmitText,
}

/// What to do with the user's store entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    Keep,
    Store(SelectionKey),
    Clear,
}

/// The reply the transport must produce for this transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Show the region sub-menu (business trip pressed)
    ShowRegionMenu,
    /// Selection stored; ask for the photo
    PromptForPhoto(SelectionKey),
    /// Run the composition pipeline with the stored selection
    Compose(SelectionKey),
    /// Nothing selected yet; point the user at /start
    RemindToStart,
    /// A selection is pending but the input was not an image; ask again
    AskForImage,
}

/// Result of one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub effect: SessionEffect,
    pub step: Step,
}

impl Outcome {
    fn new(effect: SessionEffect, step: Step) -> Self {
        Self { effect, step }
    }
}

/// Advances the conversation by one event.
///
/// Note that `SubmitPhoto` on an awaiting session returns `Keep`, not
/// `Clear`: whether the session survives is decided by the composite's
/// outcome (cleared on success and on hard failures like a missing overlay
/// or undecodable photo, preserved when the user can simply retry).
pub fn advance(state: &SessionState, event: &Event) -> Outcome {
    match (state, event) {
        // Category choice always restarts the flow, whatever was stored.
        (_, Event::ChooseCategory(Category::DayOff)) => {
            let key = SelectionKey::DayOff;
            Outcome::new(SessionEffect::Store(key), Step::PromptForPhoto(key))
        }
        (_, Event::ChooseCategory(Category::Vacation)) => {
            let key = SelectionKey::Vacation;
            Outcome::new(SessionEffect::Store(key), Step::PromptForPhoto(key))
        }
        // Business trip needs a region first; nothing is stored until then.
        (_, Event::ChooseCategory(Category::BusinessTrip)) => Outcome::new(SessionEffect::Keep, Step::ShowRegionMenu),

        // The region menu is idempotent; a press is valid from any state.
        (_, Event::ChooseRegion(region)) => {
            let key = SelectionKey::BusinessTrip(*region);
            Outcome::new(SessionEffect::Store(key), Step::PromptForPhoto(key))
        }

        (SessionState::AwaitingPhoto(key), Event::SubmitPhoto) => Outcome::new(SessionEffect::Keep, Step::Compose(*key)),
        (SessionState::Idle, Event::SubmitPhoto) => Outcome::new(SessionEffect::Keep, Step::RemindToStart),

        (SessionState::AwaitingPhoto(key), Event::SubmitAttachment { is_image: true }) => {
            Outcome::new(SessionEffect::Keep, Step::Compose(*key))
        }
        (SessionState::AwaitingPhoto(_), Event::SubmitAttachment { is_image: false }) => {
            Outcome::new(SessionEffect::Keep, Step::AskForImage)
        }
        (SessionState::Idle, Event::SubmitAttachment { .. }) => Outcome::new(SessionEffect::Keep, Step::RemindToStart),

        (SessionState::AwaitingPhoto(_), Event::SubmitText) => Outcome::new(SessionEffect::Keep, Step::AskForImage),
        (SessionState::Idle, Event::SubmitText) => Outcome::new(SessionEffect::Keep, Step::RemindToStart),
    }
}
