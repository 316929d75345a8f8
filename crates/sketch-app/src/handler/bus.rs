//! Reactions to events delivered back from the event bus

use sketch_core::Error;
use tracing::{debug, warn};

use crate::event_bus::AppEvent;
use crate::message::Message;
use crate::state::{AppState, UiMode};

use super::{UpdateAction, UpdateResult};

pub fn handle_bus_event(state: &mut AppState, event: AppEvent) -> UpdateResult {
    state.record_event(event.clone());

    match event {
        AppEvent::DrawerOpened => UpdateResult::action(UpdateAction::RefreshCacheStats),

        AppEvent::CloseDrawer => {
            state.ui_mode = UiMode::Main;
            UpdateResult::none()
        }

        AppEvent::CacheCleaned { cache } => {
            debug!("Observed cache cleaned: {}", cache);
            UpdateResult::none()
        }

        AppEvent::ChangePage { page } => {
            state.current_page = page;
            state.ui_mode = UiMode::Main;
            state.set_status(format!("Opened {}", page));
            match page.background_url() {
                Some(url) => UpdateResult::message(Message::SetBackground(url.to_string())),
                None => UpdateResult::none(),
            }
        }

        AppEvent::ChangeMainPageBg { image_url } => {
            state.background_url = Some(image_url);
            UpdateResult::none()
        }
    }
}

/// Validate a background request and publish it
pub fn handle_set_background(state: &mut AppState, raw: &str) -> UpdateResult {
    match validate_image_url(raw) {
        Ok(image_url) => state.post(AppEvent::ChangeMainPageBg { image_url }),
        Err(e) => {
            warn!("{}", e);
            state.set_error(e.to_string());
        }
    }
    UpdateResult::none()
}

fn validate_image_url(raw: &str) -> sketch_core::Result<String> {
    let url = url::Url::parse(raw.trim())
        .map_err(|e| Error::invalid_image_url(raw, e.to_string()))?;
    match url.scheme() {
        "http" | "https" | "file" => Ok(url.to_string()),
        other => Err(Error::invalid_image_url(
            raw,
            format!("unsupported scheme '{}'", other),
        )),
    }
}
