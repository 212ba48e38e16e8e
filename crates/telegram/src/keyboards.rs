//! Inline keyboard builders for interactive bot menus
//!
//! Lists render to a transport-independent [`RenderedPage`]; the helpers
//! here turn that and the other menus into Telegram inline keyboards.

use crate::actions::ItemAction;
use crate::constants::{emoji, MAX_CALLBACK_DATA_LEN};
use crate::list::RenderedPage;
use std::collections::BTreeSet;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use torrent::Indexer;

/// Token of the setup keyboard's confirm button
pub const SETUP_OK: &str = "setup:ok";
/// Prefix of the setup keyboard's tracker toggles
pub const SETUP_TRACKER_PREFIX: &str = "setup:t:";

/// Trackers per row in the setup keyboard
const SETUP_COLUMNS: usize = 2;

/// Keyboard for a rendered list page
pub fn page_markup(page: &RenderedPage) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = page
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|control| InlineKeyboardButton::callback(control.label.clone(), control.token.clone()))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Keyboard for the action menu of a selected item
pub fn actions_keyboard(rows: &[Vec<ItemAction>]) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|action| InlineKeyboardButton::callback(action.label(), action.token()))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

/// Tracker selection keyboard
///
/// Selected trackers are marked with ✅, the others with 🟩. Trackers whose
/// id does not fit into callback data are left out.
pub fn setup_keyboard(indexers: &[Indexer], selected: &BTreeSet<String>) -> InlineKeyboardMarkup {
    let toggles: Vec<InlineKeyboardButton> = indexers
        .iter()
        .filter(|indexer| SETUP_TRACKER_PREFIX.len() + indexer.id.len() <= MAX_CALLBACK_DATA_LEN)
        .map(|indexer| {
            let mark = if selected.contains(&indexer.id) {
                emoji::SELECTED
            } else {
                emoji::UNSELECTED
            };
            InlineKeyboardButton::callback(
                format!("{}{}", mark, indexer.name),
                format!("{}{}", SETUP_TRACKER_PREFIX, indexer.id),
            )
        })
        .collect();

    let mut buttons: Vec<Vec<InlineKeyboardButton>> = toggles
        .chunks(SETUP_COLUMNS)
        .map(|row| row.to_vec())
        .collect();
    buttons.push(vec![InlineKeyboardButton::callback("Ok!", SETUP_OK)]);

    InlineKeyboardMarkup::new(buttons)
}

/// Create a main menu keyboard
pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    let buttons = vec![
        vec![
            InlineKeyboardButton::callback(format!("{} Find", emoji::SEARCH), "cmd:find"),
            InlineKeyboardButton::callback(format!("{} Torrents", emoji::DOWNLOAD), "cmd:list"),
        ],
        vec![
            InlineKeyboardButton::callback(format!("{} TorrServer", emoji::STREAM), "cmd:lsts"),
            InlineKeyboardButton::callback("🔧 Trackers", "cmd:setup"),
        ],
    ];

    InlineKeyboardMarkup::new(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Control;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            _ => "",
        }
    }

    fn indexer(id: &str, name: &str) -> Indexer {
        Indexer {
            id: id.to_string(),
            name: name.to_string(),
            configured: true,
            last_error: String::new(),
        }
    }

    #[test]
    fn test_page_markup_keeps_layout() {
        let page = RenderedPage {
            text: "x".to_string(),
            rows: vec![
                vec![Control::new("1", "0"), Control::new("2", "1")],
                vec![Control::new("-", "noop")],
            ],
        };
        let markup = page_markup(&page);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[0][1].text, "2");
        assert_eq!(callback_data(&markup.inline_keyboard[0][1]), "1");
    }

    #[test]
    fn test_actions_keyboard_skips_empty_rows() {
        let markup = actions_keyboard(&[vec![ItemAction::Remove, ItemAction::Return], vec![]]);
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "act:remove");
        assert_eq!(markup.inline_keyboard[0][1].text, "⬆");
    }

    #[test]
    fn test_setup_keyboard_marks_selection() {
        let indexers = vec![indexer("rutor", "Rutor"), indexer("kinozal", "Kinozal"), indexer("nnm", "NNM")];
        let selected: BTreeSet<String> = ["kinozal".to_string()].into_iter().collect();
        let markup = setup_keyboard(&indexers, &selected);

        // Two trackers per row plus the confirm row
        assert_eq!(markup.inline_keyboard.len(), 3);
        assert_eq!(markup.inline_keyboard[0][0].text, "🟩Rutor");
        assert_eq!(markup.inline_keyboard[0][1].text, "✅Kinozal");
        assert_eq!(callback_data(&markup.inline_keyboard[1][0]), "setup:t:nnm");
        assert_eq!(callback_data(&markup.inline_keyboard[2][0]), SETUP_OK);
    }

    #[test]
    fn test_main_menu_keyboard() {
        let keyboard = main_menu_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        let tokens: Vec<_> = keyboard.inline_keyboard.iter().flatten().map(callback_data).collect();
        assert_eq!(tokens, vec!["cmd:find", "cmd:list", "cmd:lsts", "cmd:setup"]);
    }
}
