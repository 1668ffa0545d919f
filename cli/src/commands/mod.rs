mod favorites;
mod helpers;
mod history;
mod search;
mod settings;
mod timer;

pub(crate) use favorites::{cmd_favorites_list, cmd_favorites_remove, cmd_favorites_show};
pub(crate) use history::{cmd_history_clear, cmd_history_list, cmd_history_show};
pub(crate) use search::{SearchArgs, cmd_search};
pub(crate) use settings::{cmd_settings_dark_mode, cmd_settings_show};
pub(crate) use timer::cmd_timer;
