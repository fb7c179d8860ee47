// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Login form text (the password is never stored here)
    pub username: String,

    pub window_w: u32,
    pub window_h: u32,

    /// Hide gap and revisit marker rows in the table view
    pub hide_gaps: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            username: s!(),
            window_w: 900,
            window_h: 700,
            hide_gaps: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
