// src/config/state.rs
use super::options::{IsoOptions, Method, method3_defaults};
use crate::core::form::FormData;

/// One row of the GUI's override editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideRow {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Override editor rows; pre-filled with the method-3 defaults
    pub override_rows: Vec<OverrideRow>,

    /// Captions from the last "List" request (index + 1 = selection)
    pub distortions: Vec<String>,

    /// Fields table -> wrap long values
    pub wrap_values: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1100,
            window_h: 700,
            override_rows: method3_defaults()
                .iter()
                .map(|(k, v)| OverrideRow { key: s!(k), value: s!(v) })
                .collect(),
            distortions: Vec::new(),
            wrap_values: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: IsoOptions,
    pub gui: GuiState,
}

impl AppState {
    /// Copy the editor rows into `options.overrides` (blank keys skipped).
    /// The editor belongs to method 3; method 4 sends none of its rows.
    pub fn sync_overrides(&mut self) {
        if self.options.method == Method::Decomposition {
            self.options.overrides = FormData::new();
            return;
        }
        self.options.overrides = self
            .gui
            .override_rows
            .iter()
            .filter(|r| !r.key.trim().is_empty())
            .map(|r| (r.key.trim(), r.value.as_str()))
            .collect();
    }
}
