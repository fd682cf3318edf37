// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{list,run}.

mod list;  // src/gui/actions/list.rs
mod run;   // src/gui/actions/run.rs

pub use list::list;
pub use run::run;

use crate::gui::app::App;

/// Options from the UI fields, checked before any worker starts.
/// On failure the status line says why and `false` comes back.
pub(super) fn prepare(app: &mut App) -> bool {
    if app.running {
        return false;
    }
    let checked = app.sync_options().and_then(|_| app.state.options.validate());
    match checked {
        Ok(()) => true,
        Err(e) => {
            logw!("UI: Options rejected: {e}");
            app.status(format!("Error: {e}"));
            false
        }
    }
}
