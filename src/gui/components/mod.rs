// src/gui/components/mod.rs
pub mod action_buttons;
pub mod fields_table;
pub mod options_panel;
