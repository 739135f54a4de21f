// TUI widget modules for each dashboard panel.

pub mod moves;
pub mod mvp;
pub mod odds;
pub mod quit_confirm;
pub mod selector;
pub mod status_bar;
pub mod teams;
