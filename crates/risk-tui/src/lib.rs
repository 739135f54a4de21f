// Library root: exposes the orchestrator, protocol and TUI so the binary and
// integration tests share one module tree.

pub mod app;
pub mod protocol;
pub mod tui;
