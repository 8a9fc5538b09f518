//! UI layer for desktop GUI: app shell and answer widgets.

pub mod app;
pub mod widgets;

pub use app::AskApp;
