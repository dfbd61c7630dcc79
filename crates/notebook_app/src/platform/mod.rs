mod app;
mod config;
mod editor;
mod render;

pub use app::run_app;
