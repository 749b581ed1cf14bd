//! Terminal UI: the board view, keyboard handling, and the fireworks overlay
//! played when a game is won.

mod app;
mod celebration;
mod game_view;

pub use app::App;
