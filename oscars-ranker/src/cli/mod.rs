//! Interactive command-line surface

pub mod prompt;
pub mod renderer;

pub use prompt::{parse_menu_choice, parse_year, UserPrompt};
pub use renderer::{RankingChart, Renderer, TextBarRenderer};
