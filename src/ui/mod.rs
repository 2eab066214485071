//! Text front-end: the menu loop, its input port and the renderers.

mod helpers;
pub mod input;
pub mod interrupt;
pub mod menu;
pub mod render;

pub use input::{LineSource, PromptError, ScriptedInput, StdinInput, TerminalInput};
pub use menu::{Menu, MenuChoice, Outcome};
