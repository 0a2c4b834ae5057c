// Shared between the ThemeSplit binary and its unit tests.
// The i18n and logger modules come first so their exported macros are in
// scope for the rest of the crate.

#[macro_use]
pub mod i18n;
#[macro_use]
pub mod logger;

pub mod app;
pub mod assets;
pub mod cli;
pub mod clipboard;
pub mod compare;
pub mod compose;
pub mod io;
pub mod slider;
pub mod slots;
