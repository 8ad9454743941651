pub mod app;
pub mod errors;
pub mod format;
pub mod location;
pub mod snapshot;
pub mod source;
pub mod terminal_ui;
pub mod view;
pub mod widgets;

pub mod terminal {
    use crossterm::{
        cursor::{Hide, Show},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use std::io::stdout;

    /// Owns the terminal for as long as it lives. Dropping it restores the
    /// primary screen, cursor and cooked mode, whichever way `main` exits.
    pub struct AlternateScreen;

    impl AlternateScreen {
        pub fn new() -> std::io::Result<Self> {
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            let screen = Self;
            enable_raw_mode()?;
            Ok(screen)
        }
    }

    impl Drop for AlternateScreen {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        }
    }
}
