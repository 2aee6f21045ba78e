//! # TUI Host
//!
//! The ratatui-specific layer. Owns the terminal, draws the presentation tree
//! the navigation core maintains, and forwards keys to whichever screen is
//! visible.
//!
//! This is the only module that knows about ratatui and crossterm. Screens
//! never see a key event, only `ScreenInput`; flows never see the terminal.
//!
//! ## Frame Loop
//!
//! ```text
//! draw (if needed) → poll keys → forward to visible screen / switch tab
//!        ▲                                        │
//!        └──── coordinator.process_pending() ◀────┘  (steps screens emitted)
//! ```
//!
//! Redraws happen only after input, resize, or routed steps. The poll timeout
//! bounds how long a step emitted from a background task waits to be routed.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::config::ResolvedConfig;
use crate::flows::{AppContext, AppFlow, Zyna, initial_step};
use crate::nav::{FlowCoordinator, Presentable};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Harmlessly ignored by terminals without the Kitty protocol
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let ctx = AppContext::from_config(&config);
    let first_step = initial_step(&ctx, config.remember_session);

    let mut coordinator: FlowCoordinator<Zyna> = FlowCoordinator::new();
    coordinator
        .start(AppFlow::new(ctx), first_step)
        .map_err(io::Error::other)?;

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            let root = coordinator.root();
            terminal.draw(|f| ui::draw_ui(f, root.as_ref()))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(POLL_TIMEOUT);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(root) = coordinator.root() else {
                continue;
            };
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit => should_quit = true,
                TuiEvent::NextTab => {
                    switch_tab(&root, 1);
                }
                TuiEvent::PrevTab => {
                    switch_tab(&root, -1);
                }
                other => {
                    if let (Some(input), Some(screen)) =
                        (other.as_screen_input(), root.visible_screen())
                    {
                        screen.view().handle_input(input);
                    }
                }
            }
            // Route between events so the next key sees the updated tree
            coordinator.process_pending();
        }

        if should_quit {
            break;
        }

        // Steps emitted outside input handling (e.g. from spawned tasks)
        let routed = coordinator.process_pending();
        if routed > 0 {
            debug!("Routed {} background step(s)", routed);
            needs_redraw = true;
        }
    }

    info!(
        "Shutting down with {} live flow(s), {} registration(s)",
        coordinator.flow_count(),
        coordinator.registry_len()
    );
    ratatui::restore();
    Ok(())
}

/// Move the selection of the innermost visible tab root by `delta`, wrapping
/// around. Returns false when no tab root is visible.
fn switch_tab(root: &Presentable<Zyna>, delta: isize) -> bool {
    let Some(tabs) = ui::innermost_tabs(&root.visible_chain()) else {
        return false;
    };
    let (Some(current), len) = (tabs.selected_index(), tabs.len()) else {
        return false;
    };
    let next = (current as isize + delta).rem_euclid(len as isize) as usize;
    debug!("Switching tab {} -> {}", current, next);
    tabs.select(next)
}
