//! # TUI Components
//!
//! Stateless, props-based components. Each receives everything it draws as
//! struct fields and renders into the `Rect` it is given.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (top bar: app name, screen title, back hint)
//! ├── tab_strip.rs    (tab titles and icons of the visible tab root)
//! └── screen_body.rs  (draws a screen's `ScreenContent`)
//! ```

mod screen_body;
mod tab_strip;
mod title_bar;

pub use screen_body::ScreenBody;
pub use tab_strip::TabStrip;
pub use title_bar::TitleBar;
