use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

use crate::flows::Zyna;
use crate::nav::{Presentable, TabBar};
use crate::tui::component::Component;
use crate::tui::components::{ScreenBody, TabStrip, TitleBar};

/// Draw the presentation tree rooted at `root`.
///
/// ```text
/// ┌ title bar ───────────────┐  1 line
/// │ tab strip                │  1 line, only inside a tab root
/// │ screen body              │  rest
/// └ key hints ───────────────┘  1 line
/// ```
pub fn draw_ui(frame: &mut Frame, root: Option<&Presentable<Zyna>>) {
    let Some(screen) = root.and_then(Presentable::visible_screen) else {
        draw_empty_view(frame, frame.area());
        return;
    };
    let chain = root.map(Presentable::visible_chain).unwrap_or_default();
    let tabs = innermost_tabs(&chain);

    use Constraint::{Length, Min};
    let tab_height = if tabs.is_some() { 1 } else { 0 };
    let layout = Layout::vertical([Length(1), Length(tab_height), Min(0), Length(1)]);
    let [title_area, tab_area, body_area, hint_area] = layout.areas(frame.area());

    let view = screen.view();
    TitleBar::new(view.title(), can_go_back(&chain)).render(frame, title_area);
    if let Some(tabs) = tabs {
        let items = tabs.tabs().into_iter().map(|tab| tab.item).collect();
        TabStrip::new(items, tabs.selected_index()).render(frame, tab_area);
    }
    ScreenBody::new(view.content()).render(frame, body_area);

    let hints = format!("{} Ctrl+C Quit ", view.hints());
    frame.render_widget(
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
        hint_area,
    );
}

fn draw_empty_view(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Nothing to show")
        .block(Block::bordered().title("Zyna"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// The deepest tab root on the visible path, if any.
pub fn innermost_tabs(chain: &[Presentable<Zyna>]) -> Option<TabBar<Zyna>> {
    chain.iter().rev().find_map(|presentable| match presentable {
        Presentable::Tabs(tabs) => Some(tabs.clone()),
        _ => None,
    })
}

/// Whether Esc would pop something: the deepest visible stack holds more
/// than its root.
fn can_go_back(chain: &[Presentable<Zyna>]) -> bool {
    chain
        .iter()
        .rev()
        .find_map(|presentable| match presentable {
            Presentable::Stack(stack) => Some(stack.len() > 1),
            _ => None,
        })
        .unwrap_or(false)
}
