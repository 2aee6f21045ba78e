use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;

use crate::nav::TabItem;
use crate::tui::component::Component;

/// One-line strip with the tab root's entries, selected one highlighted.
pub struct TabStrip {
    pub items: Vec<TabItem>,
    pub selected: Option<usize>,
}

impl TabStrip {
    pub fn new(items: Vec<TabItem>, selected: Option<usize>) -> Self {
        Self { items, selected }
    }

    fn labels(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| format!("{} {}", item.icon, item.title))
            .collect()
    }
}

impl Component for TabStrip {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut tabs = Tabs::new(self.labels())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        if let Some(index) = self.selected {
            tabs = tabs.select(index);
        }
        frame.render_widget(tabs, area);
    }
}
