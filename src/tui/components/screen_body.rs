//! # ScreenBody Component
//!
//! Draws whatever `ScreenContent` the visible screen describes.
//!
//! ```text
//! Form          prompt + bordered single-line input
//! List          two lines per row, selected row highlighted
//! Conversation  wrapped messages, mine right-aligned
//! Card          bold label, value
//! ```
//!
//! Row details are truncated by display width (`unicode-width`) so wide
//! glyphs never overflow the row. Messages wrap with `textwrap` at a fixed
//! share of the body width.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::screens::{ListRow, Message, ScreenContent};
use crate::tui::component::Component;

/// Messages take at most this share of the body width.
const BUBBLE_WIDTH_PERCENT: u16 = 70;

pub struct ScreenBody {
    pub content: ScreenContent,
}

impl ScreenBody {
    pub fn new(content: ScreenContent) -> Self {
        Self { content }
    }
}

impl Component for ScreenBody {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match &self.content {
            ScreenContent::Form { prompt, value } => render_form(frame, area, prompt, value),
            ScreenContent::List { rows, selected } => render_list(frame, area, rows, *selected),
            ScreenContent::Conversation { messages } => render_conversation(frame, area, messages),
            ScreenContent::Card { fields } => render_card(frame, area, fields),
        }
    }
}

fn render_form(frame: &mut Frame, area: Rect, prompt: &str, value: &str) {
    use Constraint::{Length, Min};
    let [prompt_area, input_area, _rest] =
        Layout::vertical([Length(2), Length(3), Min(0)]).areas(area);

    frame.render_widget(Paragraph::new(prompt.to_string()), prompt_area);
    let input = Paragraph::new(format!("{value}▏")).block(Block::bordered().title("Name"));
    frame.render_widget(input, input_area);
}

fn render_list(frame: &mut Frame, area: Rect, rows: &[ListRow], selected: usize) {
    // Room for the highlight symbol
    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = rows.iter().map(|row| list_item(row, width)).collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▌");
    let mut state = ListState::default().with_selected((!rows.is_empty()).then_some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn list_item(row: &ListRow, width: usize) -> ListItem<'static> {
    let mut head = Vec::new();
    if row.online {
        head.push(Span::styled("● ", Style::default().fg(Color::Green)));
    }
    head.push(Span::styled(
        row.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    if !row.trailing.is_empty() {
        head.push(Span::styled(
            format!("  {}", row.trailing),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(count) = row.badge {
        head.push(Span::styled(
            format!("  ({count})"),
            Style::default().fg(Color::Cyan),
        ));
    }

    let detail = truncate_to_width(&row.detail, width);
    ListItem::new(vec![
        Line::from(head),
        Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
    ])
}

fn render_conversation(frame: &mut Frame, area: Rect, messages: &[Message]) {
    let bubble_width = (area.width * BUBBLE_WIDTH_PERCENT / 100).max(1);
    let mut lines = Vec::new();
    for message in messages {
        let (alignment, style) = if message.sent_by_me {
            (Alignment::Right, Style::default().fg(Color::Cyan))
        } else {
            (Alignment::Left, Style::default())
        };
        for wrapped in wrap_message(&message.text, bubble_width) {
            lines.push(Line::from(Span::styled(wrapped, style)).alignment(alignment));
        }
        lines.push(Line::default());
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_card(frame: &mut Frame, area: Rect, fields: &[(String, String)]) {
    let lines: Vec<Line> = fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(value.clone()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), area);
}

/// Cut `text` to at most `width` display columns, ending in `…` when cut.
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Wrap a message body to `width` columns. Never returns zero lines.
pub(crate) fn wrap_message(text: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}
