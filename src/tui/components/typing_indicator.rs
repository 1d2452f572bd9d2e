//! The animated placeholder shown in the transcript while a reply is in
//! flight. Appended after the last message, removed the moment the turn
//! settles — success or failure.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

/// Fixed height: one line of dots plus the borders.
pub const TYPING_INDICATOR_HEIGHT: u16 = 3;

const DOT_FRAMES: [&str; 3] = ["·", "· ·", "· · ·"];

#[derive(Clone, Copy)]
pub struct TypingIndicator {
    /// Animation counter from the event loop; advances ~12x per second.
    pub spinner_frame: usize,
    /// Seconds since the turn started.
    pub elapsed_secs: u64,
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);

        let block = Block::bordered()
            .title("palaver")
            .title_top(Line::from(format!("{}s", self.elapsed_secs)).right_aligned())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(style)
            .title_style(style)
            .padding(Padding::horizontal(1));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let dots = DOT_FRAMES[(self.spinner_frame / 2) % DOT_FRAMES.len()];
        Paragraph::new(dots).style(style).render(inner_area, buf);
    }
}
