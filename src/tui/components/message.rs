use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::conversation::{Message, Sender};
use crate::tui::markup;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single transcript message with
/// sender-based styling.
///
/// `MessageView` is a **transient component**: it's created fresh each frame
/// with the data it needs to render, and holds no mutable state.
///
/// # Styling
///
/// - **User** (green): rendered as plain, uninterpreted text — user input
///   never goes through the markup formatter.
/// - **Bot** (blue): rendered through [`markup::render`], so `**bold**`,
///   `*italic*`, `` `code` `` and newlines come out styled.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn role(&self) -> &'static str {
        match self.message.sender {
            Sender::User => "you",
            Sender::Bot => "palaver",
        }
    }

    fn base_style(&self) -> Style {
        match self.message.sender {
            Sender::User => Style::default().fg(Color::Green),
            Sender::Bot => Style::default().fg(Color::Blue),
        }
    }

    /// The styled body: formatted for bot messages, verbatim for user ones.
    fn body(&self) -> Text<'static> {
        match self.message.sender {
            Sender::User => Text::raw(self.message.text.clone()),
            Sender::Bot => markup::render(&self.message.text, Color::Blue),
        }
    }

    fn paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.body())
            .style(self.base_style())
            .wrap(Wrap { trim: false })
    }

    /// Calculate the height required for this message given a width.
    ///
    /// Uses `Paragraph::line_count` on the already-styled body so markup
    /// (whose delimiters vanish at render time) is measured exactly as it
    /// will be drawn. This lets the parent `MessageList` size its scroll
    /// canvas without rendering.
    pub fn height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        self.paragraph().line_count(content_width) as u16 + VERTICAL_OVERHEAD
    }
}

impl Widget for MessageView<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = self.base_style().add_modifier(Modifier::DIM);
        let timestamp = self.message.at.format("%H:%M").to_string();

        let block = Block::bordered()
            .title(self.role())
            .title_top(Line::from(timestamp).right_aligned())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        self.paragraph().render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn make_message(sender: Sender, text: &str) -> Message {
        Message {
            sender,
            text: text.to_string(),
            at: Local::now(),
        }
    }

    #[test]
    fn role_labels() {
        let user = make_message(Sender::User, "hi");
        let bot = make_message(Sender::Bot, "hello");
        assert_eq!(MessageView::new(&user).role(), "you");
        assert_eq!(MessageView::new(&bot).role(), "palaver");
    }

    #[test]
    fn user_is_green_bot_is_blue() {
        let user = make_message(Sender::User, "hi");
        let bot = make_message(Sender::Bot, "hello");
        assert_eq!(MessageView::new(&user).base_style().fg, Some(Color::Green));
        assert_eq!(MessageView::new(&bot).base_style().fg, Some(Color::Blue));
    }

    #[test]
    fn user_markup_stays_literal() {
        let user = make_message(Sender::User, "**not bold**");
        let body = MessageView::new(&user).body();
        let rendered: String = body
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.as_ref())
            .collect();
        // The formatter is bypassed: delimiters survive verbatim
        assert_eq!(rendered, "**not bold**");
    }

    #[test]
    fn bot_markup_is_interpreted() {
        let bot = make_message(Sender::Bot, "**bold**");
        let body = MessageView::new(&bot).body();
        let span = &body.lines[0].spans[0];
        assert_eq!(span.content, "bold");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn height_single_line() {
        let msg = make_message(Sender::User, "Hello");
        assert_eq!(MessageView::new(&msg).height(80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn height_counts_explicit_newlines() {
        let msg = make_message(Sender::Bot, "a\nb\nc");
        assert_eq!(MessageView::new(&msg).height(80), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn height_zero_width_returns_minimum() {
        let msg = make_message(Sender::User, "Hello world");
        assert_eq!(MessageView::new(&msg).height(0), 1);
        assert_eq!(MessageView::new(&msg).height(HORIZONTAL_OVERHEAD), 1);
    }
}
