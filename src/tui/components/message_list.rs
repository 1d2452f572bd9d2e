//! # MessageList Component
//!
//! Scrollable view of the conversation transcript.
//!
//! ## Responsibilities
//!
//! - Display the messages in insertion order (append-only log)
//! - Show the typing indicator below the last message while a reply is awaited
//! - Stick to the bottom on new content unless the user has scrolled away
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state) and the
//! `Conversation` (props). Since `Component::render` takes `&mut self`, the
//! scroll state can be mutated during the render pass, aligning with
//! Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::Conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::components::typing_indicator::{TYPING_INDICATOR_HEIGHT, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Scroll state for the message list. Must be persisted in the parent
/// TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Whether content exists below the current scroll position
    pub has_unseen_content: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            has_unseen_content: false,
            viewport_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    /// Prevents overscrolling past the last message.
    fn clamp_scroll(&mut self, total_content_height: u16) {
        let max_y = total_content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    fn repin_if_at_bottom(&mut self) {
        // The next render pass re-clamps; reaching or passing the end of the
        // content re-pins.
        self.stick_to_bottom = !self.has_unseen_content;
    }
}

/// Scrollable transcript component. Created fresh each frame with references
/// to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub conversation: &'a Conversation,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        conversation: &'a Conversation,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            conversation,
            spinner_frame,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        // 1. Measure every message at the current width
        let views: Vec<MessageView> = self
            .conversation
            .messages
            .iter()
            .map(MessageView::new)
            .collect();
        let heights: Vec<u16> = views.iter().map(|v| v.height(content_width)).collect();

        let pending = self.conversation.pending.as_ref();
        let mut total_height: u16 = heights.iter().sum();
        if pending.is_some() {
            total_height += TYPING_INDICATOR_HEIGHT;
        }

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll(total_height);
        }

        // 3. Render everything into a ScrollView sized to the full transcript
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (view, height) in views.iter().zip(&heights) {
            let rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(*view, rect);
            y_offset += height;
        }

        if let Some(marker) = pending {
            let rect = Rect::new(0, y_offset, content_width, TYPING_INDICATOR_HEIGHT);
            scroll_view.render_widget(
                TypingIndicator {
                    spinner_frame: self.spinner_frame,
                    elapsed_secs: marker.since.elapsed().as_secs(),
                },
                rect,
            );
        }

        // Auto-scroll to the newest entry unless the user scrolled away
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 4. Update the unseen-content indicator
        let current_offset = self.state.scroll_state.offset().y;
        if total_height <= area.height {
            self.state.has_unseen_content = false;
        } else {
            let max_scroll = total_height.saturating_sub(area.height);
            self.state.has_unseen_content = current_offset < max_scroll;
        }
    }
}

/// EventHandler is implemented on `MessageListState` rather than
/// `MessageList` because event handling needs the persistent scroll state,
/// while `MessageList` is recreated each frame with fresh props.
impl EventHandler for MessageListState {
    type Event = (); // MessageList emits no events (scroll handled internally)

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(conversation: &Conversation, state: &mut MessageListState) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(state, conversation, 0).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_transcript_messages() {
        let mut convo = Conversation::new("Welcome!");
        convo.push_user("A question".to_string());
        convo.push_bot("An answer".to_string());
        let mut state = MessageListState::new();

        let text = draw(&convo, &mut state);
        assert!(text.contains("Welcome!"));
        assert!(text.contains("A question"));
        assert!(text.contains("An answer"));
    }

    #[test]
    fn typing_indicator_appears_while_awaiting() {
        let mut convo = Conversation::new("Welcome!");
        convo.push_user("hi".to_string());
        convo.begin_awaiting();
        let mut state = MessageListState::new();

        let text = draw(&convo, &mut state);
        assert!(text.contains('·'));
    }

    #[test]
    fn typing_indicator_gone_after_settle() {
        let mut convo = Conversation::new("Welcome!");
        convo.push_user("hi".to_string());
        convo.begin_awaiting();
        convo.settle();
        convo.push_bot("done".to_string());
        let mut state = MessageListState::new();

        let text = draw(&convo, &mut state);
        assert!(!text.contains('·'));
        assert!(text.contains("done"));
    }

    #[test]
    fn scroll_up_unpins_from_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn scroll_to_bottom_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }
}
