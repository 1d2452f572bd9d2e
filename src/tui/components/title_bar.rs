//! # TitleBar Component
//!
//! Top status bar showing application state and notifications.
//!
//! Purely presentational — it receives all data as props and has no internal
//! state. The title text shows the model name, the current status message
//! (if any), and a "↓ New" indicator when content sits below the scroll
//! position.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Current model name (e.g., "gemini-pro")
    pub model_name: String,
    /// Transient status (e.g., "Waiting for reply...")
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(model_name: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            model_name,
            status_message,
            has_unseen_content,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.has_unseen_content {
            format!(
                "Palaver (model: {}) | {} | ↓ New",
                self.model_name, self.status_message
            )
        } else if self.status_message.is_empty() {
            format!("Palaver (model: {})", self.model_name)
        } else {
            format!(
                "Palaver (model: {}) | {}",
                self.model_name, self.status_message
            )
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut title_bar: TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
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
    fn test_title_bar_with_unseen_content() {
        let text = rendered(TitleBar::new(
            "gemini-pro".to_string(),
            "Waiting for reply...".to_string(),
            true,
        ));
        assert!(text.contains("Palaver"));
        assert!(text.contains("gemini-pro"));
        assert!(text.contains("Waiting for reply..."));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let text = rendered(TitleBar::new(
            "gemini-pro".to_string(),
            "Ready".to_string(),
            false,
        ));
        assert!(text.contains("Ready"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let text = rendered(TitleBar::new("gemini-pro".to_string(), String::new(), false));
        assert!(text.contains("Palaver"));
        assert!(!text.contains('|'));
    }
}
