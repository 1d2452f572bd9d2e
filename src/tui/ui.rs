//! Top-level frame layout: title bar, transcript, suggestion chips, input.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, SuggestionBar, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    // The input box grows with its content (clamped internally), like the
    // original's auto-resizing entry field.
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(1), Length(input_height)]);
    let [title_area, transcript_area, suggestion_area, input_area] = layout.areas(frame.area());

    // Transcript first: it refreshes the unseen-content flag the title reads.
    MessageList::new(&mut tui.message_list, &app.conversation, spinner_frame)
        .render(frame, transcript_area);

    TitleBar::new(
        app.model_name.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content,
    )
    .render(frame, title_area);

    SuggestionBar {
        state: &mut tui.suggestions,
        suggestions: &app.suggestions,
    }
    .render(frame, suggestion_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_smoke() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);

        assert!(text.contains("Palaver"));
        assert!(text.contains("test-model"));
        // Welcome message and at least one suggestion chip are visible
        assert!(text.contains("Hello! I'm your AI assistant."));
        assert!(text.contains("AI in daily life"));
        assert!(text.contains("Input"));
    }

    #[test]
    fn test_full_turn_renders_both_messages() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        update(&mut app, Action::Submit("What is Rust?".to_string()));
        let mid_turn = draw(&app, &mut tui);
        assert!(mid_turn.contains("What is Rust?"));
        assert!(mid_turn.contains('·'), "typing indicator while awaiting");

        update(
            &mut app,
            Action::ReplyArrived(Ok(Some("A systems language.".to_string()))),
        );
        let done = draw(&app, &mut tui);
        assert!(done.contains("A systems language."));
        assert!(!done.contains('·'), "typing indicator cleared");
    }
}
