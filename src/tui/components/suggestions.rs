//! # SuggestionBar Component
//!
//! A row of shortcut chips above the input box — the quick prompts from the
//! original widget ("AI in daily life", "Explain ML simply", ...).
//! Activating a chip behaves exactly as if the user had typed its label and
//! submitted it.
//!
//! Tab cycles the selection across the chips and back to none; Enter
//! activates the selected chip. Typing clears the selection so Enter goes
//! back to submitting the input box.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::config::Suggestion;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Event emitted when a chip is activated: the index into the suggestion
/// list whose label should be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEvent {
    Activated(usize),
}

/// Persistent chip-selection state.
pub struct SuggestionBarState {
    pub selected: Option<usize>,
    /// Number of chips, refreshed on every render (needed to wrap Tab).
    count: usize,
}

impl Default for SuggestionBarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionBarState {
    pub fn new() -> Self {
        Self {
            selected: None,
            count: 0,
        }
    }

    /// Advance the selection: none → first → ... → last → none.
    fn cycle(&mut self) {
        self.selected = match self.selected {
            None if self.count > 0 => Some(0),
            Some(i) if i + 1 < self.count => Some(i + 1),
            _ => None,
        };
    }
}

impl EventHandler for SuggestionBarState {
    type Event = SuggestionEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CycleSuggestion => {
                self.cycle();
                None
            }
            TuiEvent::Submit => self.selected.take().map(SuggestionEvent::Activated),
            // Typing or pasting dismisses the chip selection
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                self.selected = None;
                None
            }
            _ => None,
        }
    }
}

/// Transient render component wrapping the persistent state and the
/// configured chips.
pub struct SuggestionBar<'a> {
    pub state: &'a mut SuggestionBarState,
    pub suggestions: &'a [Suggestion],
}

impl Component for SuggestionBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.count = self.suggestions.len();
        if let Some(i) = self.state.selected
            && i >= self.suggestions.len()
        {
            self.state.selected = None;
        }

        let mut spans: Vec<Span> = Vec::new();
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            let style = if self.state.selected == Some(i) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!("{} {}", suggestion.icon, suggestion.label),
                style,
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
