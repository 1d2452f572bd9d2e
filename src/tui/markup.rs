//! Reply markup → ratatui `Text` renderer.
//!
//! Bot replies carry a small inline markup: `**bold**`, `*italic*`,
//! `` `code` ``, and literal newlines. This module converts that into
//! styled `Line`/`Span` values via four substitution passes applied in a
//! fixed order: bold → italic → code → newline. Order matters — the italic
//! delimiter is a lexical subset of the bold one, so bold must be carved
//! out first. Text captured by an earlier pass is never rescanned by a
//! later one.
//!
//! User-authored messages never pass through here; they render as plain
//! uninterpreted text.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use regex::Regex;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic pattern"));
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("valid code pattern"));

/// Inline style classes, in the order their passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Plain,
    Strong,
    Emphasis,
    Code,
}

/// A run of text with one resolved style.
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    kind: Kind,
    text: String,
}

/// Parse reply markup into styled `Text` using Palaver's color scheme.
///
/// Returns owned text (`'static`) so callers aren't constrained by input
/// lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut segments = vec![Segment {
        kind: Kind::Plain,
        text: content.to_string(),
    }];
    segments = apply_pass(segments, &BOLD_RE, Kind::Strong);
    segments = apply_pass(segments, &ITALIC_RE, Kind::Emphasis);
    segments = apply_pass(segments, &CODE_RE, Kind::Code);

    assemble(segments, base_fg)
}

/// Run one delimiter pass over the still-plain segments. Styled segments
/// from earlier passes pass through untouched.
fn apply_pass(segments: Vec<Segment>, re: &Regex, kind: Kind) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.kind != Kind::Plain {
            out.push(segment);
            continue;
        }

        let mut last_end = 0;
        for caps in re.captures_iter(&segment.text) {
            let whole = caps.get(0).expect("match always has group 0");
            if whole.start() > last_end {
                out.push(Segment {
                    kind: Kind::Plain,
                    text: segment.text[last_end..whole.start()].to_string(),
                });
            }
            out.push(Segment {
                kind,
                text: caps[1].to_string(),
            });
            last_end = whole.end();
        }
        if last_end < segment.text.len() {
            out.push(Segment {
                kind: Kind::Plain,
                text: segment.text[last_end..].to_string(),
            });
        }
    }
    out
}

/// The newline pass: split segments on `\n` while folding the rest into
/// styled spans, line by line.
fn assemble(segments: Vec<Segment>, base_fg: Color) -> Text<'static> {
    let mut text = Text::default();
    text.lines.push(Line::default());

    for segment in segments {
        let style = segment_style(segment.kind, base_fg);
        for (i, piece) in segment.text.split('\n').enumerate() {
            if i > 0 {
                text.lines.push(Line::default());
            }
            if piece.is_empty() {
                continue;
            }
            text.lines
                .last_mut()
                .expect("at least one line")
                .push_span(Span::styled(piece.to_string(), style));
        }
    }

    text
}

fn segment_style(kind: Kind, base_fg: Color) -> Style {
    match kind {
        Kind::Plain => Style::default().fg(base_fg),
        Kind::Strong => Style::default().fg(base_fg).add_modifier(Modifier::BOLD),
        Kind::Emphasis => Style::default().fg(base_fg).add_modifier(Modifier::ITALIC),
        Kind::Code => Style::default().fg(Color::White).bg(Color::DarkGray),
    }
}
