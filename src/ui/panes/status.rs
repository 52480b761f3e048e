//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Playback state shown at the right end of the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Start,
    Playing,
    End,
    Input,
    None,
}

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    position: usize,
    total: usize,
    indicator: Indicator,
    takes_operand: bool,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let bar_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let left_spans = vec![
        Span::styled(
            format!(" Event {}/{} ", position, total),
            Style::default()
                .bg(if indicator == Indicator::Input {
                    DEFAULT_THEME.secondary
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", bar_bg.fg(DEFAULT_THEME.comment)),
        Span::styled(format!(" {} ", message), bar_bg.fg(DEFAULT_THEME.fg)),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_bg)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_bg.fg(DEFAULT_THEME.fg);
    let sep_style = bar_bg.fg(DEFAULT_THEME.comment);

    let mut bindings = vec![
        ("←/→", "step"),
        ("⎵", "play"),
        ("↵/⌫", "end/start"),
        ("+/-", "speed"),
        ("⇥", "algorithm"),
        ("r", "random"),
    ];
    if indicator == Indicator::Input {
        bindings = vec![("↵", "run"), ("esc", "cancel")];
    } else {
        bindings.push(("o", if takes_operand { "value" } else { "run" }));
    }
    bindings.push(("q", "quit"));

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let badge = match indicator {
        Indicator::Start => Some((" START ", DEFAULT_THEME.success)),
        Indicator::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        Indicator::End => Some((" END ", DEFAULT_THEME.error)),
        Indicator::Input => Some((" ⌨ INPUT ", DEFAULT_THEME.secondary)),
        Indicator::None => None,
    };
    if let Some((text, color)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_bg)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
