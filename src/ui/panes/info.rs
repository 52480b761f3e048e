//! Info pane: algorithm, playback position, counters and the latest message

use crate::ui::metrics::Metrics;
use crate::ui::scene::{format_value, Scene, Tone};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Everything the info pane shows
pub struct InfoRenderData<'a> {
    pub scene: &'a Scene,
    pub metrics: &'a Metrics,
    pub time: f64,
    pub end_tick: Option<u64>,
    pub speed: f64,
    /// Operand being typed, when the prompt is open
    pub operand_input: Option<&'a str>,
}

pub fn render_info_pane(frame: &mut Frame, area: Rect, data: &InfoRenderData<'_>) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.fg);
    let meta = data.scene.meta();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Algorithm  ", label),
            Span::styled(
                meta.name,
                Style::default()
                    .fg(DEFAULT_THEME.primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Time       ", label),
            Span::styled(
                format!(
                    "{:.1} / {}",
                    data.time,
                    data.end_tick.map_or("-".to_string(), |t| t.to_string())
                ),
                value,
            ),
            Span::styled("   Speed ", label),
            Span::styled(format!("{:.2}x", data.speed), value),
        ]),
        Line::from(vec![
            Span::styled("Ops ", label),
            Span::styled(data.metrics.ops.to_string(), value),
            Span::styled("  Comparisons ", label),
            Span::styled(data.metrics.comparisons.to_string(), value),
            Span::styled("  Swaps ", label),
            Span::styled(data.metrics.swaps.to_string(), value),
            Span::styled("  Writes ", label),
            Span::styled(data.metrics.writes.to_string(), value),
        ]),
    ];

    if let Some(key) = data.scene.held_key() {
        lines.push(Line::from(vec![
            Span::styled("Key        ", label),
            Span::styled(format_value(key), Style::default().fg(DEFAULT_THEME.secondary)),
        ]));
    }

    if let Some(input) = data.operand_input {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} value: ", meta.name),
                Style::default().fg(DEFAULT_THEME.secondary),
            ),
            Span::styled(
                format!("{}_", input),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    } else if let Some((tone, text)) = data.scene.message() {
        let color = match tone {
            Tone::Info => DEFAULT_THEME.fg,
            Tone::Success => DEFAULT_THEME.success,
            Tone::Error => DEFAULT_THEME.error,
        };
        lines.push(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
