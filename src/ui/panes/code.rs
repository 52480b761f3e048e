//! Code pane: the algorithm's display source with the current line marked
//!
//! # Features
//!
//! - Syntax highlighting for Rust keywords, types, numbers and comments
//! - Current line highlighting; red when the log ended in an error
//! - The current line stays at a fixed visual row while stepping
//!
//! # Rendering
//!
//! The pane uses a simple character-by-character tokenizer to apply syntax
//! highlighting styles without requiring a full lexer.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for the display sources
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments run to the end of the line
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        // `..` and `.` inside ranges and field access are delimiters, but a
        // dot between digits belongs to the number
        let in_number = c == '.'
            && current_word.chars().all(|d| d.is_ascii_digit())
            && !current_word.is_empty()
            && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit());

        if !c.is_alphanumeric() && c != '_' && !in_number {
            if !current_word.is_empty() {
                let is_func = c == '(';
                let style = get_keyword_style(&current_word, is_func);
                spans.push(Span::styled(current_word.clone(), style));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "f64" | "usize" | "bool" | "Vec" | "Option" | "Tree" | "NodeId" | "Self" => {
            Style::default().fg(DEFAULT_THEME.type_name) // Types
        }
        "fn" | "let" | "mut" | "while" | "for" | "in" | "if" | "else" | "match" | "return"
        | "loop" | "break" | "continue" | "pub" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "Some" | "None" | "true" | "false" => Style::default().fg(DEFAULT_THEME.number), // Constants
        _ if word.chars().next().is_some_and(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => {
            if is_function {
                Style::default().fg(DEFAULT_THEME.function)
            } else {
                Style::default().fg(DEFAULT_THEME.fg) // Variables/Identifiers
            }
        }
    }
}

/// Scroll state for the code pane
#[derive(Debug, Default)]
pub struct CodeScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to; `None` until first render
    pub target_line_row: Option<usize>,
}

/// Render the code pane
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source: &[&str],
    current_line: Option<u32>,
    is_error: bool,
    scroll_state: &mut CodeScrollState,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let total_lines = source.len();
    let current_line = current_line.map_or(0, |line| line as usize);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = source
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;
            let line_num_str = format!("{:3} ", line_num);

            let (num_style, content_base_style) = if is_current && is_error {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            } else if is_current {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), Style::default())
            };

            let mut content_line = highlight_source_code(line);
            if is_current && is_error {
                for span in &mut content_line.spans {
                    span.style = content_base_style;
                }
            } else if is_current {
                for span in &mut content_line.spans {
                    span.style = span.style.patch(content_base_style);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
