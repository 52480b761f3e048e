//! Canvas pane: the visualized structure with its current highlights
//!
//! Arrays, stacks and queues are drawn as bars (stack top and queue front
//! are labelled); trees are drawn rotated a quarter turn, right subtree on
//! top, one node per line.

use crate::snapshot::{NodeId, Side, StructureKind, TreeSnapshot};
use crate::ui::scene::{format_value, Scene};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Tallest bar, in chart units
const BAR_SCALE: f64 = 100.0;
const MAX_BAR_WIDTH: u16 = 7;

pub fn render_canvas_pane(frame: &mut Frame, area: Rect, scene: &Scene) {
    let structure = scene.meta().structure;
    let block = Block::default()
        .title(format!(" {} ", structure_title(structure)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused));

    if scene.contents().is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            format!("(empty {})", structure),
            Style::default().fg(DEFAULT_THEME.comment),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    if let Some(tree) = scene.contents().as_tree() {
        let lines = tree_lines(tree, scene);
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let values = scene.contents().as_array().unwrap_or_default();
    let inner_width = area.width.saturating_sub(2);
    let (bar_width, bar_gap) = bar_layout(inner_width, values.len());
    let heights = bar_heights(values);

    let bars: Vec<Bar> = values
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(index, (value, height))| {
            let style = Style::default().fg(bar_color(scene, index));
            Bar::default()
                .value(height)
                .text_value(format_value(*value))
                .label(Line::from(bar_label(structure, index, values.len())))
                .style(style)
                .value_style(style.add_modifier(Modifier::REVERSED))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(BAR_SCALE as u64)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn structure_title(structure: StructureKind) -> &'static str {
    match structure {
        StructureKind::Array => "Array",
        StructureKind::Stack => "Stack (top →)",
        StructureKind::Queue => "Queue (← front)",
        StructureKind::Tree => "Binary Search Tree",
    }
}

/// Bar width and gap so `count` bars fit `width` columns
fn bar_layout(width: u16, count: usize) -> (u16, u16) {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    let gap = if count.saturating_mul(2) <= width { 1 } else { 0 };
    let per_bar = (width.saturating_add(gap) / count).saturating_sub(gap);
    (per_bar.clamp(1, MAX_BAR_WIDTH), gap)
}

/// Map values onto `1..=BAR_SCALE`, keeping zero as the floor when all
/// values are non-negative
fn bar_heights(values: &[f64]) -> Vec<u64> {
    let lo = values.iter().copied().fold(0.0_f64, f64::min);
    let hi = values.iter().copied().fold(f64::MIN, f64::max);
    let span = hi - lo;
    values
        .iter()
        .map(|v| {
            if span <= 0.0 {
                BAR_SCALE as u64
            } else {
                (((v - lo) / span) * BAR_SCALE).round().max(1.0) as u64
            }
        })
        .collect()
}

fn bar_label(structure: StructureKind, index: usize, len: usize) -> String {
    match structure {
        StructureKind::Stack if index + 1 == len => "top".to_string(),
        StructureKind::Queue if index == 0 => "front".to_string(),
        StructureKind::Queue if index + 1 == len => "back".to_string(),
        StructureKind::Stack | StructureKind::Queue => String::new(),
        _ => index.to_string(),
    }
}

fn bar_color(scene: &Scene, index: usize) -> Color {
    let compared = scene
        .compared()
        .is_some_and(|(i, j)| i == index || j == index);
    let outside = scene
        .subarray()
        .is_some_and(|(l, r)| index < l || index > r);

    if scene.is_touched(index) {
        DEFAULT_THEME.function
    } else if compared {
        DEFAULT_THEME.secondary
    } else if scene.pivot() == Some(index) {
        DEFAULT_THEME.pivot
    } else if scene.is_sorted(index) {
        DEFAULT_THEME.success
    } else if outside {
        DEFAULT_THEME.inactive
    } else {
        DEFAULT_THEME.primary
    }
}

fn tree_lines(tree: &TreeSnapshot, scene: &Scene) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(tree.len());
    push_subtree(tree, tree.root_id(), 0, None, scene, &mut lines);
    lines
}

/// Reverse in-order walk: right subtree, node, left subtree
fn push_subtree(
    tree: &TreeSnapshot,
    id: Option<NodeId>,
    depth: usize,
    side: Option<Side>,
    scene: &Scene,
    lines: &mut Vec<Line<'static>>,
) {
    let Some(node) = id.and_then(|id| tree.node(id)) else {
        return;
    };
    push_subtree(tree, node.right, depth + 1, Some(Side::Right), scene, lines);

    let connector = match side {
        None => "",
        Some(Side::Right) => "┌── ",
        Some(Side::Left) => "└── ",
    };
    let indent = "    ".repeat(depth.saturating_sub(1));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{}{}", indent, connector),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format_value(node.key), node_style(scene, node.id)),
    ]));

    push_subtree(tree, node.left, depth + 1, Some(Side::Left), scene, lines);
}

fn node_style(scene: &Scene, id: NodeId) -> Style {
    if scene.found_node() == Some(id) || scene.new_node() == Some(id) {
        Style::default()
            .fg(DEFAULT_THEME.success)
            .add_modifier(Modifier::BOLD)
    } else if scene.current_node() == Some(id) {
        Style::default()
            .bg(DEFAULT_THEME.secondary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if scene.compared_node() == Some(id) {
        Style::default().fg(DEFAULT_THEME.secondary)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}
