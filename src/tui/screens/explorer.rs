//! Mods Explorer screen: free-text search, category/tag filters, sorting

use crate::app::{App, AppState, InputMode};
use crate::catalog::{index, CatalogIndex, SortKey};
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    draw_filter_bar(f, chunks[0], app, state);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_result_list(f, panes[0], app, state);
    draw_preview(f, panes[1], app, state);
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let query_style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let sort_label = state
        .sort_key
        .map(|k| k.as_str())
        .unwrap_or("off")
        .to_string();

    let lines = vec![
        Line::from(vec![
            Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                if state.search_query.is_empty() && state.input_mode != InputMode::Search {
                    "(press / to search)".to_string()
                } else {
                    format!("{}_", state.search_query)
                },
                query_style,
            ),
        ]),
        Line::from(vec![
            Span::styled("Category: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(
                state
                    .category_filter
                    .as_deref()
                    .map(index::display_label)
                    .unwrap_or_else(|| "All".to_string()),
            ),
            Span::raw("   "),
            Span::styled("Tag: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(state.tag_filter.as_deref().unwrap_or("All")),
            Span::raw("   "),
            Span::styled("Sort: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(sort_label),
            Span::raw("   "),
            Span::styled(
                state.results_label(app.store.len()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];

    let bar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Mods Explorer "));
    f.render_widget(bar, area);
}

fn draw_result_list(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let items: Vec<ListItem> = state
        .visible
        .iter()
        .filter_map(|id| app.store.get(*id))
        .map(|record| {
            let tag = record
                .tag
                .as_deref()
                .map(|t| format!("  [{}]", t))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(record.name.clone()),
                Span::styled(tag, Style::default().fg(Color::Magenta)),
            ]))
        })
        .collect();

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Results ({}) ", state.visible.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !empty {
        list_state.select(Some(state.selected_index.min(state.visible.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut list_state);

    if empty {
        let msg = Paragraph::new("No mods match the current filters.")
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        f.render_widget(msg, inner);
    }
}

fn draw_preview(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" Preview ");

    let Some(record) = state.record_under_cursor(&app.store) else {
        let empty = Paragraph::new("Nothing selected").block(block);
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            record.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(record.description.clone()),
    ];

    if let Some(category) = &record.category {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Category: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(index::display_label(category)),
        ]));
    }
    if let Some(file_name) = &record.file_name {
        lines.push(Line::from(vec![
            Span::styled("File: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(file_name.clone()),
        ]));
    }
    if !record.features.is_empty() {
        lines.push(Line::from(""));
        for feature in &record.features {
            lines.push(Line::from(format!("• {}", feature)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter for full details",
        Style::default().fg(Color::Gray),
    )));

    let preview = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(preview, area);
}

/// Advance an optional filter through None -> each value -> None.
fn cycle(current: Option<&str>, values: &[String]) -> Option<String> {
    match current {
        None => values.first().cloned(),
        Some(active) => {
            let pos = values.iter().position(|v| v == active);
            match pos {
                Some(i) if i + 1 < values.len() => Some(values[i + 1].clone()),
                _ => None,
            }
        }
    }
}

pub async fn handle_input(app: &mut App, key: KeyCode) -> Result<()> {
    let mut state = app.state.write().await;

    match key {
        KeyCode::Char('j') | KeyCode::Down => {
            if state.selected_index + 1 < state.visible.len() {
                state.selected_index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.selected_index = state.selected_index.saturating_sub(1);
        }
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
        }
        KeyCode::Char('c') => {
            let index = CatalogIndex::build(app.store.records());
            state.category_filter = cycle(state.category_filter.as_deref(), &index.categories);
            state.refresh_visible(&app.store);
        }
        KeyCode::Char('t') => {
            let index = CatalogIndex::build(app.store.records());
            state.tag_filter = cycle(state.tag_filter.as_deref(), &index.tags);
            state.refresh_visible(&app.store);
        }
        KeyCode::Char('T') => {
            // Toggle on the highlighted mod's tag; again on the same tag
            // resets to all.
            let tag = state
                .record_under_cursor(&app.store)
                .and_then(|record| record.tag.clone());
            if let Some(tag) = tag {
                state.toggle_tag_filter(&tag);
                state.refresh_visible(&app.store);
            }
        }
        KeyCode::Char('s') => {
            // name -> category -> tag -> off -> name
            state.sort_key = match state.sort_key {
                None => Some(SortKey::Name),
                Some(SortKey::Tag) => None,
                Some(k) => Some(k.next()),
            };
            state.refresh_visible(&app.store);
        }
        KeyCode::Enter => {
            if let Some(record) = state.record_under_cursor(&app.store) {
                let id = record.id;
                state.open_detail(id);
            }
        }
        KeyCode::Esc => {
            // Esc with active filters resets them; otherwise goes back.
            if !state.search_query.is_empty()
                || state.category_filter.is_some()
                || state.tag_filter.is_some()
            {
                state.search_query.clear();
                state.category_filter = None;
                state.tag_filter = None;
                state.refresh_visible(&app.store);
            } else {
                state.go_back();
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_walks_values_then_wraps_to_all() {
        let values = vec!["casual".to_string(), "misc".to_string()];
        assert_eq!(cycle(None, &values).as_deref(), Some("casual"));
        assert_eq!(cycle(Some("casual"), &values).as_deref(), Some("misc"));
        assert_eq!(cycle(Some("misc"), &values), None);
    }

    #[test]
    fn test_cycle_with_stale_value_resets() {
        let values = vec!["casual".to_string()];
        assert_eq!(cycle(Some("gone"), &values), None);
    }

    #[test]
    fn test_cycle_empty_values() {
        assert_eq!(cycle(None, &[]), None);
    }
}
