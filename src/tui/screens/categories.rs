//! Categories screen: the fixed category tabs with their mod buckets

use crate::app::{App, AppState};
use crate::catalog::group_by_category;
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Length(3), // Blurb
            Constraint::Min(5),    // Bucket + detail
        ])
        .split(area);

    let titles: Vec<String> = app
        .descriptors
        .iter()
        .map(|d| format!("{} {}", d.icon, d.label))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.active_category_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let Some(descriptor) = app.descriptors.get(state.active_category_index) else {
        return;
    };

    let blurb = Paragraph::new(descriptor.blurb.clone())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(blurb, chunks[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    // Buckets keep the data file's order, no secondary sort.
    let grouped = group_by_category(app.store.records(), &app.descriptors);
    let bucket = grouped.bucket(&descriptor.id);

    let items: Vec<ListItem> = bucket
        .iter()
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

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({} mods) ", descriptor.label, bucket.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !bucket.is_empty() {
        list_state.select(Some(state.category_cursor.min(bucket.len() - 1)));
    }
    f.render_stateful_widget(list, panes[0], &mut list_state);

    if bucket.is_empty() {
        let hint = Paragraph::new("Nothing in this category yet. Check back after the next pack update.")
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        let inner = Rect {
            x: panes[0].x + 2,
            y: panes[0].y + 2,
            width: panes[0].width.saturating_sub(4),
            height: 2,
        };
        f.render_widget(hint, inner);
    }

    draw_detail_pane(f, panes[1], bucket.get(state.category_cursor).copied());
}

fn draw_detail_pane(f: &mut Frame, area: Rect, record: Option<&crate::catalog::ModRecord>) {
    let block = Block::default().borders(Borders::ALL).title(" About ");

    let Some(record) = record else {
        let empty = Paragraph::new("Select a mod to read about it").block(block);
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

    if let Some(vibe) = &record.vibe {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            vibe.clone(),
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter for full details",
        Style::default().fg(Color::Gray),
    )));

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

pub async fn handle_input(app: &mut App, key: KeyCode) -> Result<()> {
    let mut state = app.state.write().await;

    match key {
        KeyCode::Char('h') | KeyCode::Left => {
            let current = state.active_category_index;
            let next = if current == 0 {
                app.descriptors.len().saturating_sub(1)
            } else {
                current - 1
            };
            state.set_active_category(next, &app.descriptors);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let next = (state.active_category_index + 1) % app.descriptors.len().max(1);
            state.set_active_category(next, &app.descriptors);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let bucket_len = active_bucket_len(app, &state);
            if state.category_cursor + 1 < bucket_len {
                state.category_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.category_cursor = state.category_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            let id = {
                let grouped = group_by_category(app.store.records(), &app.descriptors);
                app.descriptors
                    .get(state.active_category_index)
                    .and_then(|d| grouped.bucket(&d.id).get(state.category_cursor).copied())
                    .map(|record| record.id)
            };
            if let Some(id) = id {
                state.open_detail(id);
            }
        }
        KeyCode::Esc => {
            state.go_back();
        }
        _ => {}
    }

    Ok(())
}

fn active_bucket_len(app: &App, state: &AppState) -> usize {
    let grouped = group_by_category(app.store.records(), &app.descriptors);
    app.descriptors
        .get(state.active_category_index)
        .map(|d| grouped.bucket(&d.id).len())
        .unwrap_or(0)
}
