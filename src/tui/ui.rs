//! Main UI rendering

use super::screens;
use crate::app::{App, AppState, InputMode, Screen};
use crate::status::ServerStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

/// Draw the main UI
pub fn draw(f: &mut Frame, app: &App, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer/status
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);
    draw_tabs(f, state, chunks[1]);
    draw_content(f, app, state, chunks[2]);
    draw_footer(f, state, chunks[3]);

    // Detail modal on top of whichever screen opened it
    if state.selected_record(&app.store).is_some() {
        draw_detail_modal(f, app, state);
    }

    if state.input_mode == InputMode::Search {
        draw_search_hint(f, chunks[3]);
    }

    if state.show_help {
        draw_help(f);
    }
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let status_span = match &state.server_status {
        ServerStatus::Online { version, .. } => Span::styled(
            format!(
                "● Online  {}  {}",
                state.server_status.players_label(),
                version.as_deref().unwrap_or("")
            ),
            Style::default().fg(Color::Green),
        ),
        ServerStatus::Offline => Span::styled("● Offline", Style::default().fg(Color::Red)),
        ServerStatus::Unknown => Span::styled("○ Checking...", Style::default().fg(Color::Gray)),
    };

    let checked = state
        .status_checked_at
        .map(|t| format!("  (as of {})", t.format("%H:%M:%S")))
        .unwrap_or_default();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Packdex ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        status_span,
        Span::styled(checked, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_tabs(f: &mut Frame, state: &AppState, area: Rect) {
    let titles = vec![" 1 Server ", " 2 Explorer ", " 3 Categories "];
    let selected = match state.current_screen {
        Screen::Dashboard => 0,
        Screen::Explorer => 1,
        Screen::Categories => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_content(f: &mut Frame, app: &App, state: &AppState, area: Rect) {
    match state.current_screen {
        Screen::Dashboard => draw_dashboard(f, app, state, area),
        Screen::Explorer => screens::explorer::render(f, area, app, state),
        Screen::Categories => screens::categories::render(f, area, app, state),
    }
}

/// Landing screen: the server status card plus a pack summary.
fn draw_dashboard(f: &mut Frame, app: &App, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    let (status_label, status_style) = match &state.server_status {
        ServerStatus::Online { .. } => ("Online", Style::default().fg(Color::Green)),
        ServerStatus::Offline => ("Offline", Style::default().fg(Color::Red)),
        ServerStatus::Unknown => ("Checking...", Style::default().fg(Color::Yellow)),
    };

    let version = match &state.server_status {
        ServerStatus::Online { version, .. } => {
            version.clone().unwrap_or_else(|| "—".to_string())
        }
        _ => "—".to_string(),
    };

    let status_lines = vec![
        Line::from(vec![
            Span::styled("Status:  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(status_label, status_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Players: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(state.server_status.players_label()),
        ]),
        Line::from(vec![
            Span::styled("Version: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(version),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Status refreshes automatically. Press 'm' for the live map.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let status_card = Paragraph::new(status_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Server Status "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(status_card, chunks[0]);

    let total = app.store.len();
    let grouped = crate::catalog::group_by_category(app.store.records(), &app.descriptors);
    let mut summary_lines = vec![
        Line::from(Span::styled(
            "The Modpack",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} mods installed. Whether you just want to build, hunt bosses, or hang out, the pack has something for you.",
            total
        )),
        Line::from(""),
    ];
    for descriptor in &app.descriptors {
        summary_lines.push(Line::from(format!(
            "  {} {:<26} {:>3} mods",
            descriptor.icon,
            descriptor.label,
            grouped.bucket(&descriptor.id).len()
        )));
    }

    let summary = Paragraph::new(summary_lines)
        .block(Block::default().borders(Borders::ALL).title(" The Pack "))
        .wrap(Wrap { trim: true });
    f.render_widget(summary, chunks[1]);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let text = if let Some(msg) = &state.status_message {
        msg.clone()
    } else {
        match state.current_screen {
            Screen::Dashboard => "Tab/1-3: Screens | m: Live map | ?: Help | q: Quit".to_string(),
            Screen::Explorer => {
                "/: Search | c: Category | t: Tag | s: Sort | Enter: Details | q: Quit".to_string()
            }
            Screen::Categories => {
                "←/→: Switch tab | j/k: Navigate | Enter: Details | q: Quit".to_string()
            }
        }
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn draw_search_hint(f: &mut Frame, area: Rect) {
    let hint = Paragraph::new("typing… Enter: keep | Esc: clear")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    f.render_widget(Clear, area);
    f.render_widget(hint, area);
}

/// Detail modal for the selected mod
fn draw_detail_modal(f: &mut Frame, app: &App, state: &AppState) {
    let Some(record) = state.selected_record(&app.store) else {
        return;
    };

    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            record.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            record
                .tag
                .as_deref()
                .map(|t| format!("[{}]", t))
                .unwrap_or_default(),
            Style::default().fg(Color::Magenta),
        ),
    ])];

    if let Some(category) = &record.category {
        lines.push(Line::from(Span::styled(
            format!("Category: {}", crate::catalog::index::display_label(category)),
            Style::default().fg(Color::Blue),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(record.description.clone()));

    if !record.features.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Features:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for feature in &record.features {
            lines.push(Line::from(format!("  • {}", feature)));
        }
    }

    if let Some(how_to) = &record.how_to {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "How to:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for step in how_to.lines() {
            lines.push(Line::from(format!("  {}", step)));
        }
    }

    if let Some(details) = &record.details {
        lines.push(Line::from(""));
        for line in details.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

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
    if record.media.is_empty() {
        lines.push(Line::from(Span::styled(
            "No images for this mod yet. Add a \"media\" entry in mods.json.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let index = state.media_index.min(record.media.len() - 1);
        lines.push(Line::from(vec![
            Span::styled(
                format!("Image {} of {}: ", index + 1, record.media.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(record.media[index].clone()),
        ]));
        if record.media.len() > 1 {
            lines.push(Line::from(Span::styled(
                "←/→ to flip through images",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let modal = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Mod Details (Esc to close) "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(modal, area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Packdex Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  1/2/3, Tab   Switch screens"),
        Line::from("  j/k, ↓/↑     Move the cursor"),
        Line::from("  /            Live search (Explorer)"),
        Line::from("  c            Cycle category filter (Explorer)"),
        Line::from("  t            Cycle tag filter (Explorer)"),
        Line::from("  T            Toggle the highlighted mod's tag filter"),
        Line::from("  s            Cycle sort key (Explorer)"),
        Line::from("  ←/→, h/l     Switch category tab (Categories)"),
        Line::from("  Enter        Open mod details"),
        Line::from("  Esc          Close details / clear filters"),
        Line::from("  m            Open the live map in a browser"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::Gray),
        )),
    ];

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: true });
    f.render_widget(help, area);
}

/// Centered popup rect as a percentage of the parent area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
