//! Draws one frame of the console.

use crate::console::presenter::{denied_message, empty_message, page_title, search_placeholder};
use crate::console::{TableView, View};
use crate::notify::Level;
use crate::tui::app::{App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Table or message
            Constraint::Length(8), // Selected request details
            Constraint::Length(3), // Status line
        ])
        .split(f.area());

    render_title(f, app, view, chunks[0]);
    render_search(f, app, chunks[1]);
    match view {
        View::Table(table) => {
            render_table(f, app, table, chunks[2]);
            render_details(f, app, table, chunks[3]);
        }
        other => render_message(f, app, other, chunks[2]),
    }
    render_status(f, app, view, chunks[4]);
}

fn render_title(f: &mut Frame, app: &App, view: &View, area: Rect) {
    let count = match view {
        View::Table(table) if table.rows.len() != table.total => {
            format!("{} of {} pending", table.rows.len(), table.total)
        }
        View::Table(table) => format!("{} pending", table.total),
        View::Empty => "0 pending".to_string(),
        _ => String::new(),
    };
    let line = Line::from(vec![
        Span::styled(
            page_title(app.presenter.kind()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(count, Style::default().fg(Color::DarkGray)),
    ]);
    let title = Paragraph::new(line).block(Block::default().title("wfadmin").borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == InputMode::Search;
    let text = if app.search.is_empty() && !editing {
        Span::styled(
            search_placeholder(app.presenter.kind()),
            Style::default().fg(Color::DarkGray),
        )
    } else if editing {
        Span::raw(format!("{}_", app.search))
    } else {
        Span::raw(app.search.clone())
    };
    let border = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title("Search (/)")
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(search, area);
}

fn render_table(f: &mut Frame, app: &App, table: &TableView, area: Rect) {
    if table.rows.is_empty() {
        let msg = Paragraph::new("Sorry, no matching records found")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(msg, area);
        return;
    }

    let mut headers: Vec<Cell> = table
        .headers
        .iter()
        .map(|h| Cell::from(h.as_str()).style(Style::default().fg(Color::Yellow)))
        .collect();
    headers.push(Cell::from("Action").style(Style::default().fg(Color::Yellow)));

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|r| {
            let mut cells: Vec<Cell> = r.cells.iter().map(|c| Cell::from(c.as_str())).collect();
            cells.push(Cell::from(r.elapsed.as_str()));
            cells.push(action_cell(r.actions_enabled, r.acting, table));
            Row::new(cells)
        })
        .collect();

    let columns = table.headers.len() + 1;
    let widths: Vec<Constraint> = (0..columns)
        .map(|_| Constraint::Ratio(1, columns as u32))
        .collect();

    let widget = Table::new(rows, widths)
        .header(Row::new(headers).bottom_margin(1))
        .block(Block::default().title("Pending requests").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(widget, area, &mut state);
}

fn action_cell(enabled: bool, acting: bool, table: &TableView) -> Cell<'static> {
    if acting {
        let verb = table.pending.map(|d| d.verb()).unwrap_or("Updating");
        return Cell::from(format!("{}... ⟳", verb)).style(Style::default().fg(Color::Cyan));
    }
    if enabled {
        Cell::from(Line::from(vec![
            Span::styled("[a] Approve", Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::styled("[r] Reject", Style::default().fg(Color::Red)),
        ]))
    } else {
        Cell::from("[a] Approve  [r] Reject").style(Style::default().fg(Color::DarkGray))
    }
}

fn render_details(f: &mut Frame, app: &App, table: &TableView, area: Rect) {
    let block = Block::default().title("Details").borders(Borders::ALL);
    let Some(row) = table.rows.get(app.selected) else {
        f.render_widget(block, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Reference: ", Style::default().fg(Color::DarkGray)),
            Span::raw(row.reference_id.clone()),
        ]),
        Line::from(vec![
            Span::styled("Created:   ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} ({})", row.created_at, row.elapsed)),
        ]),
    ];
    if !row.description.is_empty() {
        lines.push(Line::from(row.description.clone()));
    }
    for (key, value) in &row.properties {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", key), Style::default().fg(Color::DarkGray)),
            Span::raw(value.clone()),
        ]));
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(details, area);
}

fn render_message(f: &mut Frame, app: &App, view: &View, area: Rect) {
    let kind = app.presenter.kind();
    let (title, body, color) = match view {
        View::Loading => ("Loading", "Loading...".to_string(), Color::DarkGray),
        View::Empty => (
            "No pending requests",
            empty_message(kind),
            Color::Reset,
        ),
        View::Denied => ("Permission Denied", denied_message(kind), Color::Yellow),
        View::Error(message) => ("Error", message.clone(), Color::Red),
        View::Table(_) => return,
    };
    let paragraph = Paragraph::new(body)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, app: &App, view: &View, area: Rect) {
    let pending = match view {
        View::Table(table) => table.pending,
        _ => None,
    };

    let line = if let Some(decision) = pending {
        Line::from(Span::styled(
            format!("⟳ {} in progress... actions are disabled", decision.verb()),
            Style::default().fg(Color::Cyan),
        ))
    } else if let Some(status) = &app.status {
        let (mark, color) = match status.level {
            Level::Success => ("✓", Color::Green),
            Level::Error => ("✗", Color::Red),
        };
        Line::from(Span::styled(
            format!("{} {}", mark, status.message),
            Style::default().fg(color),
        ))
    } else {
        Line::from(Span::styled(
            "↑/↓ select  a approve  r reject  / search  R reload  q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
