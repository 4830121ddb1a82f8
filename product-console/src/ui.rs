// product-console/src/ui.rs
// 界面绘制 - 表单 / 结果表 / 提示 / 日志

use product_client::table::COLUMNS;
use product_client::{Action, FormField, ResultTable};
use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, Health};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Form + Results
            Constraint::Length(3), // Flash
            Constraint::Length(8), // Logs
            Constraint::Length(1), // Help
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    draw_header(f, app, chunks[0]);
    draw_form(f, app, main_chunks[0]);
    draw_results(f, app, main_chunks[1]);
    draw_flash(f, app, chunks[2]);
    draw_logs(f, app, chunks[3]);
    draw_help(f, chunks[4]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let health = match app.health {
        Health::Unknown => Span::styled(" Checking... ", Style::default().fg(Color::Yellow)),
        Health::Healthy => Span::styled(
            " Healthy ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Health::Unreachable => Span::styled(
            " Unreachable ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let mut spans = vec![
        Span::raw(" Product Console "),
        Span::styled(app.base_url.as_str(), Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        health,
    ];
    if app.pending > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!(" {} in flight ", app.pending),
            Style::default().fg(Color::Magenta),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Product ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Two lines per field: label, then value
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(FormField::ALL.map(|_| Constraint::Length(2)))
        .split(inner);

    for (field, row) in FormField::ALL.into_iter().zip(rows.iter()) {
        let focused = field == app.focus;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut label = vec![Span::styled(field.label(), label_style)];
        if let Some(hint) = field.hint() {
            label.push(Span::styled(
                format!("  {}", hint),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let value_area = Rect {
            y: row.y + 1,
            height: 1,
            ..*row
        };
        let label_area = Rect { height: 1, ..*row };
        f.render_widget(Paragraph::new(Line::from(label)), label_area);

        if focused {
            let width = value_area.width.max(1) as usize;
            let scroll = app.editor.visual_scroll(width);
            let input = Paragraph::new(app.editor.value())
                .style(Style::default().fg(Color::White).bg(Color::DarkGray))
                .scroll((0, scroll as u16));
            f.render_widget(input, value_area);
            f.set_cursor_position((
                value_area.x + (app.editor.visual_cursor().max(scroll) - scroll) as u16,
                value_area.y,
            ));
        } else {
            f.render_widget(Paragraph::new(app.field_value(field)), value_area);
        }
    }
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .state
        .results
        .as_ref()
        .map(|table| {
            table
                .rows()
                .iter()
                .map(|p| Row::new(ResultTable::cells(p)))
                .collect()
        })
        .unwrap_or_default();

    let title = match &app.state.results {
        Some(table) => format!(" Results ({}) ", table.len()),
        None => " Results ".to_string(),
    };

    let header = Row::new(COLUMNS.map(|c| c.title)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let widths = COLUMNS.map(|c| Constraint::Fill(c.width));

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(table, area);
}

fn draw_flash(f: &mut Frame, app: &App, area: Rect) {
    let flash = Paragraph::new(app.state.flash())
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Message ").borders(Borders::ALL));
    f.render_widget(flash, area);
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let mut help: Vec<String> = Action::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| format!("F{} {}", i + 1, action.label()))
        .collect();
    help.push("Ctrl-E export".to_string());
    help.push("Esc quit".to_string());

    let help = Paragraph::new(help.join("  ")).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
