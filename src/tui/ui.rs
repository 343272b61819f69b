//! UI rendering for the TUI.

use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::features::cycle::VisualState;
use crate::tui::app::{App, View};
use crate::tui::settings::{SettingsField, SettingsPanel};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.view {
        View::Clock => render_clock(frame, app, chunks[1]),
        View::History => render_history(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    if let Some(panel) = &app.settings {
        render_settings(frame, panel, frame.area());
    }
}

/// Color for a visual state. The completion flash blinks.
const fn visual_color(visual: VisualState, frame: u64) -> Color {
    match visual {
        VisualState::Normal => Color::Green,
        VisualState::Paused => Color::Yellow,
        VisualState::Error => {
            if (frame / 10) % 2 == 0 {
                Color::Red
            } else {
                Color::DarkGray
            }
        }
        VisualState::None => Color::Gray,
    }
}

fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let view = match app.view {
        View::Clock => "Clock",
        View::History => "History",
    };
    let title = format!(" pomoclock · {view} ");

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_clock(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(1), // Phase
            Constraint::Length(1),
            Constraint::Length(1), // Time
            Constraint::Length(1),
            Constraint::Length(1), // Period
            Constraint::Length(1),
            Constraint::Length(3), // Gauge
            Constraint::Min(0),
        ])
        .split(area);

    let display = &app.display;
    let color = visual_color(display.visual, app.frame);
    let bold = Style::default().fg(color).add_modifier(Modifier::BOLD);

    frame.render_widget(
        Paragraph::new(display.phase.label().to_uppercase())
            .style(bold)
            .alignment(Alignment::Center),
        sections[1],
    );

    frame.render_widget(
        Paragraph::new(display.text.clone())
            .style(bold)
            .alignment(Alignment::Center),
        sections[3],
    );

    frame.render_widget(
        Paragraph::new(format!(
            "Period {} of {}",
            display.period,
            app.long_break_interval()
        ))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center),
        sections[5],
    );

    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(sections[7])[1];

    frame.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(display.clamped_progress()),
        gauge_area,
    );
}

fn render_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    // Oldest week on the left
    let labels: Vec<(String, u64)> = app
        .history
        .weeks
        .iter()
        .rev()
        .map(|w| {
            (
                format!("{:02}/{:02}", w.week_start.day(), w.week_start.month()),
                u64::from(w.count),
            )
        })
        .collect();
    let data: Vec<(&str, u64)> = labels.iter().map(|(l, c)| (l.as_str(), *c)).collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Completed work periods per week "),
        )
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));
    frame.render_widget(chart, chunks[0]);

    let summary = format!(
        "Total {}  ·  Weekly average {:.1}",
        app.history.total_sessions(),
        app.history.weekly_average()
    );
    frame.render_widget(
        Paragraph::new(summary)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_settings(frame: &mut Frame<'_>, panel: &SettingsPanel, area: Rect) {
    let popup = centered_rect(50, 14, area);

    let items: Vec<ListItem<'_>> = SettingsField::ALL
        .iter()
        .map(|&field| {
            let selected = field == panel.field;
            let style = if selected {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {:<24}", field.label())),
                Span::styled(panel.value(field), Style::default().fg(Color::Cyan)),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings ")
            .title_bottom(" +/-: adjust  space: toggle  Enter: save  Esc: cancel ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(list, popup);
}

/// A `width` by `height` rectangle centered in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("s:start | x:stop | r:reset | h:history | o:settings | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_clock_view_shows_time_and_period() {
        let app = App::new(Config::default(), None, None);
        let screen = draw(&app);
        assert!(screen.contains("00:00"));
        assert!(screen.contains("Period 0 of 4"));
        assert!(screen.contains("WORK"));
    }

    #[test]
    fn test_settings_overlay_drawn() {
        let mut app = App::new(Config::default(), None, None);
        app.present_settings();
        let screen = draw(&app);
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Work periods per set"));
    }

    #[test]
    fn test_history_view_draws() {
        let mut app = App::new(Config::default(), None, None);
        app.toggle_history();
        assert!(draw(&app).contains("Weekly average 0.0"));
    }

    #[test]
    fn test_flash_blinks() {
        assert_eq!(visual_color(VisualState::Error, 0), Color::Red);
        assert_eq!(visual_color(VisualState::Error, 10), Color::DarkGray);
        assert_eq!(visual_color(VisualState::Paused, 10), Color::Yellow);
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let rect = centered_rect(50, 14, Rect::new(0, 0, 20, 10));
        assert_eq!(rect, Rect::new(0, 0, 20, 10));
    }
}
