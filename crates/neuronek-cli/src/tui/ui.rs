//! TUI rendering.
//!
//! ┌ NEURONEK // Substance Intensity Monitor ──────────┐
//! │ 3 doses logged   window 24h   tick #12            │
//! └───────────────────────────────────────────────────┘
//! 100% ·    ·    ·    ●●   ·    ·    ·    ·    ·
//!      ·    ·    ·   │  ●  ·    ·    ·    ·    ·
//!  50% ·    ·    ·   │   ●●·    ·    ·    ·    ·
//!      ·    ·    ·    ·    ●●●  ·    ·    ·    ·
//!   0% └──────────────────────────────────────────
//!       24h               12h                  now
//! ● Caffeine  ● Nicotine    Recent: C 200mg (2h)
//!  a add dose   ? help   q quit
//!
//! The chart grid itself comes from `neuronek_core::render`; this module only
//! maps its cells to styled spans and lays out the chrome around it.

use std::ops::Range;
use std::time::{Duration, SystemTime};

use neuronek_core::{Cell, ChartLayout, Frame as ChartFrame, GridCanvas, Layer, Legend, render};
use ratatui::{prelude::*, widgets::*};

use super::app::{App, Mode};
use super::theme::rgb;

/// Columns reserved left of the canvas for the percentage labels.
const Y_LABEL_WIDTH: u16 = 5;

pub fn draw(f: &mut Frame, app: &App, now: SystemTime) {
    let theme = app.theme();
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.foreground)),
        area,
    );

    let keys_height = if app.show_help() { 2 } else { 1 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // title
            Constraint::Min(4),              // chart
            Constraint::Length(1),           // time labels
            Constraint::Length(1),           // legend
            Constraint::Length(keys_height), // keys
        ])
        .split(area);

    let rendering = {
        let canvas_width = rows[1].width.saturating_sub(Y_LABEL_WIDTH);
        render(
            app.table(),
            app.doses().events(),
            canvas_width as usize,
            rows[1].height as usize,
            now,
            app.config(),
        )
    };

    draw_title(f, rows[0], app);
    match &rendering.frame {
        ChartFrame::Chart(canvas) => {
            draw_chart(f, rows[1], canvas, app);
            draw_time_labels(f, rows[2], canvas.layout(), app);
        }
        ChartFrame::TooSmall {
            min_width,
            min_height,
            ..
        } => draw_too_small(f, rows[1], *min_width, *min_height, app),
        ChartFrame::Misconfigured { reason } => draw_misconfigured(f, rows[1], reason, app),
    }
    draw_legend(f, rows[3], &rendering.legend, app);
    draw_keys(f, rows[4], app);

    match app.mode() {
        Mode::Chart => {}
        Mode::SelectSubstance => draw_substance_picker(f, area, app),
        Mode::EnterAmount => draw_amount_entry(f, area, app),
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.axis))
        .title(Span::styled(
            " NEURONEK // Substance Intensity Monitor ",
            Style::default().bold().fg(theme.title),
        ));

    let doses = app.doses().len();
    let info = Line::from(vec![
        Span::styled(
            format!(" {doses} dose{} logged", if doses == 1 { "" } else { "s" }),
            Style::default().fg(theme.foreground),
        ),
        Span::styled(
            format!("   window {}   tick #{}", format_window(app.config().window), app.ticks()),
            Style::default().fg(theme.label),
        ),
    ]);
    f.render_widget(Paragraph::new(info).block(block), area);
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

fn draw_chart(f: &mut Frame, area: Rect, canvas: &GridCanvas, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(Y_LABEL_WIDTH), Constraint::Min(1)])
        .split(area);

    let label_style = Style::default().fg(app.theme().label);
    let labels: Vec<Line> = y_labels(canvas.layout())
        .into_iter()
        .map(|l| Line::from(Span::styled(l, label_style)))
        .collect();
    f.render_widget(Paragraph::new(labels), cols[0]);

    let lines: Vec<Line> = canvas
        .rows()
        .map(|row| Line::from(row.iter().map(|c| cell_span(c, app)).collect::<Vec<_>>()))
        .collect();
    f.render_widget(Paragraph::new(lines), cols[1]);
}

fn cell_span(cell: &Cell, app: &App) -> Span<'static> {
    let theme = app.theme();
    let style = match cell.layer {
        Layer::Curve(_) => cell
            .owner
            .and_then(|id| app.table().get(id))
            .map(|s| Style::default().fg(rgb(s.color())).bold())
            .unwrap_or_default(),
        Layer::Axis => Style::default().fg(theme.axis),
        Layer::Gridline => Style::default().fg(theme.grid),
        Layer::Blank => Style::default(),
    };
    Span::styled(cell.glyph.to_string(), style)
}

/// One label per canvas row: 100% on top, 50% mid-plot, 0% on the axis row.
fn y_labels(layout: &ChartLayout) -> Vec<&'static str> {
    let mut labels = vec!["     "; layout.height()];
    labels[layout.plot_rows() / 2] = " 50% ";
    labels[0] = "100% ";
    labels[layout.axis_row()] = "  0% ";
    labels
}

fn draw_time_labels(f: &mut Frame, area: Rect, layout: &ChartLayout, app: &App) {
    let text = format!(
        "{}{}",
        " ".repeat(Y_LABEL_WIDTH as usize),
        time_labels(layout, app.config().window)
    );
    f.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(app.theme().label))),
        area,
    );
}

/// Window start, midpoint and `now` under the data columns. A label that
/// would touch another one is left out.
fn time_labels(layout: &ChartLayout, window: Duration) -> String {
    let first = layout.first_data_column();
    let last = layout.last_data_column();
    let left = format_window(window);
    let mid = format_window(window / 2);
    let right = "now".to_string();

    let candidates = [
        (first, left),
        ((last + 1).saturating_sub(right.len()), right),
        (((first + last) / 2).saturating_sub(mid.chars().count() / 2), mid),
    ];

    let mut line = vec![' '; layout.width()];
    let mut taken: Vec<Range<usize>> = Vec::new();
    for (start, text) in candidates {
        let end = start + text.chars().count();
        let clashes = taken.iter().any(|r| start <= r.end && r.start <= end);
        if end > line.len() || clashes {
            continue;
        }
        for (i, c) in text.chars().enumerate() {
            line[start + i] = c;
        }
        taken.push(start..end);
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

/// `24h`, `30m` or `45s`, whichever unit divides the window evenly.
fn format_window(window: Duration) -> String {
    match window.as_secs() {
        s if s >= 3600 && s % 3600 == 0 => format!("{}h", s / 3600),
        s if s >= 60 && s % 60 == 0 => format!("{}m", s / 60),
        s => format!("{s}s"),
    }
}

fn draw_too_small(f: &mut Frame, area: Rect, min_width: usize, min_height: usize, app: &App) {
    let need = format!(
        "chart area needs {}x{}",
        min_width + Y_LABEL_WIDTH as usize,
        min_height
    );
    draw_notice(f, area, "Terminal too small", need, app);
}

fn draw_misconfigured(f: &mut Frame, area: Rect, reason: &str, app: &App) {
    draw_notice(f, area, "Invalid render config", reason.to_string(), app);
}

/// Two centred lines in place of the chart.
fn draw_notice(f: &mut Frame, area: Rect, headline: &'static str, detail: String, app: &App) {
    let text = vec![
        Line::from(Span::styled(
            headline,
            Style::default().bold().fg(app.theme().error),
        )),
        Line::from(Span::styled(detail, Style::default().fg(app.theme().label))),
    ];
    let y = area.y + area.height.saturating_sub(2) / 2;
    let rect = Rect::new(area.x, y, area.width, area.height.min(2));
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), rect);
}

// ---------------------------------------------------------------------------
// Legend and keys
// ---------------------------------------------------------------------------

fn draw_legend(f: &mut Frame, area: Rect, legend: &Legend, app: &App) {
    let mut spans = Vec::new();
    for (i, entry) in legend.entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{} {}", entry.marker, entry.name),
            Style::default().fg(rgb(entry.color)),
        ));
    }
    if !legend.recent.is_empty() {
        spans.push(Span::styled(
            "    Recent: ",
            Style::default().fg(app.theme().label),
        ));
        for (i, dose) in legend.recent.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", Style::default().fg(app.theme().label)));
            }
            spans.push(Span::styled(dose.label.clone(), Style::default().fg(rgb(dose.color))));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let key = Style::default().bold().fg(theme.title);
    let text = Style::default().fg(theme.foreground);

    let mut first = vec![
        Span::styled(" a", key),
        Span::styled(" add dose   ", text),
        Span::styled("?", key),
        Span::styled(" help   ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ];
    if let Some(status) = app.status() {
        first.push(Span::styled("   │ ", Style::default().fg(theme.label)));
        first.push(Span::styled(status.to_string(), Style::default().fg(theme.foreground)));
    }

    let mut lines = vec![Line::from(first)];
    if app.show_help() {
        lines.push(Line::from(vec![
            Span::styled(" ↑↓/jk", key),
            Span::styled(" move   ", text),
            Span::styled("enter", key),
            Span::styled(" select   ", text),
            Span::styled("esc", key),
            Span::styled(" back   ", text),
            Span::styled("ctrl+c", key),
            Span::styled(" quit anywhere", text),
        ]));
    }

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.highlight)),
        area,
    );
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn overlay_block<'a>(title: &'a str, app: &App) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme().title))
        .title(Span::styled(title, Style::default().bold().fg(app.theme().title)))
        .style(Style::default().bg(app.theme().background))
}

fn draw_substance_picker(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .table()
        .iter()
        .map(|(_, s)| {
            let hours = s.half_life().as_secs_f64() / 3600.0;
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}  ", s.symbol()), Style::default().bold().fg(rgb(s.color()))),
                Span::raw(format!("{:<14}", s.name())),
                Span::styled(format!("t½ {hours}h"), Style::default().fg(app.theme().label)),
            ]))
        })
        .collect();

    let rect = centered_rect(40, app.table().len() as u16 + 2, area);
    let list = List::new(items)
        .block(overlay_block(" Select Substance ", app))
        .highlight_style(Style::default().bg(app.theme().highlight).bold())
        .highlight_symbol("▸ ");
    let mut state = ListState::default().with_selected(Some(app.cursor()));

    f.render_widget(Clear, rect);
    f.render_stateful_widget(list, rect, &mut state);
}

fn draw_amount_entry(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let (name, color) = app
        .selected_substance()
        .map(|s| (s.name().to_string(), rgb(s.color())))
        .unwrap_or_else(|| (String::new(), theme.foreground));

    let text = vec![
        Line::default(),
        Line::from(vec![
            Span::raw("  Substance: "),
            Span::styled(name, Style::default().bold().fg(color)),
        ]),
        Line::default(),
        Line::from(vec![
            Span::raw(format!("  Amount ({}): ", app.config().dose_unit)),
            Span::styled(app.amount_input().to_string(), Style::default().bold()),
            Span::styled("█", Style::default().fg(theme.title)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "  enter confirm · esc back",
            Style::default().fg(theme.label),
        )),
    ];

    let rect = centered_rect(44, 8, area);
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(text).block(overlay_block(" Add Dose ", app)), rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::AppEvent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use neuronek_core::{Gutters, RenderConfig, SubstanceTable};
    use ratatui::backend::TestBackend;

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn app() -> crate::tui::app::App {
        App::new(
            SubstanceTable::builtin(),
            RenderConfig::default(),
            Duration::from_secs(60),
        )
    }

    fn keys(app: &mut App, codes: &[KeyCode]) {
        for &code in codes {
            app.push(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        }
        app.drain_events(now());
    }

    fn draw_to_buffer(app: &App, width: u16, height: u16, at: SystemTime) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app, at)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // -----------------------------------------------------------------------
    // Pure helpers
    // -----------------------------------------------------------------------

    #[test]
    fn test_format_window() {
        assert_eq!(format_window(Duration::from_secs(24 * 3600)), "24h");
        assert_eq!(format_window(Duration::from_secs(1800)), "30m");
        assert_eq!(format_window(Duration::from_secs(5400)), "90m");
        assert_eq!(format_window(Duration::from_secs(45)), "45s");
    }

    #[test]
    fn test_time_labels_positions() {
        let layout = ChartLayout::new(60, 10, Gutters::default()).unwrap();
        let line = time_labels(&layout, Duration::from_secs(24 * 3600));
        assert!(line.starts_with(" 24h"));
        assert!(line.ends_with("now"));
        assert_eq!(line.chars().count(), 59);
        assert_eq!(line.find("12h"), Some(28));
    }

    #[test]
    fn test_time_labels_drop_on_clash() {
        let layout = ChartLayout::new(9, 6, Gutters::default()).unwrap();
        let line = time_labels(&layout, Duration::from_secs(24 * 3600));
        assert_eq!(line, " 24h now");
    }

    #[test]
    fn test_y_labels() {
        let layout = ChartLayout::new(20, 11, Gutters::default()).unwrap();
        let labels = y_labels(&layout);
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0], "100% ");
        assert_eq!(labels[5], " 50% ");
        assert_eq!(labels[10], "  0% ");
        assert_eq!(labels[3], "     ");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }

    // -----------------------------------------------------------------------
    // Full frames
    // -----------------------------------------------------------------------

    #[test]
    fn test_draw_chart_chrome() {
        let app = app();
        let buf = draw_to_buffer(&app, 100, 30, now());
        let screen = screen_text(&buf);
        assert!(screen.contains("NEURONEK // Substance Intensity Monitor"));
        assert!(screen.contains("0 doses logged"));
        assert!(row_text(&buf, 3).starts_with("100% "));
        assert!(row_text(&buf, 26).starts_with("  0% └"));
        assert!(row_text(&buf, 27).contains("24h"));
        assert!(row_text(&buf, 28).starts_with("● Caffeine  ● L-Theanine"));
        assert!(row_text(&buf, 29).contains("a add dose"));
    }

    #[test]
    fn test_dose_paints_curve_in_substance_colour() {
        let mut app = app();
        keys(
            &mut app,
            &[
                KeyCode::Char('a'),
                KeyCode::Enter,
                KeyCode::Char('2'),
                KeyCode::Char('0'),
                KeyCode::Char('0'),
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.doses().len(), 1);

        let buf = draw_to_buffer(&app, 100, 30, now() + Duration::from_secs(3600));
        let caffeine = Color::Rgb(0xf7, 0x76, 0x8e);
        let curve_cells = (3..27u16)
            .flat_map(|y| (Y_LABEL_WIDTH..100).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].fg == caffeine)
            .count();
        assert!(curve_cells > 0);
        assert!(row_text(&buf, 28).contains("Recent: C 200mg (1h)"));
        assert!(row_text(&buf, 29).contains("Added C 200mg"));
    }

    #[test]
    fn test_too_small_placeholder() {
        let app = app();
        let buf = draw_to_buffer(&app, 30, 10, now());
        let screen = screen_text(&buf);
        assert!(screen.contains("Terminal too small"));
        assert!(screen.contains("chart area needs 17x6"));
        assert!(!screen.contains('└'));
    }

    #[test]
    fn test_misconfigured_placeholder() {
        let mut config = RenderConfig::default();
        config.gridline_interval = 0;
        let app = App::new(SubstanceTable::builtin(), config, Duration::from_secs(60));
        let screen = screen_text(&draw_to_buffer(&app, 100, 30, now()));
        assert!(screen.contains("Invalid render config"));
        assert!(screen.contains("gridline_interval must be > 0"));
        assert!(!screen.contains('└'));
    }

    #[test]
    fn test_picker_overlay() {
        let mut app = app();
        keys(&mut app, &[KeyCode::Char('a'), KeyCode::Down]);
        let screen = screen_text(&draw_to_buffer(&app, 100, 30, now()));
        assert!(screen.contains("Select Substance"));
        assert!(screen.contains("▸ T  L-Theanine"));
        assert!(screen.contains("Nicotine"));
    }

    #[test]
    fn test_amount_overlay_shows_input() {
        let mut app = app();
        keys(
            &mut app,
            &[KeyCode::Char('a'), KeyCode::Enter, KeyCode::Char('4'), KeyCode::Char('2')],
        );
        let screen = screen_text(&draw_to_buffer(&app, 100, 30, now()));
        assert!(screen.contains("Add Dose"));
        assert!(screen.contains("Substance: Caffeine"));
        assert!(screen.contains("Amount (mg): 42█"));
    }

    #[test]
    fn test_help_adds_second_key_row() {
        let mut app = app();
        keys(&mut app, &[KeyCode::Char('?')]);
        let buf = draw_to_buffer(&app, 100, 30, now());
        assert!(row_text(&buf, 29).contains("ctrl+c quit anywhere"));
        assert!(row_text(&buf, 28).contains("a add dose"));
    }
}
