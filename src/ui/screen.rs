use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::{
    app::{App, Screen},
    board::key_for_tile,
    palette::TileColor,
    rules::{CORRECT_TAP_POINTS, TIME_LIMIT_SECS, WRONG_TAP_PENALTY},
    summary::GameSummary,
    ui::layout::{play_layout, tile_rects},
};

/// A UI screen boundary: responsible for drawing one app screen
pub trait ScreenView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct StartView;

impl ScreenView for StartView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let italic = Style::default().add_modifier(Modifier::ITALIC);

        let lines = vec![
            Line::from(Span::styled("COLOR TAPPER", bold.fg(Color::Magenta))),
            Line::default(),
            Line::from("Tap the tiles that match the target color."),
            Line::from(format!(
                "+{CORRECT_TAP_POINTS} for a match, -{WRONG_TAP_PENALTY} for a miss, {TIME_LIMIT_SECS} seconds on the clock."
            )),
            Line::from("The target changes every few seconds, so keep watching it."),
            Line::default(),
            Line::from("keys 1234 / qwer / asdf / zxcv, or click a tile"),
            Line::default(),
            Line::from(Span::styled(
                format!(
                    "(enter) start / (l)abels: {} / (esc)ape",
                    if app.settings.tile_labels { "ON" } else { "OFF" }
                ),
                italic,
            )),
        ];

        render_centered(lines, area, buf);
    }
}

pub struct PlayView;

impl ScreenView for PlayView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let layout = play_layout(area);
        let state = app.session.snapshot();
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut status = vec![
            Span::styled(format!("Score: {}", state.score), bold),
            Span::raw("   "),
            Span::styled(
                format!("Time: {}s", state.time_left),
                if state.time_left <= 5 {
                    bold.fg(Color::Red)
                } else {
                    bold
                },
            ),
            Span::raw("   "),
            Span::styled(format!("Round: {}", state.current_round), bold),
        ];
        if let Some(popup) = &app.feedback.popup {
            let color = if popup.delta > 0 {
                Color::Green
            } else {
                Color::Red
            };
            status.push(Span::raw("   "));
            status.push(Span::styled(popup.label(), bold.fg(color)));
        }
        Paragraph::new(Line::from(status))
            .alignment(Alignment::Center)
            .render(layout.status, buf);

        let target = state.target_color;
        Paragraph::new(Line::from(vec![
            Span::styled("Tap: ", bold),
            Span::styled(
                format!("  {target}  "),
                swatch_style(target).add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Target"))
        .render(layout.target, buf);

        let tiles = app.board.rows().flatten().copied();
        for (index, (color, rect)) in tiles.zip(tile_rects(layout.grid)).enumerate() {
            render_tile(app, index, color, rect, buf);
        }

        Paragraph::new(Span::styled(
            "(1-4 q-r a-f z-v) tap / (esc) menu",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(layout.legend, buf);
    }
}

pub struct GameOverView;

impl ScreenView for GameOverView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let summary = app
            .summary
            .clone()
            .unwrap_or_else(|| GameSummary::from(app.session.snapshot()));
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled("GAME OVER", bold.fg(Color::Magenta))),
            Line::default(),
            Line::from(Span::styled(
                format!("Final Score: {}", summary.final_score),
                bold,
            )),
            Line::from(format!("Correct Taps: {}", summary.correct_taps)),
            Line::from(format!("Wrong Taps: {}", summary.wrong_taps)),
            Line::from(format!("Accuracy: {}%", summary.accuracy)),
            Line::from(format!("Rounds Played: {}", summary.rounds_played)),
            Line::default(),
            Line::from(Span::styled(
                summary.performance.message(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::default(),
            Line::from(Span::styled(
                "(r)estart / (m)enu / (esc)ape",
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ];

        render_centered(lines, area, buf);
    }
}

/// Helper to construct the view for the current screen
pub fn current_view(screen: Screen) -> Box<dyn ScreenView> {
    match screen {
        Screen::Start => Box::new(StartView),
        Screen::Playing => Box::new(PlayView),
        Screen::GameOver => Box::new(GameOverView),
    }
}

fn render_centered(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, top, area.width, height), buf);
}

fn tile_rgb(color: TileColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Background in the tile color with a readable foreground
fn swatch_style(color: TileColor) -> Style {
    let (r, g, b) = color.rgb();
    let luma = (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000;
    let fg = if luma > 150 { Color::Black } else { Color::White };
    Style::default().bg(tile_rgb(color)).fg(fg)
}

fn render_tile(app: &App, index: usize, color: TileColor, rect: Rect, buf: &mut Buffer) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let style = swatch_style(color);
    buf.set_style(rect, style);

    let inner = match app.feedback.flash_for(index) {
        Some(flash) => {
            let edge = if flash.correct { Color::Green } else { Color::Red };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(style.fg(edge).add_modifier(Modifier::BOLD));
            let inner = block.inner(rect);
            block.render(rect, buf);
            inner
        }
        None => rect,
    };

    let key = key_for_tile(index).map(|k| format!("[{k}]")).unwrap_or_default();
    let mut lines = Vec::new();
    if app.settings.tile_labels {
        lines.push(Line::from(color.to_string()));
    }
    lines.push(Line::from(key));
    render_centered(lines, inner, buf);
}
