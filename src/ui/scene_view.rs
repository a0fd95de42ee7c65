//! Renders the scene: play area, status bar and info panel.

use crate::scene::{CrashCause, GameStatus, Scene, SceneLayout};
use crate::physics::Vec2;
use crate::ui::game_common::{
    centered_row, create_game_layout, info_line, render_info_panel_frame, render_status_bar,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 22;

const SKY_COLOR: Color = Color::Rgb(81, 192, 201);
const FLASH_COLOR: Color = Color::Rgb(255, 0, 0);
const SKYLINE_COLOR: Color = Color::Rgb(200, 236, 230);
const PIPE_COLOR: Color = Color::Rgb(115, 191, 46);
const SAND_COLOR: Color = Color::Rgb(222, 216, 149);
const SAND_SHADE: Color = Color::Rgb(200, 186, 110);

/// Building heights across one sky tile, 24 points per slice.
const SKYLINE: [f64; 12] = [
    60.0, 96.0, 140.0, 80.0, 40.0, 120.0, 170.0, 110.0, 70.0, 130.0, 90.0, 50.0,
];
const SKYLINE_SLICE: f64 = 24.0;

/// Width of one diagonal stripe in the ground texture.
const GROUND_STRIPE: f64 = 14.0;

/// Wing glyph per flap frame.
const WINGS: [&str; 3] = ["^", "-", "v"];

/// Maps scene points (origin bottom-left) onto a grid of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub scene_width: f64,
    pub scene_height: f64,
}

impl Viewport {
    pub fn new(layout: &SceneLayout, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            scene_width: layout.width,
            scene_height: layout.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Scene points covered by one row.
    pub fn row_height(&self) -> f64 {
        self.scene_height / f64::from(self.rows.max(1))
    }

    /// Scene point at the middle of a cell.
    pub fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        let x = (f64::from(col) + 0.5) * self.scene_width / f64::from(self.cols.max(1));
        let y = self.scene_height - (f64::from(row) + 0.5) * self.row_height();
        Vec2::new(x, y)
    }

    /// Cell holding a scene point, or `None` when it is off-screen.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if self.is_empty()
            || p.x < 0.0
            || p.x >= self.scene_width
            || p.y <= 0.0
            || p.y >= self.scene_height
        {
            return None;
        }
        let col = (p.x / self.scene_width * f64::from(self.cols)) as u16;
        let row = ((self.scene_height - p.y) / self.scene_height * f64::from(self.rows)) as u16;
        Some((col.min(self.cols - 1), row.min(self.rows - 1)))
    }
}

/// What a play-area cell shows, back to front: sky, skyline, pipe, ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Sky,
    Skyline,
    Pipe,
    GroundTop,
    Ground { shaded: bool },
}

pub fn classify(scene: &Scene, viewport: &Viewport, p: Vec2) -> CellKind {
    let ground = &scene.ground;
    let ground_top = ground.base_y + ground.tile_height;
    if p.y < ground_top {
        if p.y >= ground_top - viewport.row_height() {
            return CellKind::GroundTop;
        }
        let local = (p.x + ground.offset).rem_euclid(ground.tile_width) + p.y;
        let shaded = ((local / GROUND_STRIPE) as i64) % 2 == 0;
        return CellKind::Ground { shaded };
    }

    let on_pipe = scene.pipes.iter().any(|pair| {
        pair.lower_bounds(&scene.layout).contains_point(p)
            || pair.upper_bounds(&scene.layout).contains_point(p)
    });
    if on_pipe {
        return CellKind::Pipe;
    }

    let sky = &scene.sky;
    let above = p.y - sky.base_y;
    if above >= 0.0 && above < sky.tile_height {
        let local = (p.x + sky.offset).rem_euclid(sky.tile_width);
        let slice = (local / SKYLINE_SLICE) as usize % SKYLINE.len();
        if above < SKYLINE[slice] {
            return CellKind::Skyline;
        }
    }
    CellKind::Sky
}

/// Body glyph from the nose angle: climbing, level or diving.
pub fn bird_glyph(rotation: f64) -> &'static str {
    if rotation >= 0.1 {
        "▲"
    } else if rotation <= -0.5 {
        "▼"
    } else {
        "►"
    }
}

fn cell_span(kind: CellKind, sky_bg: Color) -> Span<'static> {
    match kind {
        CellKind::Sky => Span::styled(" ", Style::default().bg(sky_bg)),
        CellKind::Skyline => Span::styled("▓", Style::default().fg(SKYLINE_COLOR).bg(sky_bg)),
        CellKind::Pipe => Span::styled("█", Style::default().fg(PIPE_COLOR).bg(sky_bg)),
        CellKind::GroundTop => Span::styled("▀", Style::default().fg(PIPE_COLOR).bg(SAND_COLOR)),
        CellKind::Ground { shaded: true } => {
            Span::styled("▒", Style::default().fg(SAND_SHADE).bg(SAND_COLOR))
        }
        CellKind::Ground { shaded: false } => {
            Span::styled("░", Style::default().fg(SAND_SHADE).bg(SAND_COLOR))
        }
    }
}

/// Render the whole game screen into `area`.
pub fn render_scene(frame: &mut Frame, area: Rect, scene: &Scene) {
    let layout = create_game_layout(frame, area, " Flapper ", Color::Cyan, INFO_PANEL_WIDTH);
    render_play_area(frame, layout.content, scene);
    render_status(frame, layout.status_bar, scene);
    render_info_panel(frame, layout.info_panel, scene);
}

fn render_play_area(frame: &mut Frame, area: Rect, scene: &Scene) {
    let viewport = Viewport::new(&scene.layout, area.width, area.height);
    if viewport.is_empty() {
        return;
    }

    let red = scene.flash.as_ref().is_some_and(|f| f.is_red());
    let sky_bg = if red { FLASH_COLOR } else { SKY_COLOR };

    let bird = &scene.bird;
    let bird_cell = viewport.to_cell(bird.body.position);
    let bird_style = Style::default()
        .fg(Color::Yellow)
        .bg(sky_bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::with_capacity(area.height as usize);
    for row in 0..viewport.rows {
        let mut spans = Vec::with_capacity(viewport.cols as usize);
        for col in 0..viewport.cols {
            if bird_cell == Some((col, row)) {
                spans.push(Span::styled(bird_glyph(bird.rotation), bird_style));
                continue;
            }
            if bird_cell == Some((col + 1, row)) {
                let wing = WINGS[bird.anim.frame % WINGS.len()];
                spans.push(Span::styled(wing, bird_style));
                continue;
            }
            let kind = classify(scene, &viewport, viewport.cell_center(col, row));
            spans.push(cell_span(kind, sky_bg));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);

    let mid_x = scene.layout.width / 2.0;

    if scene.score_label_visible {
        let label_at = Vec2::new(mid_x, scene.layout.height * 0.75);
        if let Some((_, row)) = viewport.to_cell(label_at) {
            let text = scene.score.to_string();
            let mut style = Style::default().fg(Color::White).bg(sky_bg);
            if scene.score_pulse.is_active() {
                style = style.add_modifier(Modifier::BOLD);
            }
            let width = text.len() as u16 + 2;
            frame.render_widget(
                Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center),
                centered_row(area, row, width),
            );
        }
    }

    if let Some(banner) = &scene.banner {
        if let Some((_, row)) = viewport.to_cell(Vec2::new(mid_x, banner.y())) {
            let style = Style::default()
                .fg(Color::Yellow)
                .bg(sky_bg)
                .add_modifier(Modifier::BOLD);
            frame.render_widget(
                Paragraph::new(Span::styled(" Game Over ", style)).alignment(Alignment::Center),
                centered_row(area, row, 11),
            );
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, scene: &Scene) {
    let controls = [("[Space/Click]", "Flap"), ("[Esc]", "Quit")];
    match scene.status {
        GameStatus::Idle => {
            render_status_bar(frame, area, "Tap to start!", Color::Yellow, &controls)
        }
        GameStatus::Running => render_status_bar(
            frame,
            area,
            &format!("Score: {}", scene.score),
            Color::Green,
            &controls,
        ),
        GameStatus::Over if scene.interaction_enabled => {
            render_status_bar(frame, area, "Tap to play again", Color::Yellow, &controls)
        }
        GameStatus::Over => {
            let text = match scene.crash_cause {
                Some(CrashCause::Pipe) => "Crashed into a pipe!",
                _ => "Crashed into the ground!",
            };
            render_status_bar(frame, area, text, Color::Red, &controls)
        }
    }
}

fn status_name(status: GameStatus) -> (&'static str, Color) {
    match status {
        GameStatus::Idle => ("Ready", Color::Yellow),
        GameStatus::Running => ("Flying", Color::Green),
        GameStatus::Over => ("Crashed", Color::Red),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, scene: &Scene) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let (status, status_color) = status_name(scene.status);
    let visible = scene
        .pipes
        .iter()
        .filter(|p| {
            let b = p.lower_bounds(&scene.layout);
            b.max.x > 0.0 && b.min.x < scene.layout.width
        })
        .count();

    let lines = vec![
        Line::from(Span::styled(
            " Flapper ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        info_line("Status", status.to_string(), status_color),
        info_line("Score", scene.score.to_string(), Color::White),
        info_line("Best", scene.best_score.to_string(), Color::Yellow),
        Line::from(""),
        info_line("Pipes", visible.to_string(), PIPE_COLOR),
        info_line("Runs", scene.runs_played.to_string(), Color::White),
        info_line("Time", format!("{:.1}s", scene.run_time_secs), Color::White),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
