//! Frame painter
//!
//! Reads the game state and paints one frame. Never mutates anything.

use std::f64::consts::PI;

use glam::Vec2;

use super::surface::Surface;
use crate::consts::*;
use crate::format_score;
use crate::sim::{Flash, FlashKind, GameState, GuideLine, Obstacle, ObstacleKind};
use crate::theme::Palette;
use crate::tuning::Tuning;

/// Paint a full frame: grid, watermark, guide + rocket, obstacles, flash, HUD
pub fn draw<S: Surface + ?Sized>(surface: &mut S, state: &GameState, tuning: &Tuning, palette: &Palette) {
    let vp = state.viewport;
    if !vp.is_drawable() {
        return;
    }
    let guide = state.guide();

    surface.clear(f64::from(vp.width), f64::from(vp.height));
    draw_grid(surface, state, palette);
    draw_watermark(surface, state, &tuning.watermark, palette);

    let progress = if state.slide_active {
        state.progress
    } else {
        IDLE_PROGRESS
    };
    draw_guide(surface, &guide, progress, palette);
    draw_rocket(surface, state, &guide, palette);
    draw_obstacles(surface, &state.obstacles, &guide, palette);

    if let Some(flash) = state.flash {
        draw_flash(surface, state, &flash, palette);
    }
    draw_hud(surface, state, palette);
}

fn font(weight: u32, px: f32) -> String {
    format!("{} {}px {}", weight, px, FONT_STACK)
}

fn draw_grid<S: Surface + ?Sized>(surface: &mut S, state: &GameState, palette: &Palette) {
    let (w, h) = (state.viewport.width, state.viewport.height);

    surface.save();
    surface.set_alpha(0.8);
    surface.set_stroke(palette.grid);
    surface.set_line_width(1.0);

    // Vertical lines scroll left, horizontal lines stay put as the "ground"
    let offset = state.grid_offset.rem_euclid(GRID_SPACING);
    let mut x = -offset;
    while x <= w {
        line(surface, Vec2::new(x, 0.0), Vec2::new(x, h));
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y <= h {
        line(surface, Vec2::new(0.0, y), Vec2::new(w, y));
        y += GRID_SPACING;
    }
    surface.restore();
}

fn line<S: Surface + ?Sized>(surface: &mut S, a: Vec2, b: Vec2) {
    surface.begin_path();
    surface.move_to(f64::from(a.x), f64::from(a.y));
    surface.line_to(f64::from(b.x), f64::from(b.y));
    surface.stroke();
}

fn draw_watermark<S: Surface + ?Sized>(surface: &mut S, state: &GameState, label: &str, palette: &Palette) {
    if label.is_empty() {
        return;
    }
    let vp = state.viewport;
    let min_dim = vp.min_dim();
    let pad = (min_dim * 0.06).max(16.0);

    surface.save();
    surface.set_alpha(palette.watermark_alpha);
    surface.set_fill(palette.watermark);
    surface.set_font(&font(600, (min_dim * 0.035).max(11.0)));
    surface.set_text_align("right");
    surface.set_text_baseline("alphabetic");
    surface.fill_text(label, f64::from(vp.width - pad), f64::from(vp.height - pad));
    surface.restore();
}

fn draw_guide<S: Surface + ?Sized>(surface: &mut S, guide: &GuideLine, progress: f32, palette: &Palette) {
    surface.save();
    surface.set_line_width(1.0);
    surface.set_stroke(palette.guide);
    surface.set_line_dash(&[GUIDE_DASH, GUIDE_GAP]);
    surface.set_line_dash_offset(f64::from(progress * guide.length() * GUIDE_DASH_TRAVEL));
    line(surface, guide.start, guide.end);
    surface.set_line_dash(&[]);
    surface.restore();
}

fn draw_rocket<S: Surface + ?Sized>(surface: &mut S, state: &GameState, guide: &GuideLine, palette: &Palette) {
    let rocket = &state.rocket;
    let p = guide.point_at(rocket.pos, rocket.offset);
    let angle = guide.angle() + rocket.tilt * TILT_ROTATION;

    surface.save();
    surface.translate(f64::from(p.x), f64::from(p.y));
    surface.rotate(f64::from(angle));

    // Flame
    surface.begin_path();
    surface.move_to(-16.0, 0.0);
    surface.line_to(-26.0, -4.0);
    surface.line_to(-24.0, 0.0);
    surface.line_to(-26.0, 4.0);
    surface.close_path();
    surface.set_fill(palette.flame);
    surface.fill();

    // Body
    surface.begin_path();
    surface.move_to(18.0, 0.0);
    surface.line_to(-12.0, -10.0);
    surface.line_to(-12.0, 10.0);
    surface.close_path();
    surface.set_fill(palette.body);
    surface.fill();

    // Window
    surface.begin_path();
    surface.arc(-4.0, 0.0, 4.0, 0.0, PI * 2.0);
    surface.set_fill(palette.window);
    surface.fill();

    surface.restore();
}

fn draw_obstacles<S: Surface + ?Sized>(
    surface: &mut S,
    obstacles: &[Obstacle],
    guide: &GuideLine,
    palette: &Palette,
) {
    if obstacles.is_empty() {
        return;
    }
    surface.save();
    surface.set_line_width(1.0);
    for obstacle in obstacles {
        let c = guide.point_at(obstacle.pos, obstacle.offset);
        let (x, y, r) = (f64::from(c.x), f64::from(c.y), f64::from(obstacle.size));
        match obstacle.kind {
            ObstacleKind::Rock => draw_rock(surface, x, y, r, palette),
            ObstacleKind::Ring => draw_ring(surface, x, y, r, palette),
            ObstacleKind::Spike => draw_spike(surface, x, y, r, palette),
        }
    }
    surface.restore();
}

fn draw_rock<S: Surface + ?Sized>(surface: &mut S, x: f64, y: f64, r: f64, palette: &Palette) {
    surface.begin_path();
    surface.arc(x, y, r, 0.0, PI * 2.0);
    surface.set_fill(palette.rock_fill);
    surface.fill();
    surface.set_stroke(palette.rock_edge);
    surface.stroke();

    // Highlight notch
    surface.begin_path();
    surface.arc(x - r * 0.2, y - r * 0.2, r * 0.5, -0.6, PI);
    surface.set_stroke(palette.rock_highlight);
    surface.stroke();
}

fn draw_ring<S: Surface + ?Sized>(surface: &mut S, x: f64, y: f64, r: f64, palette: &Palette) {
    surface.begin_path();
    surface.arc(x, y, r * 1.3, 0.0, PI * 2.0);
    surface.set_stroke(palette.ring_outer);
    surface.stroke();

    surface.begin_path();
    surface.arc(x, y, r * 0.55, 0.0, PI * 2.0);
    surface.set_stroke(palette.ring_inner);
    surface.stroke();
}

fn draw_spike<S: Surface + ?Sized>(surface: &mut S, x: f64, y: f64, r: f64, palette: &Palette) {
    surface.begin_path();
    surface.arc(x, y, r * 0.7, 0.0, PI * 2.0);
    surface.set_fill(palette.spike_glow);
    surface.fill();

    surface.save();
    surface.translate(x, y);
    surface.set_stroke(palette.spike);
    surface.set_line_cap("round");
    surface.set_line_width((r * 0.32).max(2.0));

    let inner = r * 0.15;
    let outer = r * 0.95;
    // Four lines through the centre at 45 degree steps, eight arms
    for i in 0..4_i32 {
        let (sin, cos) = (f64::from(i) * PI / 4.0).sin_cos();
        surface.begin_path();
        surface.move_to(-inner * cos, -inner * sin);
        surface.line_to(-outer * cos, -outer * sin);
        surface.move_to(inner * cos, inner * sin);
        surface.line_to(outer * cos, outer * sin);
        surface.stroke();
    }
    surface.restore();
}

/// Overlay opacity: eases out quadratically over the remaining fraction
pub fn flash_alpha(flash: &Flash) -> f32 {
    let t = flash.fraction();
    let peak = match flash.kind {
        FlashKind::Hit => HIT_FLASH_ALPHA,
        FlashKind::Near => NEAR_FLASH_ALPHA,
    };
    peak * t * t
}

fn draw_flash<S: Surface + ?Sized>(surface: &mut S, state: &GameState, flash: &Flash, palette: &Palette) {
    if flash.remaining_ms <= 0.0 {
        return;
    }
    let rgb = match flash.kind {
        FlashKind::Hit => palette.flash_hit_rgb,
        FlashKind::Near => palette.flash_near_rgb,
    };
    surface.save();
    surface.set_fill(&format!("rgba({},{})", rgb, flash_alpha(flash)));
    surface.fill_rect(
        0.0,
        0.0,
        f64::from(state.viewport.width),
        f64::from(state.viewport.height),
    );
    surface.restore();
}

/// The score line, e.g. "HI 00081  00045"
pub fn hud_text(state: &GameState) -> String {
    format!(
        "HI {}  {}",
        format_score(state.high_score),
        format_score(state.display_score())
    )
}

fn draw_hud<S: Surface + ?Sized>(surface: &mut S, state: &GameState, palette: &Palette) {
    let vp = state.viewport;
    let min_dim = vp.min_dim();
    let pad = (min_dim * 0.05).max(18.0);

    surface.save();
    surface.set_text_baseline("top");
    surface.set_text_align("right");
    surface.set_font(&font(600, (min_dim * 0.032).max(12.0)));
    surface.set_fill(palette.hud);
    surface.set_alpha(0.9);
    surface.fill_text(&hud_text(state), f64::from(vp.width - pad), f64::from(pad));

    if state.game_over {
        let (cx, cy) = (f64::from(vp.width / 2.0), f64::from(vp.height / 2.0));
        surface.set_text_align("center");
        surface.set_text_baseline("middle");

        surface.set_font(&font(600, (min_dim * 0.06).max(20.0)));
        surface.set_alpha(palette.banner_alpha);
        surface.fill_text("GAME OVER", cx, cy - 24.0);

        surface.set_font(&font(500, (min_dim * 0.03).max(11.0)));
        surface.set_alpha(palette.prompt_alpha);
        surface.fill_text("Press Space or Tap to restart", cx, cy + 16.0);
    }
    surface.restore();
}
