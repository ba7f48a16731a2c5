//! Time-driven partial rendering of a scene
//!
//! The pot is always drawn. The tree is drawn as a prefix of its recorded
//! steps whose length follows the elapsed share of the phase: growing
//! forward during work, shrinking back during a break.

use crate::scene::Scene;
use crate::steps::{ColorClass, DrawStep};
use crate::surface::RenderSurface;
use std::io;

/// Share of the phase that has passed, clamped to [0, 1]
pub fn progress(elapsed_secs: u64, total_secs: u64) -> f64 {
    if total_secs == 0 {
        return 1.0;
    }
    (elapsed_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

/// How many of `tree_len` tree steps are visible at this point of the phase
pub fn visible_tree_count(tree_len: usize, elapsed_secs: u64, total_secs: u64, growing: bool) -> usize {
    let fraction = progress(elapsed_secs, total_secs);
    let share = if growing { fraction } else { 1.0 - fraction };
    let count = (tree_len as f64 * share).floor().max(0.0) as usize;
    count.min(tree_len)
}

/// `MM:SS` for a number of seconds
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Countdown line shown under the pot, e.g. `[ WORK: 24:59 ]`
pub fn status_line(label: &str, remaining_secs: u64) -> String {
    format!("[ {}: {} ]", label, format_clock(remaining_secs))
}

/// Draw the pot, the visible part of the tree, and the countdown.
///
/// The caller erases before and refreshes after.
pub fn render<S: RenderSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    elapsed_secs: u64,
    total_secs: u64,
    label: &str,
    growing: bool,
) -> io::Result<()> {
    for step in scene.base() {
        draw_step(surface, step);
    }

    let visible = visible_tree_count(scene.tree_len(), elapsed_secs, total_secs, growing);
    for step in &scene.tree()[..visible] {
        draw_step(surface, step);
    }

    let remaining = total_secs.saturating_sub(elapsed_secs);
    draw_status(surface, &status_line(label, remaining))
}

fn draw_step<S: RenderSurface + ?Sized>(surface: &mut S, step: &DrawStep) {
    surface.put_str(step.row, step.col, &step.glyph, step.color, step.emphasis);
}

fn draw_status<S: RenderSurface + ?Sized>(surface: &mut S, text: &str) -> io::Result<()> {
    let (cols, rows) = surface.size()?;
    let row = rows as i32 - 1;
    let col = cols as i32 / 2 - text.len() as i32 / 2;

    surface.clear_line(row);
    surface.put_str(row, col, text, ColorClass::Text, true);
    Ok(())
}
