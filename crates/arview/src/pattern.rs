//! Procedural decorative motifs drawn in a single color on a black canvas.
//!
//! Undrawn pixels stay black: the layer is meant for weighted blending, not
//! direct display. Motifs may clip at the canvas boundary.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const GRID_STEP: u32 = 100;
const DIAGONAL_STROKE: i32 = 10;
const CIRCLE_RADIUS: i32 = 40;
const FLOWER_CORE_RADIUS: i32 = 20;
const PETAL_LENGTH: f32 = 35.0;
const PETAL_STROKE: i32 = 8;
const PETAL_COUNT: u32 = 8;

/// The three fixed motifs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PatternKind {
    Diagonal,
    Geometric,
    Floral,
}

impl PatternKind {
    /// Uniform-random choice from an injected source.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => PatternKind::Diagonal,
            1 => PatternKind::Geometric,
            _ => PatternKind::Floral,
        }
    }
}

/// Draw the given motif in `color` on a black `width` x `height` canvas.
pub fn synthesize(width: u32, height: u32, color: Rgb<u8>, kind: PatternKind) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);
    match kind {
        PatternKind::Diagonal => draw_diagonal(&mut canvas, color),
        PatternKind::Geometric => draw_geometric(&mut canvas, color),
        PatternKind::Floral => draw_floral(&mut canvas, color),
    }
    canvas
}

/// Repeated diagonal strokes every `GRID_STEP` pixels.
///
/// The stroke is built from horizontally offset 45-degree lines. A
/// horizontal offset of one pixel moves the line 1/sqrt(2) along its
/// perpendicular, so `stroke * sqrt(2)` offsets give a gap-free stroke
/// of true `DIAGONAL_STROKE` perpendicular thickness.
fn draw_diagonal(canvas: &mut RgbImage, color: Rgb<u8>) {
    let w = canvas.width() as i32;
    let h = canvas.height() as i32;
    let span = (DIAGONAL_STROKE as f32 * std::f32::consts::SQRT_2).round() as i32;

    let mut x = -h;
    while x < w {
        for offset in 0..span {
            let x0 = (x + offset) as f32;
            draw_line_segment_mut(canvas, (x0, 0.0), (x0 + h as f32, h as f32), color);
        }
        x += GRID_STEP as i32;
    }
}

/// Filled circles on alternating grid cells: cell (cx, cy) is drawn when
/// (cx + cy) % 2 == 0.
fn draw_geometric(canvas: &mut RgbImage, color: Rgb<u8>) {
    let half = (GRID_STEP / 2) as i32;
    for y in (0..canvas.height()).step_by(GRID_STEP as usize) {
        for x in (0..canvas.width()).step_by(GRID_STEP as usize) {
            if (x / GRID_STEP + y / GRID_STEP) % 2 == 0 {
                let center = (x as i32 + half, y as i32 + half);
                draw_filled_circle_mut(canvas, center, CIRCLE_RADIUS, color);
            }
        }
    }
}

/// Flower motifs on the grid: a filled core plus radial petals at 45-degree
/// increments.
fn draw_floral(canvas: &mut RgbImage, color: Rgb<u8>) {
    let half = (GRID_STEP / 2) as i32;
    for y in (0..canvas.height()).step_by(GRID_STEP as usize) {
        for x in (0..canvas.width()).step_by(GRID_STEP as usize) {
            let cx = x as i32 + half;
            let cy = y as i32 + half;
            draw_filled_circle_mut(canvas, (cx, cy), FLOWER_CORE_RADIUS, color);

            for i in 0..PETAL_COUNT {
                let angle = i as f32 * std::f32::consts::FRAC_PI_4;
                draw_petal(canvas, (cx as f32, cy as f32), angle, color);
            }
        }
    }
}

/// A petal is a thick radial stroke, built from parallel line segments
/// offset along the perpendicular of its direction.
fn draw_petal(canvas: &mut RgbImage, center: (f32, f32), angle: f32, color: Rgb<u8>) {
    let (dx, dy) = (angle.cos(), angle.sin());
    let (px, py) = (-dy, dx);
    let tip = (center.0 + dx * PETAL_LENGTH, center.1 + dy * PETAL_LENGTH);

    for i in 0..PETAL_STROKE {
        let off = (i - PETAL_STROKE / 2) as f32;
        draw_line_segment_mut(
            canvas,
            (center.0 + px * off, center.1 + py * off),
            (tip.0 + px * off, tip.1 + py * off),
            color,
        );
    }
}
