use image::{Rgb, RgbImage};

use finsight_core::analytics::HeatmapMatrix;

use super::{Canvas, HEIGHT, MARGIN, WIDTH};

// dark purple -> blue -> teal -> green -> yellow
const STOPS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

/// Map `t` in `[0, 1]` onto the palette. Out-of-range or undefined input clamps.
pub fn heat_color(t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (STOPS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (STOPS[i], STOPS[i + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    Rgb([lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2])])
}

/// One cell per (ticker, period), tickers top to bottom, periods left to right.
/// Colors are scaled against the largest cell.
pub fn render_heatmap(matrix: &HeatmapMatrix) -> RgbImage {
    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    canvas.axes();

    let n_rows = matrix.tickers().count() as u32;
    let n_cols = matrix.periods().len() as u32;
    if n_rows == 0 || n_cols == 0 {
        return canvas.into_image();
    }

    let cell_w = ((WIDTH - 2 * MARGIN) / n_cols).max(1);
    let cell_h = ((HEIGHT - 2 * MARGIN) / n_rows).max(1);
    let max = matrix.max_value();

    for (r, (_, values)) in matrix.rows().enumerate() {
        let y0 = MARGIN + r as u32 * cell_h;
        for (c, v) in values.iter().enumerate() {
            let x0 = MARGIN + c as u32 * cell_w;
            let t = if max > 0.0 { v / max } else { 0.0 };
            canvas.fill_rect(x0, y0, x0 + cell_w, y0 + cell_h, heat_color(t));
        }
    }

    canvas.into_image()
}
