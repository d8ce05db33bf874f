use image::{Rgb, RgbImage};

use super::{Canvas, HEIGHT, MARGIN, WIDTH};

const BAR: Rgb<u8> = Rgb([70, 130, 180]);
const ZERO_LINE: Rgb<u8> = Rgb([160, 160, 160]);

/// Vertical bars, one per category, in the given order. Values share a single
/// linear scale that always includes 0; negative values hang below the zero
/// line. Non-finite values leave an empty slot.
pub fn render_bar_chart(series: &[(String, f64)]) -> RgbImage {
    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    canvas.axes();

    let plot_w = WIDTH - 2 * MARGIN;
    let plot_h = (HEIGHT - 2 * MARGIN) as f64;
    let bottom = (HEIGHT - MARGIN) as f64;

    let finite = series.iter().map(|(_, v)| *v).filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = if hi > lo { hi - lo } else { 1.0 };
    let y_of = |v: f64| (bottom - (v - lo) / span * plot_h).round().max(0.0) as u32;

    let zero = y_of(0.0);
    canvas.fill_rect(MARGIN, zero, WIDTH - MARGIN, zero + 1, ZERO_LINE);

    if series.is_empty() {
        return canvas.into_image();
    }

    // more categories than pixels collapse onto shared columns
    let slot = plot_w as f64 / series.len() as f64;
    let bar_w = ((slot * 0.7).floor() as u32).max(1);
    for (i, (_, v)) in series.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        let pad = (slot - bar_w as f64).max(0.0) / 2.0;
        let x0 = (MARGIN + (i as f64 * slot + pad) as u32).min(WIDTH - MARGIN - bar_w);
        let (top, base) = if *v >= 0.0 { (y_of(*v), zero) } else { (zero, y_of(*v)) };
        canvas.fill_rect(x0, top, x0 + bar_w, base.max(top + 1), BAR);
    }

    canvas.into_image()
}
