/// Theme colours and simple RGB blending.

use crossterm::style::Color;

use crate::entities::Theme;

pub type Rgb = (u8, u8, u8);

pub const C_HUD: Color = Color::Yellow;
pub const C_HINT: Color = Color::DarkGrey;
pub const C_STAR: Color = Color::Yellow;
pub const C_BOMB: Color = Color::Red;
pub const C_OVERLAY_BG: Color = Color::Black;

pub const SKY_GRADIENT: &[Rgb] = &[(0x89, 0xf7, 0xfe), (0x66, 0xa6, 0xff)];
pub const SPACE_GRADIENT: &[Rgb] = &[(0x0f, 0x0c, 0x29), (0x30, 0x2b, 0x63), (0x24, 0x24, 0x3e)];
pub const OCEAN_GRADIENT: &[Rgb] = &[(0x00, 0xc6, 0xff), (0x00, 0x72, 0xff)];

pub fn gradient(theme: Theme) -> &'static [Rgb] {
    match theme {
        Theme::Sky => SKY_GRADIENT,
        Theme::Space => SPACE_GRADIENT,
        Theme::Ocean => OCEAN_GRADIENT,
    }
}

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Linear blend: `t = 0` gives `a`, `t = 1` gives `b`.
pub fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    (ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
}

/// Colour at `t ∈ [0, 1]` along evenly spaced gradient stops.
pub fn sample(stops: &[Rgb], t: f64) -> Rgb {
    match stops {
        [] => (0, 0, 0),
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let span = (stops.len() - 1) as f64;
            let pos = t * span;
            let i = (pos.floor() as usize).min(stops.len() - 2);
            mix(stops[i], stops[i + 1], pos - i as f64)
        }
    }
}

/// Background colour of canvas row `row` out of `rows`.
pub fn row_background(theme: Theme, row: u16, rows: u16) -> Rgb {
    let t = if rows > 1 {
        row as f64 / (rows - 1) as f64
    } else {
        0.0
    };
    sample(gradient(theme), t)
}
