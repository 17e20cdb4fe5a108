use std::collections::HashMap;
use std::sync::OnceLock;

use image::Rgba;
use image::imageops::ColorMap;

/// The fixed 256-color Plan 9 palette.
///
/// RGB space is diced into 4×4×4 subcubes with four intensity shades in each, giving 16 grays
/// and a broad spread of saturated colors. Index 0 is black and index 255 is white.
#[derive(Debug)]
pub struct Plan9Palette {
    colors: [[u8; 3]; 256],
    exact: HashMap<[u8; 3], u8>,
}

impl Plan9Palette {
    /// Shared palette instance.
    pub fn get() -> &'static Plan9Palette {
        static PALETTE: OnceLock<Plan9Palette> = OnceLock::new();
        PALETTE.get_or_init(Plan9Palette::build)
    }

    fn build() -> Self {
        let mut colors = [[0u8; 3]; 256];
        for r in 0..4i32 {
            for v in 0..4i32 {
                let base = (r * 4 + v) * 16;
                for g in 0..4i32 {
                    for b in 0..4i32 {
                        let slot = base + ((v - r + g * 4 + b) & 15);
                        let den = r.max(g).max(b);
                        colors[slot as usize] = if den == 0 {
                            let gray = (17 * v) as u8;
                            [gray, gray, gray]
                        } else {
                            let num = 17 * (4 * den + v);
                            [
                                (r * num / den) as u8,
                                (g * num / den) as u8,
                                (b * num / den) as u8,
                            ]
                        };
                    }
                }
            }
        }

        let mut exact = HashMap::with_capacity(256);
        for (i, c) in colors.iter().enumerate().rev() {
            exact.insert(*c, i as u8);
        }
        Self { colors, exact }
    }

    /// RGB triples in index order.
    pub fn colors(&self) -> &[[u8; 3]; 256] {
        &self.colors
    }

    /// Palette index closest to `rgb` in Euclidean RGB space. Ties go to the lower index.
    pub fn nearest(&self, rgb: [u8; 3]) -> u8 {
        if let Some(&i) = self.exact.get(&rgb) {
            return i;
        }
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (i, c) in self.colors.iter().enumerate() {
            let dist = c
                .iter()
                .zip(rgb)
                .map(|(&p, q)| {
                    let d = i32::from(p) - i32::from(q);
                    (d * d) as u32
                })
                .sum::<u32>();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best as u8
    }

    /// Opaque RGBA color at `index`.
    pub fn rgba(&self, index: u8) -> [u8; 4] {
        let [r, g, b] = self.colors[usize::from(index)];
        [r, g, b, 0xff]
    }
}

impl ColorMap for Plan9Palette {
    type Color = Rgba<u8>;

    fn index_of(&self, color: &Rgba<u8>) -> usize {
        let [r, g, b, _] = color.0;
        usize::from(self.nearest([r, g, b]))
    }

    fn lookup(&self, index: usize) -> Option<Rgba<u8>> {
        let index = u8::try_from(index).ok()?;
        Some(Rgba(self.rgba(index)))
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        let [r, g, b, _] = color.0;
        *color = Rgba(self.rgba(self.nearest([r, g, b])));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/palette.rs"]
mod tests;
