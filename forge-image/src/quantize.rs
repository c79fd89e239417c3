//! Median-cut color quantization.

use forge_core::Rgb;

/// A quantized color and the number of samples it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub rgb: Rgb,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Red,
    Green,
    Blue,
}

impl Axis {
    fn of(self, c: &Rgb) -> u8 {
        match self {
            Axis::Red => c.r,
            Axis::Green => c.g,
            Axis::Blue => c.b,
        }
    }
}

/// Per-channel `(min, max)` of a set of colors.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    r: (u8, u8),
    g: (u8, u8),
    b: (u8, u8),
}

impl Bounds {
    fn of(colors: &[Rgb]) -> Self {
        let mut bounds = Bounds {
            r: (u8::MAX, 0),
            g: (u8::MAX, 0),
            b: (u8::MAX, 0),
        };
        for c in colors {
            bounds.r = (bounds.r.0.min(c.r), bounds.r.1.max(c.r));
            bounds.g = (bounds.g.0.min(c.g), bounds.g.1.max(c.g));
            bounds.b = (bounds.b.0.min(c.b), bounds.b.1.max(c.b));
        }
        bounds
    }

    fn ranges(&self) -> (u32, u32, u32) {
        let span = |(lo, hi): (u8, u8)| u32::from(hi.saturating_sub(lo));
        (span(self.r), span(self.g), span(self.b))
    }

    fn volume(&self) -> u32 {
        let (r, g, b) = self.ranges();
        r * g * b
    }

    /// Channel with the widest range; ties go to red, then green.
    fn longest_axis(&self) -> Axis {
        let (r, g, b) = self.ranges();
        if r >= g && r >= b {
            Axis::Red
        } else if g >= b {
            Axis::Green
        } else {
            Axis::Blue
        }
    }

    fn is_flat(&self) -> bool {
        self.ranges() == (0, 0, 0)
    }
}

struct ColorBox {
    colors: Vec<Rgb>,
    bounds: Bounds,
}

impl ColorBox {
    fn new(colors: Vec<Rgb>) -> Self {
        let bounds = Bounds::of(&colors);
        Self { colors, bounds }
    }

    fn volume(&self) -> u32 {
        self.bounds.volume()
    }

    /// A box of identical colors would only split into copies of itself.
    fn is_splittable(&self) -> bool {
        self.colors.len() > 1 && !self.bounds.is_flat()
    }

    fn split(mut self) -> (ColorBox, ColorBox) {
        let axis = self.bounds.longest_axis();
        self.colors.sort_by_key(|c| axis.of(c));
        let right = self.colors.split_off(self.colors.len() / 2);
        (ColorBox::new(self.colors), ColorBox::new(right))
    }

    fn average(&self) -> Rgb {
        let n = self.colors.len().max(1) as f64;
        let (r, g, b) = self.colors.iter().fold((0u64, 0u64, 0u64), |(r, g, b), c| {
            (r + u64::from(c.r), g + u64::from(c.g), b + u64::from(c.b))
        });
        let mean = |sum: u64| (sum as f64 / n).round() as u8;
        Rgb::new(mean(r), mean(g), mean(b))
    }
}

/// Reduce `pixels` to at most `target_colors` clusters.
///
/// The box with the largest RGB volume is split at the median of its widest
/// channel until `target_colors` boxes exist or no box can be split, so
/// low-diversity input yields fewer clusters than requested.
pub fn median_cut(pixels: &[Rgb], target_colors: usize) -> Vec<Cluster> {
    if pixels.is_empty() || target_colors == 0 {
        return Vec::new();
    }

    let mut boxes = vec![ColorBox::new(pixels.to_vec())];

    while boxes.len() < target_colors {
        // stable, so equal volumes keep their creation order
        boxes.sort_by(|a, b| b.volume().cmp(&a.volume()));
        let Some(pos) = boxes.iter().position(ColorBox::is_splittable) else {
            break;
        };
        let (left, right) = boxes.remove(pos).split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes
        .iter()
        .map(|b| Cluster {
            rgb: b.average(),
            count: b.colors.len(),
        })
        .collect()
}
