//! Band, linear and colour scales.

/// Categorical positions across a continuous range.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(domain: impl IntoIterator<Item = impl Into<String>>, range: (f64, f64)) -> Self {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    pub fn padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    pub fn padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Same inner and outer padding.
    pub fn padding(self, padding: f64) -> Self {
        self.padding_inner(padding).padding_outer(padding)
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (start, stop) = self.range;
        (stop - start) / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `key`, `None` for keys outside the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|d| d == key)?;
        Some(self.position_at(index))
    }

    pub fn position_at(&self, index: usize) -> f64 {
        let n = self.domain.len() as f64;
        let (start, stop) = self.range;
        let step = self.step();
        let offset = (stop - start - step * (n - self.padding_inner)) / 2.0;
        start + offset + step * index as f64
    }

    /// Centre of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + self.bandwidth() / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 || !d0.is_finite() || !d1.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` round tick values spanning the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let step = tick_step(lo, hi, count);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn mix(self, other: Rgb, t: f64) -> Rgb {
        let lerp = |a: u8, b: u8| {
            (a as f64 + (b as f64 - a as f64) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }
}

/// Piecewise linear colour interpolation, clamped at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f64, Rgb)>,
}

impl ColorRamp {
    pub fn new(stops: impl IntoIterator<Item = (f64, Rgb)>) -> Self {
        let mut stops: Vec<_> = stops.into_iter().collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    pub fn color(&self, value: f64) -> Option<Rgb> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;
        if !value.is_finite() {
            return None;
        }
        if value <= first.0 {
            return Some(first.1);
        }
        if value >= last.0 {
            return Some(last.1);
        }
        self.stops.windows(2).find_map(|pair| {
            let (lo, hi) = (pair[0], pair[1]);
            (value >= lo.0 && value <= hi.0).then(|| {
                let t = if hi.0 == lo.0 { 0.0 } else { (value - lo.0) / (hi.0 - lo.0) };
                lo.1.mix(hi.1, t)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_scale_matches_padding_rules() {
        let scale = BandScale::new(["a", "b", "c"], (0.0, 100.0)).padding_inner(0.2);
        // step = 100 / (3 - 0.2) ; bandwidth = 0.8 * step
        let step = 100.0 / 2.8;
        assert!((scale.step() - step).abs() < 1e-9);
        assert!((scale.bandwidth() - step * 0.8).abs() < 1e-9);
        assert!((scale.position("a").unwrap()).abs() < 1e-9);
        let end = scale.position("c").unwrap() + scale.bandwidth();
        assert!((end - 100.0).abs() < 1e-9);
        assert_eq!(scale.position("z"), None);
    }

    #[test]
    fn outer_padding_centres_the_bands() {
        let scale = BandScale::new(["a", "b"], (0.0, 100.0)).padding(0.2);
        let first = scale.position("a").unwrap();
        let last_end = scale.position("b").unwrap() + scale.bandwidth();
        assert!((first - (100.0 - last_end)).abs() < 1e-9);
        assert!(first > 0.0);
    }

    #[test]
    fn linear_scale_maps_and_handles_flat_domain() {
        let scale = LinearScale::new((0.0, 200.0), (100.0, 0.0));
        assert_eq!(scale.scale(50.0), 75.0);
        let flat = LinearScale::new((0.0, 0.0), (100.0, 0.0));
        assert_eq!(flat.scale(0.0), 50.0);
    }

    #[test]
    fn ticks_are_round() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        assert_eq!(scale.ticks(10), (0..=10).map(|i| i as f64 * 10.0).collect::<Vec<_>>());
        let scale = LinearScale::new((0.0, 1234.0), (0.0, 1.0));
        assert_eq!(scale.ticks(5), vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0]);
    }

    #[test]
    fn ramp_interpolates_and_clamps() {
        let ramp = ColorRamp::new([(0.0, Rgb(0, 0, 0)), (1.0, Rgb(255, 255, 255))]);
        assert_eq!(ramp.color(-1.0), Some(Rgb(0, 0, 0)));
        assert_eq!(ramp.color(0.5), Some(Rgb(128, 128, 128)));
        assert_eq!(ramp.color(2.0), Some(Rgb(255, 255, 255)));
        assert_eq!(Rgb::from_hex("#409AF0"), Some(Rgb(0x40, 0x9a, 0xf0)));
        assert_eq!(Rgb(0x40, 0x9a, 0xf0).to_hex(), "#409af0");
    }
}
