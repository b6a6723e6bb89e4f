//! Numeric domains, linear scales and axis ticks.

use serde::Serialize;

/// Closed numeric interval `[min, max]` with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Used when there are no finite values at all.
    pub const UNIT: Domain = Domain { min: 0.0, max: 1.0 };

    /// Extent of the finite values. No values gives [`Domain::UNIT`]; a single distinct
    /// value `v` widens to `[v - 0.5, v + 0.5]` so the scale never divides by zero.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let extent = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            });
        match extent {
            None => Domain::UNIT,
            Some((lo, hi)) if lo == hi => Domain {
                min: lo - 0.5,
                max: hi + 0.5,
            },
            Some((lo, hi)) => Domain { min: lo, max: hi },
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Linear map from a domain onto a pixel range. The range may be inverted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: Domain,
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain.min) / self.domain.span();
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Roughly `count` round-valued ticks inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.min, self.domain.max, count)
    }

    /// Label formatter matching the tick step: fixed precision, thousands separators.
    pub fn tick_label(&self, value: f64, count: usize) -> String {
        let step = tick_step(self.domain.min, self.domain.max, count);
        format_tick(value, step)
    }
}

/// Tick layout as (first index, last index, increment). A negative increment means
/// "divide by -inc", which keeps decimal ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor() as i32;
    let error = step / 10f64.powi(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (i1, i2, inc) = if power < 0 {
        let divisor = 10f64.powi(-power) / factor;
        let mut i1 = (start * divisor).round();
        let mut i2 = (stop * divisor).round();
        if i1 / divisor < start {
            i1 += 1.0;
        }
        if i2 / divisor > stop {
            i2 -= 1.0;
        }
        (i1, i2, -divisor)
    } else {
        let multiplier = 10f64.powi(power) * factor;
        let mut i1 = (start / multiplier).round();
        let mut i2 = (stop / multiplier).round();
        if i1 * multiplier < start {
            i1 += 1.0;
        }
        if i2 * multiplier > stop {
            i2 -= 1.0;
        }
        (i1, i2, multiplier)
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let index = i1 + i as f64;
            if inc < 0.0 {
                index / -inc
            } else {
                index * inc
            }
        })
        .collect()
}

/// Absolute distance between adjacent ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || start == stop || !start.is_finite() || !stop.is_finite() {
        return 1.0;
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let (_, _, inc) = tick_spec(lo, hi, count as f64);
    if inc < 0.0 {
        1.0 / -inc
    } else {
        inc
    }
}

pub fn format_tick(value: f64, step: f64) -> String {
    let precision = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let fixed = format!("{:.*}", precision, value);
    let fixed = if fixed.starts_with('-') && fixed[1..].chars().all(|c| c == '0' || c == '.') {
        fixed[1..].to_string()
    } else {
        fixed
    };
    group_thousands(&fixed)
}

fn group_thousands(fixed: &str) -> String {
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
