//! Data-to-pixel mappings for the two chart axes and their tick generators.
//!
//! Both scales map a degenerate domain (start == end) to the middle of the
//! pixel range instead of dividing by zero.

use crate::time_utils::{days_between, format_tick_label, is_sunday};
use chrono::{Datelike, NaiveDate};

const SQRT_50: f64 = 7.0710678118654755;
const SQRT_10: f64 = 3.1622776601683795;
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Fractional digits needed to print any finite f64 exactly (the smallest subnormal has 1074)
const EXACT_DIGITS: usize = 1100;

/// Continuous linear scale from a value domain to a pixel range.
/// The range may be inverted (`range.0 > range.1`) for vertical axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Round ticks (multiples of 1, 2 or 5 × 10^k) inside the domain, about `count` of them
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = ordered(self.domain);
        if start == stop {
            return vec![start];
        }
        match tick_layout(start, stop, count as f64) {
            Some((i1, i2, TickIncrement::Divide(inv))) => (i1..=i2).map(|i| i as f64 / inv).collect(),
            Some((i1, i2, TickIncrement::Multiply(inc))) => (i1..=i2).map(|i| i as f64 * inc).collect(),
            None => Vec::new(),
        }
    }

    /// Distance between consecutive ticks, `None` when no ticks can be generated
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (start, stop) = ordered(self.domain);
        match tick_layout(start, stop, count as f64)? {
            (_, _, TickIncrement::Divide(inv)) => Some(1.0 / inv),
            (_, _, TickIncrement::Multiply(inc)) => Some(inc),
        }
    }

    /// Format a tick with just enough decimals for the tick step, grouped by thousands
    pub fn format_tick(&self, value: f64, count: usize) -> String {
        let precision = self.tick_step(count).map(precision_for_step).unwrap_or(0);
        format_grouped(value, precision)
    }
}

/// Time scale over calendar days
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let linear = LinearScale::new((day_number(domain.0), day_number(domain.1)), range);
        Self { domain, linear }
    }

    pub fn scale(&self, date: NaiveDate) -> f64 {
        self.linear.scale(day_number(date))
    }

    /// Calendar-aligned ticks, about `count` of them
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (start, stop) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let span = days_between(start, stop);
        if span == 0 {
            return vec![start];
        }
        if count == 0 {
            return Vec::new();
        }
        let interval = TickInterval::choose(span as f64, count);
        start.iter_days().take_while(|d| *d <= stop).filter(|d| interval.contains(*d)).collect()
    }

    pub fn format_tick(&self, date: NaiveDate) -> String {
        format_tick_label(date)
    }
}

/// Calendar interval between time ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInterval {
    /// Every n-th day of the month, counting from the 1st
    Days(u32),
    /// Sundays
    Week,
    /// First day of every n-th month, counting from January
    Months(u32),
    /// January 1st of every n-th year
    Years(i32),
}

impl TickInterval {
    const CANDIDATES: [TickInterval; 5] = [
        TickInterval::Days(1),
        TickInterval::Days(2),
        TickInterval::Week,
        TickInterval::Months(1),
        TickInterval::Months(3),
    ];

    /// Approximate length in days
    pub fn duration_days(&self) -> f64 {
        match self {
            Self::Days(n) => *n as f64,
            Self::Week => 7.0,
            Self::Months(n) => 30.0 * *n as f64,
            Self::Years(n) => 365.0 * *n as f64,
        }
    }

    /// Pick the interval whose length is closest (by ratio) to `span_days / count`
    pub fn choose(span_days: f64, count: usize) -> Self {
        let target = span_days / count.max(1) as f64;
        let candidates = &Self::CANDIDATES;
        let i = candidates.iter().position(|c| c.duration_days() > target).unwrap_or(candidates.len());
        if i == 0 {
            return Self::Days(1);
        }
        if i == candidates.len() {
            if target < TickInterval::Years(1).duration_days() {
                let previous = candidates[i - 1];
                let year = TickInterval::Years(1);
                return if target / previous.duration_days() < year.duration_days() / target {
                    previous
                } else {
                    year
                };
            }
            let years = span_days / 365.0;
            let step = LinearScale::new((0.0, years), (0.0, 1.0)).tick_step(count).unwrap_or(1.0);
            return Self::Years(step.round().max(1.0) as i32);
        }
        let (lower, upper) = (candidates[i - 1], candidates[i]);
        if target / lower.duration_days() < upper.duration_days() / target {
            lower
        } else {
            upper
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Days(n) => (date.day() - 1) % n == 0,
            Self::Week => is_sunday(date),
            Self::Months(n) => date.day() == 1 && date.month0() % n == 0,
            Self::Years(n) => date.ordinal() == 1 && date.year() % n == 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TickIncrement {
    /// Tick i sits at `i / inv` (sub-unit steps, avoids float drift)
    Divide(f64),
    /// Tick i sits at `i * inc`
    Multiply(f64),
}

fn tick_layout(start: f64, stop: f64, count: f64) -> Option<(i64, i64, TickIncrement)> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() || start >= stop {
        return None;
    }
    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10f64.powi(power as i32);
    let factor = if error >= SQRT_50 {
        10.0
    } else if error >= SQRT_10 {
        5.0
    } else if error >= SQRT_2 {
        2.0
    } else {
        1.0
    };
    let (i1, i2, increment) = if power < 0.0 {
        let inv = 10f64.powi(-power as i32) / factor;
        let mut i1 = (start * inv).round();
        let mut i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        (i1, i2, TickIncrement::Divide(inv))
    } else {
        let inc = 10f64.powi(power as i32) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, TickIncrement::Multiply(inc))
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_layout(start, stop, count * 2.0);
    }
    if i2 < i1 {
        return None;
    }
    Some((i1 as i64, i2 as i64, increment))
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn precision_for_step(step: f64) -> usize {
    let exponent = step.abs().log10().floor();
    if exponent.is_finite() && exponent < 0.0 { (-exponent) as usize } else { 0 }
}

/// Fixed-point format rounding exact ties away from zero, as `Number.prototype.toFixed` does.
/// Plain `{:.N}` rounds ties to even, so `0.125` would become `0.12` instead of `0.13`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let rounded = format!("{:.*}", digits, value);
    if !value.is_finite() || digits >= EXACT_DIGITS {
        return rounded;
    }
    // every finite f64 has a terminating expansion within EXACT_DIGITS fractional digits
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let Some((int_part, frac_part)) = exact.split_once('.') else {
        return rounded;
    };
    let (kept, rest) = frac_part.split_at(digits);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return rounded;
    }

    let mut magnitude: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();
    let mut carry = true;
    for digit in magnitude.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        magnitude.insert(0, b'1');
    }

    let split = magnitude.len() - digits;
    let mut out = String::with_capacity(magnitude.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(magnitude[..split].iter().map(|&b| b as char));
    if digits > 0 {
        out.push('.');
        out.extend(magnitude[split..].iter().map(|&b| b as char));
    }
    out
}

/// Fixed-point format with `,` thousands separators and a typographic minus
pub fn format_grouped(value: f64, precision: usize) -> String {
    let fixed = to_fixed(value.abs(), precision);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        grouped.insert(0, '\u{2212}');
    }
    grouped
}
