//! Pan and zoom arithmetic for continuous domains, plus the smooth transition
//! between two domains.
//!
//! Pan and zoom work in the transformed space of the scale family, so log and
//! power scales zoom around the anchor the way the eye expects.

use crate::scale::Transform;

/// Shifts a domain by `delta` times its (transformed) span.
pub fn pan(domain: [f64; 2], delta: f64, transform: Transform) -> [f64; 2] {
    let negative = domain[0] < 0.0;
    let d0 = transform.forward(domain[0], negative);
    let d1 = transform.forward(domain[1], negative);
    let dd = (d1 - d0) * delta;
    [
        transform.backward(d0 - dd, negative),
        transform.backward(d1 - dd, negative),
    ]
}

/// Scales a domain around `anchor`, or around its center if there is none.
pub fn zoom(domain: [f64; 2], anchor: Option<f64>, scale: f64, transform: Transform) -> [f64; 2] {
    let negative = domain[0] < 0.0;
    let d0 = transform.forward(domain[0], negative);
    let d1 = transform.forward(domain[1], negative);
    let da = match anchor {
        Some(anchor) => transform.forward(anchor, negative),
        None => (d0 + d1) / 2.0,
    };
    [
        transform.backward(da + (d0 - da) * scale, negative),
        transform.backward(da + (d1 - da) * scale, negative),
    ]
}

/// Fits `range` inside `[min, max]` keeping its span. A range at least as
/// wide as the extent becomes the extent.
pub fn clamp_range(range: [f64; 2], min: f64, max: f64) -> [f64; 2] {
    let (lo, hi) = if range[1] < range[0] {
        (range[1], range[0])
    } else {
        (range[0], range[1])
    };
    let span = hi - lo;
    if span >= max - min {
        [min, max]
    } else {
        let lo = lo.max(min).min(max - span);
        [lo, lo + span]
    }
}

pub fn cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Exponential interpolation. Falls back to linear when either end is zero
/// or the ends differ in sign.
pub fn eerp(a: f64, b: f64, t: f64) -> f64 {
    if a * b > 0.0 {
        a.powf(1.0 - t) * b.powf(t)
    } else {
        a + (b - a) * t
    }
}

/// An in-flight animated domain change. Widths interpolate exponentially and
/// the center follows with the same weight, which keeps deep zooms smooth.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainTransition {
    from: [f64; 2],
    to: [f64; 2],
    duration_ms: f64,
    started_at: Option<f64>,
}

impl DomainTransition {
    pub fn new(from: [f64; 2], to: [f64; 2], duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            started_at: None,
        }
    }

    pub fn target(&self) -> [f64; 2] {
        self.to
    }

    /// Domain at `now_ms`, and whether the transition has finished. The first
    /// call marks the start.
    pub fn step(&mut self, now_ms: f64) -> ([f64; 2], bool) {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let elapsed = now_ms - started_at;
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return (self.to, true);
        }
        let t = cubic_in_out((elapsed / self.duration_ms).clamp(0.0, 1.0));
        (self.domain_at(t), false)
    }

    /// Interpolated domain for an eased `t`
    pub fn domain_at(&self, t: f64) -> [f64; 2] {
        let [from, to] = [self.from, self.to];
        let fw = from[1] - from[0];
        let tw = to[1] - to[0];
        let fc = from[0] + fw / 2.0;
        let tc = to[0] + tw / 2.0;

        let w = eerp(fw, tw, t);
        let wt = if fw == tw { t } else { (fw - w) / (fw - tw) };
        let c = wt * tc + (1.0 - wt) * fc;

        // Endpoints that do not move are copied to keep their precision.
        [
            if from[0] == to[0] { from[0] } else { c - w / 2.0 },
            if from[1] == to[1] { from[1] } else { c + w / 2.0 },
        ]
    }
}
