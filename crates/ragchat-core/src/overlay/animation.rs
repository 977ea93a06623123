//! Drawer slide animation.
//!
//! The animation is an effect of the overlay state: the controller re-targets
//! it on every logical change and the render layer samples it. Nothing reads
//! the animated value back to decide what is open.

use std::time::{Duration, Instant};

/// A CSS-style cubic Bézier timing curve through (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    /// React Native's `Easing.ease`, i.e. `cubic-bezier(0.42, 0, 1, 1)`.
    ///
    /// This is the curve the drawer's timing animation asks for explicitly;
    /// it is not `Animated.timing`'s implicit default (`inOut(ease)`).
    pub fn ease() -> Self {
        Self::new(0.42, 0.0, 1.0, 1.0)
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Solves the curve parameter for `x` (Newton first, bisection fallback).
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-6;

        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < EPSILON {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while hi - lo > EPSILON {
            let value = self.sample_x(t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Eased progress for linear progress `x` in `[0, 1]`.
    pub fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.sample_y(self.solve_t(x))
    }
}

/// Horizontal offset of the history drawer, interpolated over time.
#[derive(Debug, Clone)]
pub struct DrawerAnimation {
    from: f32,
    to: f32,
    started_at: Option<Instant>,
    duration: Duration,
    curve: CubicBezier,
}

impl DrawerAnimation {
    /// Creates an animation resting at `offset`.
    pub fn resting(offset: f32, duration: Duration) -> Self {
        Self {
            from: offset,
            to: offset,
            started_at: None,
            duration,
            curve: CubicBezier::ease(),
        }
    }

    /// Starts moving toward `target` from wherever the drawer is at `now`.
    pub fn retarget(&mut self, target: f32, now: Instant) {
        if target == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started_at = Some(now);
    }

    /// Offset the drawer should be drawn at, at time `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return self.to;
        };
        if self.duration.is_zero() {
            return self.to;
        }

        let elapsed = now.saturating_duration_since(started_at);
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        if progress >= 1.0 {
            return self.to;
        }
        let eased = self.curve.apply(progress) as f32;
        self.from + (self.to - self.from) * eased
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        match self.started_at {
            None => true,
            Some(started_at) => now.saturating_duration_since(started_at) >= self.duration,
        }
    }
}
