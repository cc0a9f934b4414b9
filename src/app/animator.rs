//! Header counter animation.
//!
//! Counters climb from zero to their targets in `steps` equal increments spread
//! over `duration_ms`. The plugin drives the animation with Zellij timers: the
//! handler schedules one timer per step and calls [`StatsAnimator::tick`] when
//! it fires.

/// Value of a counter with `target` at step `step` of `steps`.
///
/// `floor(target * step / steps)`, computed without overflow and clamped to
/// `target`.
#[must_use]
pub fn step_value(target: u64, step: u32, steps: u32) -> u64 {
    if steps == 0 || step >= steps {
        return target;
    }
    let value = u128::from(target) * u128::from(step) / u128::from(steps);
    u64::try_from(value).map_or(target, |v| v.min(target))
}

/// Animates a fixed set of counters towards their targets.
#[derive(Debug, Clone, Default)]
pub struct StatsAnimator {
    targets: Vec<u64>,
    values: Vec<u64>,
    step: u32,
    steps: u32,
    duration_ms: u64,
    ticking: bool,
}

impl StatsAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the animation.
    ///
    /// Returns `true` when the caller must schedule the first tick. A restart
    /// while a timer chain is already live reuses that chain and returns
    /// `false`, so at most one chain ever exists. With `steps == 0` the
    /// counters jump to their targets and no tick is needed.
    pub fn start(&mut self, targets: &[u64], duration_ms: u64, steps: u32) -> bool {
        self.targets = targets.to_vec();
        self.steps = steps;
        self.duration_ms = duration_ms;
        self.step = 0;

        if steps == 0 {
            self.values = self.targets.clone();
            self.ticking = false;
            return false;
        }

        self.values = vec![0; self.targets.len()];
        if self.ticking {
            tracing::debug!("animation restarted on live timer chain");
            return false;
        }
        self.ticking = true;
        true
    }

    /// Advances one step. Returns `true` while another tick is needed.
    pub fn tick(&mut self) -> bool {
        if !self.ticking {
            return false;
        }

        self.step = self.step.saturating_add(1).min(self.steps);
        self.values = self
            .targets
            .iter()
            .map(|&target| step_value(target, self.step, self.steps))
            .collect();

        if self.step >= self.steps {
            self.ticking = false;
        }
        self.ticking
    }

    /// Current counter values, in the order the targets were given.
    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ticking
    }

    /// Delay between ticks, in seconds.
    #[must_use]
    pub fn interval_secs(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        (self.duration_ms as f64 / f64::from(self.steps)) / 1000.0
    }
}
