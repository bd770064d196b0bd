//! Animated stat counters shown at the top of the dashboard.

use crate::consts::cli_consts::counters::ANIMATION_STEPS;
use crate::listing::{ListingStatus, SystemStats};
use ratatui::prelude::Color;

/// A displayed number easing toward its latest value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimatedCounter {
    displayed: u64,
    target: u64,
}

impl AnimatedCounter {
    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    #[cfg(test)]
    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn set_target(&mut self, target: u64) {
        self.target = target;
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }

    /// Advances one animation step.
    ///
    /// Climbs by `ceil(delta / ANIMATION_STEPS)`, never overshooting. A lower
    /// target is applied immediately.
    pub fn step(&mut self) {
        if self.displayed < self.target {
            let delta = self.target - self.displayed;
            let increment = delta.div_ceil(ANIMATION_STEPS);
            self.displayed = (self.displayed + increment).min(self.target);
        } else {
            self.displayed = self.target;
        }
    }
}

/// The four headline counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatCounters {
    pub total: AnimatedCounter,
    pub successful: AnimatedCounter,
    pub pending: AnimatedCounter,
    pub failed: AnimatedCounter,
}

impl StatCounters {
    pub fn set_targets(&mut self, stats: &SystemStats) {
        self.total.set_target(stats.total());
        self.successful
            .set_target(stats.count(ListingStatus::Successful));
        self.pending.set_target(stats.count(ListingStatus::Pending));
        self.failed.set_target(stats.count(ListingStatus::Failed));
    }

    pub fn step(&mut self) {
        for counter in self.counters_mut() {
            counter.step();
        }
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        [self.total, self.successful, self.pending, self.failed]
            .iter()
            .all(AnimatedCounter::is_settled)
    }

    fn counters_mut(&mut self) -> [&mut AnimatedCounter; 4] {
        [
            &mut self.total,
            &mut self.successful,
            &mut self.pending,
            &mut self.failed,
        ]
    }

    /// (title, value, colour) for each counter, in display order.
    pub fn cards(&self) -> [(&'static str, u64, Color); 4] {
        [
            ("Total listings", self.total.displayed(), Color::Cyan),
            ("Successful", self.successful.displayed(), Color::Green),
            ("Pending", self.pending.displayed(), Color::Yellow),
            ("Failed", self.failed.displayed(), Color::Red),
        ]
    }
}
