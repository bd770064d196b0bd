pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Timing and sizing constants for the dashboard controller, grouped by
    //! functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the completion channel between request tasks and the UI loop.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // LISTINGS
    // =============================================================================

    /// Page size used when neither the config nor the command line overrides it.
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    /// Text shown in place of a missing optional field.
    pub const PLACEHOLDER: &str = "Not specified";

    // =============================================================================
    // TIMING CONFIGURATION
    // =============================================================================

    pub mod timing {
        use std::time::Duration;

        /// Interval of the recurring stats + health poll (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 30_000;

        /// Refresh rate of the clock display (milliseconds)
        pub const CLOCK_INTERVAL_MS: u64 = 1_000;

        /// Delay before refreshing after a mutation, giving the backend time to apply it
        pub const DEFERRED_REFRESH_MS: u64 = 1_000;

        /// Lifetime of a transient notification (milliseconds)
        pub const NOTIFICATION_TTL_MS: u64 = 5_000;

        /// How long the UI loop waits for a key press before redrawing
        pub const INPUT_POLL_MS: u64 = 50;

        /// Connect and request timeout for backend calls (seconds)
        pub const HTTP_TIMEOUT_SECS: u64 = 10;

        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }

        pub const fn clock_interval() -> Duration {
            Duration::from_millis(CLOCK_INTERVAL_MS)
        }

        pub const fn deferred_refresh() -> Duration {
            Duration::from_millis(DEFERRED_REFRESH_MS)
        }

        pub const fn notification_ttl() -> Duration {
            Duration::from_millis(NOTIFICATION_TTL_MS)
        }

        pub const fn input_poll() -> Duration {
            Duration::from_millis(INPUT_POLL_MS)
        }

        pub const fn http_timeout() -> Duration {
            Duration::from_secs(HTTP_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // COUNTER ANIMATION
    // =============================================================================

    pub mod counters {
        use std::time::Duration;

        /// Number of increments a counter takes to reach its target
        pub const ANIMATION_STEPS: u64 = 20;

        /// Delay between two increments (milliseconds)
        pub const STEP_INTERVAL_MS: u64 = 50;

        pub const fn step_interval() -> Duration {
            Duration::from_millis(STEP_INTERVAL_MS)
        }
    }
}
