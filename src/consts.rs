pub mod cli_consts {
    //! Console Configuration Constants
    //!
    //! This module contains the configuration constants for the console,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between workers and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // LOGIN CONFIGURATION
    // =============================================================================

    /// Phone number and one-time password constraints
    pub mod login {
        use std::time::Duration;

        /// Number of digits in a phone number.
        pub const PHONE_DIGITS: usize = 10;

        /// Number of slots in a one-time password.
        pub const OTP_LENGTH: usize = 6;

        /// Seconds before another one-time password may be requested.
        pub const RESEND_COOLDOWN_SECS: u32 = 30;

        /// Interval between resend countdown ticks (milliseconds)
        pub const COUNTDOWN_TICK_MS: u64 = 1000;

        /// Helper function to get the countdown tick interval
        pub const fn countdown_tick() -> Duration {
            Duration::from_millis(COUNTDOWN_TICK_MS)
        }
    }

    // =============================================================================
    // AUTH CLIENT CONFIGURATION
    // =============================================================================

    /// Authentication backend configuration
    pub mod auth {
        use std::time::Duration;

        /// Latency of the simulated auth backend (milliseconds)
        pub const SIMULATED_LATENCY_MS: u64 = 1500;

        /// Lifetime of a session issued by the simulated backend (seconds)
        pub const SIMULATED_SESSION_TTL_SECS: i64 = 12 * 60 * 60;

        /// Authority recorded on sessions issued by the simulated backend.
        pub const SIMULATED_AUTHORITY: &str = "propdeck-simulator";

        /// Connect and request timeout for the HTTP backend (seconds)
        pub const HTTP_TIMEOUT_SECS: u64 = 10;

        /// Helper function to get the HTTP timeout
        pub const fn http_timeout() -> Duration {
            Duration::from_secs(HTTP_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// Terminal interface timings
    pub mod ui {
        use std::time::Duration;

        /// How long the splash screen is shown (milliseconds)
        pub const SPLASH_DURATION_MS: u64 = 2000;

        /// Key event poll interval (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 100;

        pub const fn splash_duration() -> Duration {
            Duration::from_millis(SPLASH_DURATION_MS)
        }

        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }
}
