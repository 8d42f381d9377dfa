pub mod env {
    pub const PREFIX: &str = "PFM";
    pub const SEPARATOR: &str = "__";
}

pub mod defaults {
    pub const CONFIG_FILE: &str = "config/auth";

    pub const ISSUER: &str = "personal-finance-management";
    pub const ACCESS_TIME_TO_LIVE_IN_SECONDS: i64 = 15 * 60;
    pub const REFRESH_TIME_TO_LIVE_IN_SECONDS: i64 = 7 * 24 * 60 * 60;
    pub const RESET_TIME_TO_LIVE_IN_SECONDS: i64 = 60 * 60;
    pub const PASSWORD_RESET_URL: &str = "http://localhost:3000/reset-password";

    /// Upper bound accepted for any token time to live.
    pub const MAX_TIME_TO_LIVE_IN_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

    pub const POSTGRES_MAX_CONNECTIONS: i64 = 5;
    pub const SWEEP_INTERVAL_IN_SECONDS: i64 = 60 * 60;

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@pfm.local";
        pub const TIMEOUT_IN_MILLIS: i64 = 10_000;
    }
}

pub mod test {
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
