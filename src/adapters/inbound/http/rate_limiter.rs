use crate::shared::Result;
use anyhow::{bail, Context};
use dashmap::DashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Request budget per client and window, written like `"60/minute"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimit {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    fn window_name(&self) -> String {
        match self.window.as_secs() {
            1 => "second".to_string(),
            60 => "minute".to_string(),
            3600 => "hour".to_string(),
            86400 => "day".to_string(),
            secs => format!("{}s", secs),
        }
    }
}

impl FromStr for RateLimit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((count, unit)) = s.split_once('/') else {
            bail!("Invalid rate limit '{}': expected '<count>/<unit>'", s);
        };

        let max_requests: u32 = count
            .trim()
            .parse()
            .with_context(|| format!("Invalid rate limit count in '{}'", s))?;
        if max_requests == 0 {
            bail!("Invalid rate limit '{}': count must be at least 1", s);
        }

        let window = match unit.trim().to_ascii_lowercase().as_str() {
            "second" => Duration::from_secs(1),
            "minute" => Duration::from_secs(60),
            "hour" => Duration::from_secs(3600),
            "day" => Duration::from_secs(86400),
            other => bail!(
                "Invalid rate limit unit '{}': expected second, minute, hour or day",
                other
            ),
        };

        Ok(Self::new(max_requests, window))
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.max_requests, self.window_name())
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// RateLimiter enforcing a fixed-window budget per client key
///
/// Each client gets its own window, opened by its first request. The count
/// resets once the window has fully elapsed. At most once per window length,
/// clients whose window has elapsed are dropped from the table.
#[derive(Debug)]
pub struct RateLimiter {
    limit: RateLimit,
    windows: DashMap<String, Window>,
    last_sweep: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            windows: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Number of clients currently holding a window
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Records one request and reports whether it is within budget
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    pub fn check_at(&self, client: &str, now: Instant) -> bool {
        // Must run before the entry below: the sweep locks every shard
        self.sweep_expired(now);

        let mut window = self.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.saturating_duration_since(window.started) >= self.limit.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.limit.max_requests {
            return false;
        }
        window.count += 1;
        true
    }

    fn sweep_expired(&self, now: Instant) {
        // A sweep already in progress on another thread is enough
        let Ok(mut last_sweep) = self.last_sweep.try_lock() else {
            return;
        };
        if now.saturating_duration_since(*last_sweep) < self.limit.window {
            return;
        }
        *last_sweep = now;

        let window = self.limit.window;
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < window);
        tracing::debug!(
            dropped = before.saturating_sub(self.windows.len()),
            "swept expired rate limit windows"
        );
    }
}
