//
//  vsts-client
//  api/poller.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Existence Poller
//!
//! Some operations (creating or deleting a project) are accepted by the
//! server and completed in the background. [`ExistencePoller`] waits for such
//! an operation to converge by repeatedly asking whether a named resource
//! exists until the answer matches what the caller expects.
//!
//! ## Behavior
//!
//! Each attempt sleeps for the interval first, then probes. The poller
//! settles as soon as the observed existence matches the expectation, or
//! fails with [`VstsError::Timeout`] once more than `max_attempts` probes
//! have been made. Probe errors end the wait immediately.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::time::Duration;
//! use vsts_client::api::{ExistencePoller, NoopSleeper};
//!
//! # tokio_test_block_on(async {
//! let poller = ExistencePoller::new()
//!     .with_interval(Duration::from_secs(2))
//!     .with_sleeper(Arc::new(NoopSleeper));
//!
//! let calls = AtomicU32::new(0);
//! let counter = &calls;
//! poller
//!     .wait_until("Demo", true, move || async move {
//!         Ok(counter.fetch_add(1, Ordering::SeqCst) >= 2)
//!     })
//!     .await?;
//! assert_eq!(calls.load(Ordering::SeqCst), 3);
//! # Ok::<(), vsts_client::VstsError>(())
//! # }).unwrap();
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::common::{Result, VstsError};

/// Default number of probes allowed before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default delay before each probe.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Suspends the current task between probes.
///
/// Injected into [`ExistencePoller`] so tests can run without real delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSleeper;

#[async_trait]
impl Sleeper for NoopSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Bounded wait for a resource to appear or disappear.
#[derive(Clone)]
pub struct ExistencePoller {
    max_attempts: u32,
    interval: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl Default for ExistencePoller {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExistencePoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExistencePoller")
            .field("max_attempts", &self.max_attempts)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl ExistencePoller {
    /// Creates a poller with 30 attempts, a 2 second interval and the tokio
    /// timer.
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until `probe` reports `should_exist` for `resource`.
    ///
    /// `probe` is called once per attempt and returns whether the resource
    /// currently exists. With a budget of `n` the probe runs at most `n + 1`
    /// times.
    ///
    /// # Errors
    ///
    /// - [`VstsError::Timeout`] naming `resource` when the budget runs out.
    /// - Any error returned by `probe`, unchanged.
    pub async fn wait_until<F, Fut>(
        &self,
        resource: &str,
        should_exist: bool,
        mut probe: F,
    ) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let mut attempts = 0u32;

        loop {
            self.sleeper.sleep(self.interval).await;
            let exists = probe().await?;
            attempts += 1;

            debug!(resource, attempts, exists, should_exist, "Polled resource existence");

            if exists == should_exist {
                return Ok(());
            }

            if attempts > self.max_attempts {
                warn!(resource, attempts, "Gave up waiting on resource");
                return Err(VstsError::Timeout {
                    resource: resource.to_string(),
                    attempts,
                });
            }
        }
    }
}
