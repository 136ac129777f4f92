//! Keeps a host's commit message in the shape of the configured template
//!
//! The driver owns everything around the pure template engine: reading the
//! branch and message from the host, reloading configuration for every
//! operation, bounding external suggestion requests, and debouncing bursts
//! of edits.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::branch_naming::BranchParts;
use crate::config::ConfigSource;
use crate::error::{CommitFmtError, Result};
use crate::host::{MessageHost, StateChange};
use crate::suggest::SuggestionProvider;
use crate::template::{generate_message, is_compatible};

/// Default quiet period before reacting to message edits
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Idle,
    /// A suggestion request is running
    Generating,
    /// The last suggestion was applied to the message
    Ready,
}

/// Result of one pass over the host's message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No branch is checked out, nothing to format
    NoBranch,
    Unchanged,
    Rewritten,
}

pub struct MessageDriver<H, C> {
    host: H,
    config: C,
    status: watch::Sender<DriverStatus>,
    in_flight: AtomicBool,
}

/// Releases the single-flight slot, even when the request future is dropped
struct InFlightGuard<'a> {
    in_flight: &'a AtomicBool,
    status: &'a watch::Sender<DriverStatus>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.status.send_if_modified(|status| {
            if *status == DriverStatus::Generating {
                *status = DriverStatus::Idle;
                true
            } else {
                false
            }
        });
        self.in_flight.store(false, Ordering::Release);
    }
}

impl<H: MessageHost, C: ConfigSource> MessageDriver<H, C> {
    pub fn new(host: H, config: C) -> Self {
        let (status, _) = watch::channel(DriverStatus::Idle);
        Self {
            host,
            config,
            status,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn status(&self) -> DriverStatus {
        *self.status.borrow()
    }

    pub fn status_updates(&self) -> watch::Receiver<DriverStatus> {
        self.status.subscribe()
    }

    /// Structure `message` for the current branch
    ///
    /// Returns `None` when no branch is checked out.
    pub fn format_message(&self, message: &str) -> Result<Option<String>> {
        let Some(branch) = self.host.current_branch_name()? else {
            return Ok(None);
        };
        let config = self.config.load()?;
        let parts = BranchParts::parse(&branch, &config.separator);

        Ok(Some(generate_message(&config, &parts, message)))
    }

    /// Whether the host's message already matches the template
    ///
    /// Returns `None` when no branch is checked out.
    pub fn check_message(&self) -> Result<Option<bool>> {
        let Some(branch) = self.host.current_branch_name()? else {
            return Ok(None);
        };
        let config = self.config.load()?;
        let parts = BranchParts::parse(&branch, &config.separator);
        let message = self.host.current_message()?;

        Ok(Some(is_compatible(&config.template, &parts, &message)))
    }

    /// Rewrite the host's message when it does not match the template yet
    pub fn update_message_field(&self) -> Result<UpdateOutcome> {
        let current = self.host.current_message()?;
        let Some(updated) = self.format_message(&current)? else {
            tracing::debug!("no branch checked out, leaving message alone");
            return Ok(UpdateOutcome::NoBranch);
        };

        if updated == current {
            return Ok(UpdateOutcome::Unchanged);
        }

        self.host.set_current_message(&updated)?;
        tracing::info!("commit message rewritten to match template");
        Ok(UpdateOutcome::Rewritten)
    }

    /// Ask `provider` for a message, structure it and hand it to the host
    ///
    /// Only one request runs at a time; a concurrent call fails with
    /// `SuggestionInFlight`. A request exceeding `timeout` is cancelled and
    /// fails with `SuggestionTimeout`. Without a branch the suggestion is
    /// written as received.
    pub async fn generate_with_suggestion(
        &self,
        provider: &dyn SuggestionProvider,
        timeout: Duration,
    ) -> Result<String> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CommitFmtError::SuggestionInFlight);
        }
        let _guard = InFlightGuard {
            in_flight: &self.in_flight,
            status: &self.status,
        };
        self.status.send_replace(DriverStatus::Generating);

        let suggestion = match tokio::time::timeout(timeout, provider.suggest()).await {
            Ok(suggestion) => suggestion?,
            Err(_) => {
                tracing::warn!(?timeout, "suggestion request timed out");
                return Err(CommitFmtError::SuggestionTimeout(timeout));
            }
        };

        let message = self.format_message(&suggestion)?.unwrap_or(suggestion);
        self.host.set_current_message(&message)?;
        self.status.send_replace(DriverStatus::Ready);

        Ok(message)
    }

    /// Keep the host's message formatted until `shutdown` resolves
    ///
    /// Repository changes are handled right away. Message edits wait for
    /// `debounce` without further edits.
    pub async fn watch<F>(&self, debounce: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut changes = self.host.subscribe();
        tokio::pin!(shutdown);

        self.update_and_log();

        let mut pending: Option<Instant> = None;
        loop {
            let deadline = pending;
            tokio::select! {
                _ = &mut shutdown => break,
                change = changes.recv() => match change {
                    Ok(StateChange::Repository) => {
                        pending = None;
                        self.update_and_log();
                    }
                    Ok(StateChange::Message) => {
                        pending = Some(Instant::now() + debounce);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "missed change notifications");
                        pending = Some(Instant::now() + debounce);
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    pending = None;
                    self.update_and_log();
                }
            }
        }

        tracing::debug!("stopped watching");
    }

    fn update_and_log(&self) {
        match self.update_message_field() {
            Ok(outcome) => tracing::debug!(?outcome, "message checked"),
            Err(e) => tracing::warn!("failed to update commit message: {}", e),
        }
    }
}
