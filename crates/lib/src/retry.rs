//! Bounded, immediate retry.

use std::fmt::Display;
use std::future::Future;

use tracing::debug;

/// How many times an operation may run. Attempts follow each other without delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  max_attempts: u32,
}

impl RetryPolicy {
  /// A policy allowing `max_attempts` runs; at least one run always happens.
  pub fn new(max_attempts: u32) -> Self {
    Self {
      max_attempts: max_attempts.max(1),
    }
  }

  pub fn max_attempts(&self) -> u32 {
    self.max_attempts
  }
}

/// Why the last attempt did not succeed.
#[derive(Debug)]
pub enum Failure<T, E> {
  /// The operation returned a value flagged as retryable.
  Retryable(T),
  /// The operation returned an error.
  Error(E),
}

#[derive(Debug)]
pub enum RetryOutcome<T, E> {
  Succeeded { value: T, attempts: u32 },
  Exhausted { attempts: u32, last: Option<Failure<T, E>> },
}

impl<T, E> RetryOutcome<T, E> {
  pub fn is_success(&self) -> bool {
    matches!(self, RetryOutcome::Succeeded { .. })
  }

  pub fn attempts(&self) -> u32 {
    match self {
      RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => *attempts,
    }
  }
}

/// Run `operation` until it yields a value that `is_retryable` rejects, or the
/// policy runs out of attempts. Errors always consume an attempt and are retried.
///
/// `operation` receives the 1-based attempt number.
pub async fn retry<T, E, F, Fut, P>(policy: RetryPolicy, mut operation: F, is_retryable: P) -> RetryOutcome<T, E>
where
  F: FnMut(u32) -> Fut,
  Fut: Future<Output = Result<T, E>>,
  P: Fn(&T) -> bool,
  E: Display,
{
  let mut last = None;

  for attempt in 1..=policy.max_attempts {
    match operation(attempt).await {
      Ok(value) if is_retryable(&value) => {
        debug!(attempt, "retryable response");
        last = Some(Failure::Retryable(value));
      }
      Ok(value) => {
        return RetryOutcome::Succeeded {
          value,
          attempts: attempt,
        };
      }
      Err(e) => {
        debug!(attempt, error = %e, "attempt failed");
        last = Some(Failure::Error(e));
      }
    }
  }

  RetryOutcome::Exhausted {
    attempts: policy.max_attempts,
    last,
  }
}
