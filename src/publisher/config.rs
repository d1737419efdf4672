// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Publisher configuration.

/// What happens when a handler panics during a dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// The panic unwinds out of `publish`.
    ///
    /// Handlers later in the same pass are not invoked. The publisher stays
    /// usable: no lock is held while handlers run.
    #[default]
    Propagate,

    /// Each handler runs under `catch_unwind`.
    ///
    /// A panic is logged, recorded in the
    /// [`PublishReport`](crate::PublishReport) and delivery continues with
    /// the next handler.
    Isolate,
}

/// Configuration for a [`Publisher`](crate::Publisher).
///
/// # Examples
///
/// ```
/// use publisher_lib::{FailurePolicy, Publisher, PublisherConfig};
///
/// let publisher = Publisher::with_config(
///     PublisherConfig::new()
///         .with_name("user-service")
///         .with_failure_policy(FailurePolicy::Isolate),
/// );
///
/// assert_eq!(publisher.config().name(), "user-service");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    name: String,
    failure_policy: FailurePolicy,
}

impl PublisherConfig {
    /// Name used in log fields when none is configured.
    pub const DEFAULT_NAME: &'static str = "publisher";

    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Sets the name attached to this publisher's log records.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the handler failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Returns the publisher name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the handler failure policy.
    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self::new()
    }
}
