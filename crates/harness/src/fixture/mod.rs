//! Fixture lifecycle management.
//!
//! A [`FixturePlan`] declares a chain of dependent resources (user → post →
//! comment). The [`FixtureManager`] creates the chain in order, injecting each
//! parent id into its child's payload, and deletes the owned records in
//! reverse order afterwards.
//!
//! # State machine
//!
//! ```text
//! Uncreated → Creating → Ready → TearingDown → Destroyed
//!                 ↘                  ↘
//!                  Error              Error
//! ```
//!
//! `Error` is absorbing. Teardown of a `Destroyed` chain is a no-op.
//!
//! # Example
//!
//! ```rust,no_run
//! use apicheck_harness::fixture::{FixtureManager, FixturePlan};
//! use apicheck_harness::{HarnessConfig, ResourceClient, ResourceKind};
//!
//! # async fn run() -> apicheck_harness::HarnessResult<()> {
//! let client = ResourceClient::new(&HarnessConfig::from_env()?)?;
//! let manager = FixtureManager::new(client);
//!
//! let post_id = manager
//!     .scoped(&FixturePlan::user_post(), |chain| async move {
//!         chain.id(ResourceKind::Post)
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod plan;

pub use plan::{FixtureLink, FixturePlan};

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use http::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::ResourceClient;
use crate::error::{FixtureError, HarnessError, HarnessResult};
use crate::factory::factory_for;
use crate::resources::{ResourceId, ResourceKind};

/// Lifecycle state of a fixture chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainState {
    /// Nothing created yet.
    Uncreated,
    /// Setup in progress.
    Creating,
    /// Every link exists; ids are available.
    Ready,
    /// Teardown in progress.
    TearingDown,
    /// Every owned record is gone.
    Destroyed,
    /// Setup or teardown failed. Absorbing.
    Error,
}

impl ChainState {
    /// Returns true if the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: ChainState) -> bool {
        use ChainState::*;
        matches!(
            (self, next),
            (Uncreated, Creating)
                | (Creating, Ready)
                | (Creating, Error)
                | (Ready, TearingDown)
                | (TearingDown, Destroyed)
                | (TearingDown, Error)
        )
    }

    /// Returns the lowercase state name.
    pub fn as_str(self) -> &'static str {
        match self {
            ChainState::Uncreated => "uncreated",
            ChainState::Creating => "creating",
            ChainState::Ready => "ready",
            ChainState::TearingDown => "tearingdown",
            ChainState::Destroyed => "destroyed",
            ChainState::Error => "error",
        }
    }
}

impl fmt::Display for ChainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource created by the harness, as returned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRecord {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Server-assigned id.
    pub id: ResourceId,
    /// The full record from the `201` response.
    pub body: Value,
}

/// A set of created resources threaded from setup into the test body.
///
/// The chain is a value: the body receives a snapshot and cannot change ids.
#[derive(Debug, Clone)]
pub struct FixtureChain {
    state: ChainState,
    anchor: Option<(ResourceKind, ResourceId)>,
    records: Vec<FixtureRecord>,
}

impl FixtureChain {
    fn new(anchor: Option<(ResourceKind, ResourceId)>) -> Self {
        Self {
            state: ChainState::Uncreated,
            anchor,
            records: Vec::new(),
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Returns the most recently created id of `kind`, falling back to the anchor.
    pub fn id(&self, kind: ResourceKind) -> Option<ResourceId> {
        self.records
            .iter()
            .rev()
            .find(|r| r.kind == kind)
            .map(|r| r.id)
            .or_else(|| self.anchor.filter(|(k, _)| *k == kind).map(|(_, id)| id))
    }

    /// Returns every owned id of `kind`, in creation order.
    pub fn ids(&self, kind: ResourceKind) -> Vec<ResourceId> {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.id)
            .collect()
    }

    /// Returns the record of `kind` created last.
    pub fn record(&self, kind: ResourceKind) -> Option<&FixtureRecord> {
        self.records.iter().rev().find(|r| r.kind == kind)
    }

    /// Returns the owned records in creation order.
    pub fn records(&self) -> &[FixtureRecord] {
        &self.records
    }

    /// Returns the externally owned parent this chain hangs off, if any.
    pub fn anchor(&self) -> Option<(ResourceKind, ResourceId)> {
        self.anchor
    }

    fn transition(&mut self, to: ChainState) -> Result<(), FixtureError> {
        if !self.state.can_transition_to(to) {
            return Err(FixtureError::IllegalTransition {
                from: self.state,
                to,
            });
        }
        debug!(from = %self.state, to = %to, "Fixture chain transition");
        self.state = to;
        Ok(())
    }
}

/// A record that could not be confirmed deleted during teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWarning {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Resource id.
    pub id: ResourceId,
    /// Response status, or `None` for transport failures.
    pub status: Option<u16>,
    /// Description of the failure.
    pub reason: String,
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to delete {} {}: {}", self.kind, self.id, self.reason)
    }
}

/// Outcome of a teardown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Records confirmed deleted by this teardown (`204`).
    pub deleted: usize,
    /// Records that were already gone (`404`).
    pub already_gone: usize,
    /// Records that could not be confirmed deleted.
    pub warnings: Vec<CleanupWarning>,
}

impl TeardownReport {
    /// Returns true if every record is confirmed gone.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Creates fixture chains and guarantees their cleanup.
#[derive(Debug, Clone)]
pub struct FixtureManager {
    client: ResourceClient,
}

impl FixtureManager {
    /// Creates a manager issuing requests through `client`.
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Returns the underlying resource client.
    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    /// Creates every link of `plan` in order.
    ///
    /// The plan is validated first, so a missing dependency fails before any
    /// request. On a failed step the records created so far are reported in
    /// [`FixtureError::Setup`] and left in place; pass them to
    /// [`FixtureManager::teardown_records`] to remove them.
    pub async fn setup(&self, plan: &FixturePlan) -> HarnessResult<FixtureChain> {
        plan.validate()?;

        let mut chain = FixtureChain::new(plan.anchor());
        chain.transition(ChainState::Creating)?;

        for link in plan.links() {
            let parent = link.kind.parent().and_then(|p| chain.id(p));
            let payload = factory_for(link.kind, parent).create(&link.overrides)?;

            let response = match self.client.create(link.kind, &payload).await {
                Ok(response) => response,
                Err(e) => {
                    return Err(self.fail_setup(
                        &mut chain,
                        link.kind,
                        0,
                        e.to_string(),
                        String::new(),
                    ));
                }
            };

            let id = response.resource_id();
            match (response.status(), id) {
                (StatusCode::CREATED, Some(id)) => {
                    let body = response.json().unwrap_or(Value::Null);
                    info!(kind = %link.kind, %id, "Created fixture");
                    chain.records.push(FixtureRecord {
                        kind: link.kind,
                        id,
                        body,
                    });
                }
                (status, id) => {
                    let reason = if status == StatusCode::CREATED && id.is_none() {
                        "response body has no positive id".to_string()
                    } else {
                        format!("expected 201 Created, got {}", status)
                    };
                    return Err(self.fail_setup(
                        &mut chain,
                        link.kind,
                        status.as_u16(),
                        reason,
                        response.text(),
                    ));
                }
            }
        }

        chain.transition(ChainState::Ready)?;
        Ok(chain)
    }

    fn fail_setup(
        &self,
        chain: &mut FixtureChain,
        kind: ResourceKind,
        status: u16,
        reason: String,
        body: String,
    ) -> HarnessError {
        // Creating -> Error is always legal here
        let _ = chain.transition(ChainState::Error);
        for record in &chain.records {
            warn!(kind = %record.kind, id = %record.id, "Fixture setup failed; record left in place");
        }
        FixtureError::Setup {
            kind,
            status,
            reason,
            body,
            created: std::mem::take(&mut chain.records),
        }
        .into()
    }

    /// Deletes the chain's owned records in reverse creation order.
    ///
    /// Cleanup failures are logged and reported, never returned as errors.
    /// The chain ends `Destroyed` when every record is confirmed gone and
    /// `Error` otherwise.
    pub async fn teardown(&self, chain: &mut FixtureChain) -> Result<TeardownReport, FixtureError> {
        if chain.state == ChainState::Destroyed {
            return Ok(TeardownReport::default());
        }
        chain.transition(ChainState::TearingDown)?;

        let report = self.teardown_records(&chain.records).await;
        let next = if report.is_clean() {
            ChainState::Destroyed
        } else {
            ChainState::Error
        };
        chain.transition(next)?;
        Ok(report)
    }

    /// Deletes `records` in reverse order. `204` and `404` both count as removed.
    pub async fn teardown_records(&self, records: &[FixtureRecord]) -> TeardownReport {
        let mut report = TeardownReport::default();

        for record in records.iter().rev() {
            let warning = match self.client.delete(record.kind, record.id).await {
                Ok(response) => match response.status() {
                    StatusCode::NO_CONTENT => {
                        report.deleted += 1;
                        continue;
                    }
                    StatusCode::NOT_FOUND => {
                        report.already_gone += 1;
                        continue;
                    }
                    status => CleanupWarning {
                        kind: record.kind,
                        id: record.id,
                        status: Some(status.as_u16()),
                        reason: format!("unexpected status {}", status),
                    },
                },
                Err(e) => CleanupWarning {
                    kind: record.kind,
                    id: record.id,
                    status: None,
                    reason: e.to_string(),
                },
            };
            warn!(kind = %warning.kind, id = %warning.id, reason = %warning.reason, "Cleanup failed");
            report.warnings.push(warning);
        }

        report
    }

    /// Runs `body` with a ready chain and tears the chain down afterwards.
    ///
    /// Teardown runs even if `body` panics; the panic is resumed once cleanup
    /// has finished. Cleanup warnings are logged, not returned.
    pub async fn scoped<F, Fut, T>(&self, plan: &FixturePlan, body: F) -> HarnessResult<T>
    where
        F: FnOnce(FixtureChain) -> Fut,
        Fut: Future<Output = T>,
    {
        let mut chain = self.setup(plan).await?;
        let snapshot = chain.clone();

        let outcome = AssertUnwindSafe(async move { body(snapshot).await })
            .catch_unwind()
            .await;

        match self.teardown(&mut chain).await {
            Ok(report) if !report.is_clean() => {
                warn!(warnings = report.warnings.len(), "Fixture teardown left records behind");
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Fixture teardown could not run"),
        }

        match outcome {
            Ok(value) => Ok(value),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
