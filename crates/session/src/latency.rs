//! Simulated loading delays with last-request-wins semantics.
//!
//! Each kind of load owns a [`LoadGate`]. Starting a load issues a
//! [`LoadTicket`] and bumps the gate's generation, which supersedes every
//! ticket issued before it. When a delayed result arrives it is applied only
//! if its ticket is still current, so results land in request order no matter
//! which timer fires first.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

/// Artificial delays applied before showing each section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub table: Duration,
    pub kpis: Duration,
    pub categories: Duration,
    pub detail: Duration,
    pub alternatives: Duration,
    pub search: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            table: Duration::from_millis(1200),
            kpis: Duration::from_millis(800),
            categories: Duration::from_millis(1200),
            detail: Duration::from_millis(1800),
            alternatives: Duration::from_millis(2200),
            search: Duration::from_millis(800),
        }
    }
}

impl LatencyProfile {
    /// No delays at all.
    pub fn instant() -> Self {
        Self {
            table: Duration::ZERO,
            kpis: Duration::ZERO,
            categories: Duration::ZERO,
            detail: Duration::ZERO,
            alternatives: Duration::ZERO,
            search: Duration::ZERO,
        }
    }
}

/// Generation counter shared by all tickets of one kind of load.
#[derive(Debug, Clone, Default)]
pub struct LoadGate {
    generation: Arc<AtomicU64>,
}

impl LoadGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding every outstanding ticket.
    pub fn issue(&self) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket {
            generation,
            gate: self.generation.clone(),
        }
    }

    /// Invalidate outstanding tickets without starting a new load.
    pub fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// True only for the newest ticket issued by this gate.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        Arc::ptr_eq(&self.generation, &ticket.gate) && ticket.is_current()
    }

    /// Move `phase` to `Ready` if `ticket` is this gate's current load and the
    /// one `phase` is waiting on. Tickets from other gates never complete it.
    pub fn complete(&self, phase: &mut LoadPhase, ticket: &LoadTicket) -> bool {
        self.is_current(ticket) && phase.complete(ticket)
    }
}

/// Proof that a load was requested at a particular generation.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    gate: Arc<AtomicU64>,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once a newer ticket was issued from the same gate.
    pub fn is_current(&self) -> bool {
        self.gate.load(Ordering::Acquire) == self.generation
    }
}

/// Loading state of one section of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadPhase {
    #[default]
    NotLoaded,
    Loading { generation: u64 },
    Ready,
}

impl LoadPhase {
    pub fn loading(ticket: &LoadTicket) -> Self {
        LoadPhase::Loading {
            generation: ticket.generation(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadPhase::Ready)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading { .. })
    }

    /// Move to `Ready` if `ticket` carries the generation this phase is
    /// waiting on. Generations are per gate; go through
    /// [`LoadGate::complete`] to also check where the ticket came from.
    pub(crate) fn complete(&mut self, ticket: &LoadTicket) -> bool {
        match *self {
            LoadPhase::Loading { generation }
                if generation == ticket.generation() && ticket.is_current() =>
            {
                *self = LoadPhase::Ready;
                true
            }
            _ => false,
        }
    }
}

/// A computation that runs after a fixed delay, dropped if superseded.
#[derive(Debug, Clone)]
pub struct DelayedLoad {
    name: &'static str,
    delay: Duration,
    gate: LoadGate,
}

impl DelayedLoad {
    pub fn new(name: &'static str, delay: Duration) -> Self {
        Self {
            name,
            delay,
            gate: LoadGate::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn gate(&self) -> &LoadGate {
        &self.gate
    }

    /// Wait out the delay, then compute. Resolves to `None` if another load
    /// was started in the meantime.
    ///
    /// The ticket is issued when this is called, not when it is first polled.
    pub fn run<T, C>(&self, compute: C) -> impl Future<Output = Option<T>> + use<T, C>
    where
        C: FnOnce() -> T,
    {
        let ticket = self.gate.issue();
        wait_then(self.name, self.delay, ticket, compute)
    }

    /// Like [`DelayedLoad::run`] on a background task. The ticket is checked
    /// again after `compute`, so `apply` never sees a result that was
    /// superseded while it was being computed.
    ///
    /// The ticket is issued before this returns, so call order decides which
    /// load wins.
    pub fn spawn<T, C, A>(&self, compute: C, apply: A) -> (LoadTicket, JoinHandle<bool>)
    where
        T: Send + 'static,
        C: FnOnce() -> T + Send + 'static,
        A: FnOnce(T) + Send + 'static,
    {
        let ticket = self.gate.issue();
        let name = self.name;
        let task = wait_then(name, self.delay, ticket.clone(), compute);
        let current = ticket.clone();
        let handle = tokio::spawn(async move {
            match task.await {
                Some(value) if current.is_current() => {
                    apply(value);
                    true
                }
                Some(_) => {
                    tracing::debug!(load = name, generation = current.generation(), "dropping load superseded during compute");
                    false
                }
                None => false,
            }
        });
        (ticket, handle)
    }
}

fn wait_then<T, C>(
    name: &'static str,
    delay: Duration,
    ticket: LoadTicket,
    compute: C,
) -> impl Future<Output = Option<T>>
where
    C: FnOnce() -> T,
{
    async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if !ticket.is_current() {
            tracing::debug!(load = name, generation = ticket.generation(), "dropping superseded load");
            return None;
        }
        Some(compute())
    }
}
