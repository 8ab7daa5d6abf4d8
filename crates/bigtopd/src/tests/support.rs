//! In-memory supervisor and health recorder shared by the daemon tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use bigtop_protocol::{
    AccessPolicy, Payload, Scope, SignalRequest, Supervisor, SupervisorError, WatcherRef,
    WatcherSpec,
};

use crate::dispatch::DispatchError;
use crate::health::HealthReporter;

#[derive(Debug, Clone)]
pub(crate) struct FakeWatcher {
    pub(crate) spec: WatcherSpec,
    pub(crate) token: u64,
    pub(crate) pids: Vec<u32>,
}

/// Supervisor holding its watcher table in memory.
///
/// Starting a watcher assigns it one pid; stopping clears them.
#[derive(Debug, Default)]
pub(crate) struct FakeSupervisor {
    pub(crate) policy: AccessPolicy,
    pub(crate) shows: u64,
    pub(crate) watchers: BTreeMap<String, FakeWatcher>,
    pub(crate) signals: Vec<SignalRequest>,
    pub(crate) next_token: u64,
    pub(crate) next_pid: u32,
}

impl FakeSupervisor {
    pub(crate) fn with_shows(shows: u64) -> Self {
        Self {
            shows,
            ..Self::default()
        }
    }

    fn watcher_mut(&mut self, name: &str) -> Result<&mut FakeWatcher, SupervisorError> {
        self.watchers
            .get_mut(name)
            .ok_or_else(|| SupervisorError::WatcherNotFound {
                name: name.to_owned(),
            })
    }

    fn spawn(&mut self, name: &str) -> Result<u32, SupervisorError> {
        self.next_pid += 1;
        let pid = 1000 + self.next_pid;
        let watcher = self.watcher_mut(name)?;
        watcher.pids = vec![pid];
        Ok(pid)
    }

    fn scoped_names(&self, scope: &Scope) -> Result<Vec<String>, SupervisorError> {
        match scope {
            Scope::All => Ok(self.watchers.keys().cloned().collect()),
            Scope::Watcher(name) if self.watchers.contains_key(name) => Ok(vec![name.clone()]),
            Scope::Watcher(name) => Err(SupervisorError::WatcherNotFound { name: name.clone() }),
        }
    }
}

impl Supervisor for FakeSupervisor {
    fn access_policy(&self) -> AccessPolicy {
        self.policy.clone()
    }

    fn add_watcher(&mut self, spec: WatcherSpec) -> Result<WatcherRef, SupervisorError> {
        if self.watchers.contains_key(&spec.name) {
            return Err(SupervisorError::AlreadyExists { name: spec.name });
        }
        self.next_token += 1;
        let token = self.next_token;
        self.watchers.insert(
            spec.name.clone(),
            FakeWatcher {
                spec,
                token,
                pids: Vec::new(),
            },
        );
        Ok(WatcherRef::new(token))
    }

    fn start_watcher(&mut self, watcher: &WatcherRef) -> Result<Option<Payload>, SupervisorError> {
        let name = self
            .watchers
            .values()
            .find(|candidate| candidate.token == watcher.token())
            .map(|candidate| candidate.spec.name.clone())
            .ok_or_else(|| SupervisorError::Failed {
                message: format!("stale watcher reference {}", watcher.token()),
            })?;
        let pid = self.spawn(&name)?;
        let mut payload = Payload::new();
        payload.insert("pid".to_owned(), pid.into());
        Ok(Some(payload))
    }

    fn remove_watcher(&mut self, name: &str, _stop: bool) -> Result<(), SupervisorError> {
        self.watchers
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| SupervisorError::WatcherNotFound {
                name: name.to_owned(),
            })
    }

    fn start(&mut self, scope: Scope) -> Result<Option<Payload>, SupervisorError> {
        for name in self.scoped_names(&scope)? {
            self.spawn(&name)?;
        }
        Ok(None)
    }

    fn stop(&mut self, scope: Scope) -> Result<Option<Payload>, SupervisorError> {
        for name in self.scoped_names(&scope)? {
            self.watcher_mut(&name)?.pids.clear();
        }
        Ok(None)
    }

    fn numshows(&self) -> u64 {
        self.shows
    }

    fn numwatchers(&self) -> u64 {
        u64::try_from(self.watchers.len()).unwrap_or(u64::MAX)
    }

    fn numprocesses(&self, scope: Scope) -> Result<u64, SupervisorError> {
        let total: usize = self
            .scoped_names(&scope)?
            .iter()
            .filter_map(|name| self.watchers.get(name))
            .map(|watcher| watcher.pids.len())
            .sum();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    fn watcher_names(&self) -> Vec<String> {
        self.watchers.keys().cloned().collect()
    }

    fn pids(&self, name: &str) -> Result<Vec<u32>, SupervisorError> {
        self.watchers
            .get(name)
            .map(|watcher| watcher.pids.clone())
            .ok_or_else(|| SupervisorError::WatcherNotFound {
                name: name.to_owned(),
            })
    }

    fn signal(&mut self, request: SignalRequest) -> Result<(), SupervisorError> {
        let watcher = self.watcher_mut(&request.name)?;
        if let Some(pid) = request.pid
            && !watcher.pids.contains(&pid)
        {
            return Err(SupervisorError::ProcessNotFound {
                name: request.name,
                pid,
            });
        }
        self.signals.push(request);
        Ok(())
    }
}

/// Health events observed during a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HealthEvent {
    Started,
    Stopped(usize),
    Failed(String),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    pub(crate) fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn serving_started(&self) {
        self.record(HealthEvent::Started);
    }

    fn serving_stopped(&self, handled: usize) {
        self.record(HealthEvent::Stopped(handled));
    }

    fn serving_failed(&self, error: &DispatchError) {
        self.record(HealthEvent::Failed(error.to_string()));
    }
}
