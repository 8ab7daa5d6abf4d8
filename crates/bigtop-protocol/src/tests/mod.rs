//! Crate-level behaviour tests.

use crate::error::SupervisorError;
use crate::response::Payload;
use crate::supervisor::{AccessPolicy, Scope, SignalRequest, Supervisor, WatcherRef, WatcherSpec};


/// Supervisor double that records the watchers it is asked to create.
#[derive(Debug, Default)]
struct RecordingSupervisor {
    policy: AccessPolicy,
    shows: u64,
    added: Vec<WatcherSpec>,
    started: Vec<WatcherRef>,
}

impl RecordingSupervisor {
    fn with_shows(shows: u64) -> Self {
        Self {
            shows,
            ..Self::default()
        }
    }
}

impl Supervisor for RecordingSupervisor {
    fn access_policy(&self) -> AccessPolicy {
        self.policy.clone()
    }

    fn add_watcher(&mut self, spec: WatcherSpec) -> Result<WatcherRef, SupervisorError> {
        if self.added.iter().any(|existing| existing.name == spec.name) {
            return Err(SupervisorError::AlreadyExists { name: spec.name });
        }
        self.added.push(spec);
        Ok(WatcherRef::new(self.added.len() as u64))
    }

    fn start_watcher(&mut self, watcher: &WatcherRef) -> Result<Option<Payload>, SupervisorError> {
        self.started.push(*watcher);
        let mut payload = Payload::new();
        payload.insert("started".into(), watcher.token().into());
        Ok(Some(payload))
    }

    fn remove_watcher(&mut self, name: &str, _stop: bool) -> Result<(), SupervisorError> {
        let before = self.added.len();
        self.added.retain(|spec| spec.name != name);
        if self.added.len() == before {
            return Err(SupervisorError::WatcherNotFound {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    fn start(&mut self, _scope: Scope) -> Result<Option<Payload>, SupervisorError> {
        Ok(None)
    }

    fn stop(&mut self, _scope: Scope) -> Result<Option<Payload>, SupervisorError> {
        Ok(None)
    }

    fn numshows(&self) -> u64 {
        self.shows
    }

    fn numwatchers(&self) -> u64 {
        self.added.len() as u64
    }

    fn numprocesses(&self, _scope: Scope) -> Result<u64, SupervisorError> {
        Ok(0)
    }

    fn watcher_names(&self) -> Vec<String> {
        self.added.iter().map(|spec| spec.name.clone()).collect()
    }

    fn pids(&self, _name: &str) -> Result<Vec<u32>, SupervisorError> {
        Ok(Vec::new())
    }

    fn signal(&mut self, _request: SignalRequest) -> Result<(), SupervisorError> {
        Ok(())
    }
}
