//! Parsed CLI flag values handed to `Command::message`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bigtop_config::WatcherSource;

use crate::schema::{CommandDescriptor, OptionDefault};

/// Value of one CLI flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean switch.
    Flag(bool),
    /// Flag carrying a string.
    Value(String),
}

/// CLI flag values plus an optional in-memory watcher source.
///
/// The watcher source lets embedders hand the `add` command an already
/// loaded configuration instead of a path.
#[derive(Clone, Default)]
pub struct OptionValues {
    values: BTreeMap<String, OptionValue>,
    watcher_source: Option<Arc<dyn WatcherSource + Send + Sync>>,
}

impl OptionValues {
    /// Empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values seeded from the defaults declared by `descriptor`.
    #[must_use]
    pub fn defaults_for(descriptor: &CommandDescriptor) -> Self {
        let mut values = Self::new();
        for spec in descriptor.options {
            match spec.default {
                OptionDefault::Flag(enabled) => values.set_flag(spec.long, enabled),
                OptionDefault::Value(Some(text)) => values.set_value(spec.long, text),
                OptionDefault::Value(None) => {}
            }
        }
        values
    }

    /// Sets a boolean flag.
    pub fn set_flag(&mut self, name: impl Into<String>, enabled: bool) {
        self.values.insert(name.into(), OptionValue::Flag(enabled));
    }

    /// Sets a string-valued flag.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into(), OptionValue::Value(value.into()));
    }

    /// Builder form of [`OptionValues::set_flag`].
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set_flag(name, enabled);
        self
    }

    /// Builder form of [`OptionValues::set_value`].
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(name, value);
        self
    }

    /// Attaches an in-memory watcher source.
    #[must_use]
    pub fn with_watcher_source(mut self, source: Arc<dyn WatcherSource + Send + Sync>) -> Self {
        self.watcher_source = Some(source);
        self
    }

    /// State of a boolean flag; absent or string-valued flags read as false.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Flag(true)))
    }

    /// String value of a flag, when set.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Value(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// In-memory watcher source, when attached.
    #[must_use]
    pub fn watcher_source(&self) -> Option<Arc<dyn WatcherSource + Send + Sync>> {
        self.watcher_source.clone()
    }
}

impl fmt::Debug for OptionValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionValues")
            .field("values", &self.values)
            .field("watcher_source", &self.watcher_source.is_some())
            .finish()
    }
}
