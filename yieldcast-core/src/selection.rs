//! Caller-owned factor on/off state.

use crate::registry::FactorRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping of factor name to enabled flag.
///
/// Names absent from the map count as disabled. Names that the registry does
/// not know are carried as-is and rejected when the selection is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorSelection {
    states: BTreeMap<String, bool>,
}

impl FactorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every factor of the registry switched on. This is the default view.
    pub fn all(registry: &FactorRegistry) -> Self {
        Self {
            states: registry.names().map(|n| (n.to_string(), true)).collect(),
        }
    }

    /// Every factor of the registry present but switched off.
    pub fn none(registry: &FactorRegistry) -> Self {
        Self {
            states: registry.names().map(|n| (n.to_string(), false)).collect(),
        }
    }

    /// Only the named factors switched on.
    pub fn from_enabled<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            states: names.into_iter().map(|n| (n.into(), true)).collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.states.insert(name.into(), enabled);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set(name, enabled);
        self
    }

    /// Flip a factor. An absent factor becomes enabled.
    pub fn toggle(&mut self, name: &str) -> bool {
        let state = self.states.entry(name.to_string()).or_insert(false);
        *state = !*state;
        *state
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.states.get(name).copied().unwrap_or(false)
    }

    /// All names mentioned by the selection, enabled or not.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.keys().map(String::as_str)
    }

    pub fn enabled_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.states
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.states.iter().map(|(name, on)| (name.as_str(), *on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FACTOR_FAT, FACTOR_HERD_SIZE};

    #[test]
    fn test_all_and_none() {
        let registry = FactorRegistry::reference();
        let all = FactorSelection::all(&registry);
        let none = FactorSelection::none(&registry);
        assert!(registry.names().all(|n| all.is_enabled(n)));
        assert!(registry.names().all(|n| !none.is_enabled(n)));
        assert_eq!(none.names().count(), 5);
    }

    #[test]
    fn test_toggle() {
        let mut selection = FactorSelection::new();
        assert!(selection.toggle(FACTOR_FAT));
        assert!(selection.is_enabled(FACTOR_FAT));
        assert!(!selection.toggle(FACTOR_FAT));
        assert!(!selection.is_enabled(FACTOR_FAT));
    }

    #[test]
    fn test_enabled_names() {
        let selection = FactorSelection::from_enabled([FACTOR_HERD_SIZE]).with(FACTOR_FAT, false);
        let enabled: Vec<&str> = selection.enabled_names().collect();
        assert_eq!(enabled, vec![FACTOR_HERD_SIZE]);
    }

    #[test]
    fn test_serde_as_plain_map() {
        let selection: FactorSelection =
            serde_json::from_str(r#"{"fat": true, "herd-size": false}"#).unwrap();
        assert!(selection.is_enabled("fat"));
        assert!(!selection.is_enabled("herd-size"));
    }
}
