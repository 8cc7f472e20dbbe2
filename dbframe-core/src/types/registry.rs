//! Type rule registry and resolver.

use std::collections::HashMap;

use super::TypeRule;
use crate::error::{Error, Result};

/// Registry of type rules with deterministic resolution.
///
/// Resolution checks exact names first, then pattern rules in the order they
/// were registered. Build it once, then share it by reference; it is never
/// mutated while resolving.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    rules: Vec<TypeRule>,
    by_name: HashMap<&'static str, usize>,
    /// Indices into `rules`, in match priority order
    patterns: Vec<usize>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule.
    ///
    /// A rule with an already registered name replaces the earlier one and
    /// keeps its position.
    pub fn register(&mut self, rule: TypeRule) {
        if let Some(&idx) = self.by_name.get(rule.name()) {
            let had_pattern = self.rules[idx].pattern().is_some();
            let has_pattern = rule.pattern().is_some();
            self.rules[idx] = rule;
            match (had_pattern, has_pattern) {
                (true, false) => self.patterns.retain(|&i| i != idx),
                (false, true) => self.patterns.push(idx),
                _ => {}
            }
            return;
        }

        let idx = self.rules.len();
        if rule.pattern().is_some() {
            self.patterns.push(idx);
        }
        self.by_name.insert(rule.name(), idx);
        self.rules.push(rule);
    }

    /// Find the rule governing a wire type string.
    ///
    /// Returns `None` when no rule applies; callers fall back to raw handling.
    pub fn resolve(&self, type_name: &str) -> Option<&TypeRule> {
        if let Some(rule) = self.get(type_name) {
            return Some(rule);
        }
        self.patterns
            .iter()
            .map(|&idx| &self.rules[idx])
            .find(|rule| rule.matches(type_name))
    }

    /// Like [`Self::resolve`], but an unknown type is an error.
    pub fn resolve_strict(&self, type_name: &str) -> Result<&TypeRule> {
        self.resolve(type_name)
            .ok_or_else(|| Error::UnresolvedType {
                type_name: type_name.to_string(),
            })
    }

    /// Get a rule by exact name only.
    pub fn get(&self, name: &str) -> Option<&TypeRule> {
        self.by_name.get(name).map(|&idx| &self.rules[idx])
    }

    /// All registered rules, in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &TypeRule> {
        self.rules.iter()
    }

    /// Pattern rules, in match priority order.
    pub fn pattern_rules(&self) -> impl Iterator<Item = &TypeRule> {
        self.patterns.iter().map(|&idx| &self.rules[idx])
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
