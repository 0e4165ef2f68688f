//! Runtime effect registry.

use std::collections::HashMap;
use std::sync::Arc;

/// Identifier of a runtime effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u32);

/// A user-provided shader effect referenced by draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEffect {
    label: String,
    source: String,
}

impl RuntimeEffect {
    /// Create a runtime effect.
    pub fn new(label: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
        }
    }

    /// Get the effect label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the shader source.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Effects registered for the current recording, looked up by draw passes
/// while they prepare pipelines.
#[derive(Debug, Default)]
pub struct RuntimeEffectDictionary {
    effects: HashMap<EffectId, Arc<RuntimeEffect>>,
}

impl RuntimeEffectDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect, returning the one it replaced.
    pub fn insert(
        &mut self,
        id: EffectId,
        effect: Arc<RuntimeEffect>,
    ) -> Option<Arc<RuntimeEffect>> {
        self.effects.insert(id, effect)
    }

    /// Look up an effect.
    pub fn find(&self, id: EffectId) -> Option<&Arc<RuntimeEffect>> {
        self.effects.get(&id)
    }

    /// Check if an effect is registered.
    pub fn contains(&self, id: EffectId) -> bool {
        self.effects.contains_key(&id)
    }

    /// Get the number of registered effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if no effects are registered.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Remove every effect.
    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
