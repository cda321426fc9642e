use std::collections::HashMap;
use std::sync::Arc;

use crate::handlers;
use crate::traits::Portal;

/// Id-to-handler table backing the dispatcher.
///
/// Handlers are trait objects so tests can substitute fakes for the real
/// desktop-facing implementations.
pub struct PortalTable {
    handlers: HashMap<String, Arc<dyn Portal>>,
}

impl PortalTable {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn Portal>) -> &mut Self {
        self.handlers.insert(handler.id().to_string(), handler);
        self
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Portal>> {
        self.handlers.get(id).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.handlers.len()
    }

    /// Table with every builtin handler registered.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for handler in handlers::builtin() {
            table.register(handler);
        }
        table
    }
}

impl Default for PortalTable {
    fn default() -> Self {
        Self::new()
    }
}
