use std::collections::HashMap;

use super::prelude::Value;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Scope {
    pub store: HashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            store: HashMap::new()
        }
    }
}

/// Stack of scopes, innermost last. The program scope at index 0 lives as
/// long as the environment, every function call pushes one more on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()]
        }
    }

    /// Looks the name up from the innermost scope outwards, unbound names are nil.
    pub fn get(&self, name: &str) -> Value {
        self.scopes.iter()
            .rev()
            .find_map(|scope| scope.store.get(name))
            .cloned()
            .unwrap_or_default()
    }

    /// Overwrites the nearest existing binding, or creates one in the innermost scope.
    pub fn set(&mut self, name: &str, value: Value) {
        let scope = match self.scopes.iter().rposition(|scope| scope.store.contains_key(name)) {
            Some(idx) => &mut self.scopes[idx],
            None => self.innermost(),
        };

        scope.store.insert(name.to_string(), value);
    }

    /// Binds in the innermost scope without looking further out. Used for parameters.
    pub fn declare(&mut self, name: &str, value: Value) {
        self.innermost().store.insert(name.to_string(), value);
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.store.contains_key(name))
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn innermost(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
