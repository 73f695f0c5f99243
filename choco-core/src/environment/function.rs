use std::collections::HashMap;
use std::ops::Range;

/// A declared function: its parameter names and the half-open token range
/// of its body, between (not including) the braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Range<usize>,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct FunctionTable {
    functions: HashMap<String, Function>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new()
        }
    }

    /// Registers `function` under `name`, replacing an earlier declaration.
    pub fn declare(&mut self, name: String, function: Function) -> Option<Function> {
        self.functions.insert(name, function)
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
