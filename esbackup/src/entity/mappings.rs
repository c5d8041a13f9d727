use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type mappings for every index on the cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    indices: Vec<Index>,
}

impl Mappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_index(&mut self, index: Index) {
        self.indices.push(index);
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indices.iter().find(|i| i.name == name)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl IntoIterator for Mappings {
    type Item = Index;
    type IntoIter = std::vec::IntoIter<Index>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub types: Vec<Type>,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn add_type(&mut self, ty: Type) {
        self.types.push(ty);
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// A mapped type. `schema` is passed through exactly as the cluster sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    pub schema: Value,
}

impl Type {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}
