use serde::{Deserialize, Serialize};

/// Document counts per index and per type, in response bucket order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTypeStats {
    indices: Vec<Index>,
}

impl IndexTypeStats {
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

impl IntoIterator for IndexTypeStats {
    type Item = Index;
    type IntoIter = std::vec::IntoIter<Index>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.into_iter()
    }
}

/// An index bucket.
///
/// `docs_in_index` is the cluster's own aggregate and is not required to
/// equal the sum of the type counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub docs_in_index: u64,
    pub types: Vec<Type>,
}

impl Index {
    pub fn new(name: impl Into<String>, docs_in_index: u64) -> Self {
        Self {
            name: name.into(),
            docs_in_index,
            types: Vec::new(),
        }
    }

    pub fn add_type(&mut self, ty: Type) {
        self.types.push(ty);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    pub docs_in_type: u64,
}

impl Type {
    pub fn new(name: impl Into<String>, docs_in_type: u64) -> Self {
        Self {
            name: name.into(),
            docs_in_type,
        }
    }
}
