// Mon Jan 19 2026 - Alex

use crate::query::{MethodDescriptor, MethodId, MethodMatcher, QueryError, QueryService};
use ahash::AHashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
struct MethodRecord {
    descriptor: MethodDescriptor,
    strings: Vec<String>,
    invokes: Vec<MethodId>,
}

#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub owning_type: String,
    pub name: String,
    pub return_type: String,
    pub param_types: Vec<String>,
    pub strings: Vec<String>,
}

impl MethodSpec {
    pub fn new(owning_type: &str, name: &str, return_type: &str) -> Self {
        Self {
            owning_type: owning_type.to_string(),
            name: name.to_string(),
            return_type: return_type.to_string(),
            param_types: Vec::new(),
            strings: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: &[&str]) -> Self {
        self.param_types = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_strings(mut self, strings: &[&str]) -> Self {
        self.strings = strings.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Dump format produced by an external indexer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexDump {
    pub classes: Vec<ClassDump>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDump {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDump>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDump {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub param_types: Vec<String>,
    #[serde(default)]
    pub strings: Vec<String>,
    /// `Type#method` references, resolved after every class is loaded.
    #[serde(default)]
    pub invokes: Vec<String>,
}

/// Order-preserving in-memory method index. Methods enumerate in the order
/// they were added, which is the order of the dump they came from.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    methods: IndexMap<String, MethodRecord>,
    by_key: AHashMap<String, MethodId>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, QueryError> {
        let text = fs::read_to_string(path)
            .map_err(|e| QueryError::MalformedIndex(format!("{}: {}", path.display(), e)))?;
        let dump: IndexDump = serde_json::from_str(&text)
            .map_err(|e| QueryError::MalformedIndex(format!("{}: {}", path.display(), e)))?;
        Self::from_dump(&dump)
    }

    pub fn from_dump(dump: &IndexDump) -> Result<Self, QueryError> {
        let mut index = Self::new();
        let mut pending = Vec::new();

        for class in &dump.classes {
            for method in &class.methods {
                let params: Vec<&str> = method.param_types.iter().map(|s| s.as_str()).collect();
                let strings: Vec<&str> = method.strings.iter().map(|s| s.as_str()).collect();
                let spec = MethodSpec::new(&class.name, &method.name, &method.return_type)
                    .with_params(&params)
                    .with_strings(&strings);
                let id = index.add_method(spec);
                pending.push((id, &method.invokes));
            }
        }

        for (from, refs) in pending {
            for reference in refs {
                match index.by_key.get(reference.as_str()).copied() {
                    Some(to) => index.add_invoke(from, to)?,
                    None => log::debug!("Skipping unresolved invoke reference {}", reference),
                }
            }
        }

        log::info!("Loaded index with {} methods", index.len());
        Ok(index)
    }

    pub fn add_method(&mut self, spec: MethodSpec) -> MethodId {
        let params: Vec<&str> = spec.param_types.iter().map(|s| s.as_str()).collect();
        let descriptor = MethodDescriptor::new(
            MethodId::new(self.methods.len()),
            &spec.owning_type,
            &spec.name,
            &spec.return_type,
        )
        .with_params(&params);

        let signature = descriptor.signature();
        if let Some(existing) = self.methods.get_index_of(&signature) {
            return MethodId::new(existing);
        }

        let id = descriptor.id;
        self.by_key.entry(descriptor.key()).or_insert(id);
        self.methods.insert(
            signature,
            MethodRecord {
                descriptor,
                strings: spec.strings,
                invokes: Vec::new(),
            },
        );
        id
    }

    pub fn add_invoke(&mut self, from: MethodId, to: MethodId) -> Result<(), QueryError> {
        if to.index() >= self.methods.len() {
            return Err(QueryError::UnknownMethod(to.index()));
        }
        let (_, record) = self
            .methods
            .get_index_mut(from.index())
            .ok_or(QueryError::UnknownMethod(from.index()))?;
        record.invokes.push(to);
        Ok(())
    }

    pub fn get(&self, id: MethodId) -> Option<&MethodDescriptor> {
        self.methods.get_index(id.index()).map(|(_, r)| &r.descriptor)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl QueryService for InMemoryIndex {
    fn find_methods(&self, matcher: &MethodMatcher) -> Result<Vec<MethodDescriptor>, QueryError> {
        Ok(self
            .methods
            .values()
            .filter(|r| matcher.matches(&r.descriptor, &r.strings))
            .map(|r| r.descriptor.clone())
            .collect())
    }

    fn invoked_methods(&self, method: &MethodDescriptor) -> Result<Vec<MethodDescriptor>, QueryError> {
        let (_, record) = self
            .methods
            .get_index(method.id.index())
            .ok_or(QueryError::UnknownMethod(method.id.index()))?;

        record
            .invokes
            .iter()
            .map(|id| {
                self.get(*id)
                    .cloned()
                    .ok_or(QueryError::UnknownMethod(id.index()))
            })
            .collect()
    }
}
