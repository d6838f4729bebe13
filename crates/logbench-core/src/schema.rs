//! Event schema table: the in-memory view of the events in an ABI file.
//!
//! Accepted layouts: a bare ABI array, or an object carrying the array under
//! `abi` or `events`. Only `"type": "event"` entries are kept, and only those
//! whose inputs all fall in the supported fixed-width subset.

use crate::error::SchemaError;
use crate::fingerprint::keccak256_signature;
use crate::types::ParamKind;
use alloy_primitives::B256;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// One event parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// May be empty; ABI files do not require parameter names.
    pub name: String,
    pub kind: ParamKind,
    /// Indexed params live in topics[1..], the rest in `data`.
    pub indexed: bool,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, kind: ParamKind, indexed: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            indexed,
        }
    }
}

/// A single event shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSchemaEntry {
    pub name: String,
    /// keccak256 of the canonical signature; matched against topics[0]
    pub signature_hash: B256,
    /// Declaration order matters: it fixes topic and stride order.
    pub inputs: Vec<ParamSpec>,
}

impl EventSchemaEntry {
    /// Build an entry and derive its signature hash.
    pub fn new(name: impl Into<String>, inputs: Vec<ParamSpec>) -> Self {
        let name = name.into();
        let signature_hash = keccak256_signature(&signature_of(&name, &inputs));
        Self {
            name,
            signature_hash,
            inputs,
        }
    }

    /// Canonical signature, e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> String {
        signature_of(&self.name, &self.inputs)
    }

    pub fn indexed_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.inputs.iter().filter(|p| p.indexed)
    }

    pub fn data_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.inputs.iter().filter(|p| !p.indexed)
    }

    /// Number of topics a matching log carries, topic0 included.
    pub fn expected_topics(&self) -> usize {
        1 + self.indexed_params().count()
    }

    /// Exact data length in bytes of a matching log.
    pub fn expected_data_len(&self) -> usize {
        32 * self.data_params().count()
    }
}

fn signature_of(name: &str, inputs: &[ParamSpec]) -> String {
    let types: Vec<String> = inputs.iter().map(|p| p.kind.to_string()).collect();
    format!("{name}({})", types.join(","))
}

/// Read-only mapping from signature hash to event entry.
/// Built once per run and passed explicitly to every decode call.
#[derive(Debug, Clone, Default)]
pub struct EventSchemaTable {
    entries: Vec<EventSchemaEntry>,
    by_hash: HashMap<B256, usize>,
}

impl EventSchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A later entry with the same signature hash replaces the
    /// earlier one for topic0 routing.
    pub fn insert(&mut self, entry: EventSchemaEntry) {
        self.by_hash.insert(entry.signature_hash, self.entries.len());
        self.entries.push(entry);
    }

    /// Load an ABI JSON file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse ABI JSON text. Fails with `NoEvents` when nothing usable is found.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let doc: Value = serde_json::from_str(json)?;
        let items = abi_items(&doc)?;

        let mut table = Self::new();
        for item in items {
            if let Some(entry) = parse_event(item) {
                table.insert(entry);
            }
        }

        if table.is_empty() {
            return Err(SchemaError::NoEvents);
        }
        Ok(table)
    }

    pub fn get_by_hash(&self, hash: &B256) -> Option<&EventSchemaEntry> {
        self.by_hash.get(hash).map(|&i| &self.entries[i])
    }

    /// First entry declared with this name.
    pub fn get_by_name(&self, name: &str) -> Option<&EventSchemaEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Like `get_by_name`, but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<&EventSchemaEntry, SchemaError> {
        self.get_by_name(name).ok_or_else(|| SchemaError::EventNotFound {
            name: name.to_string(),
        })
    }

    pub fn entries(&self) -> &[EventSchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn abi_items(doc: &Value) -> Result<&Vec<Value>, SchemaError> {
    if let Some(arr) = doc.as_array() {
        return Ok(arr);
    }
    if let Some(obj) = doc.as_object() {
        for key in ["abi", "events"] {
            if let Some(arr) = obj.get(key).and_then(|v| v.as_array()) {
                return Ok(arr);
            }
        }
        return Err(SchemaError::UnsupportedLayout {
            reason: "object without an `abi` or `events` array".into(),
        });
    }
    Err(SchemaError::UnsupportedLayout {
        reason: "expected a JSON array or object".into(),
    })
}

#[derive(Debug, Deserialize)]
struct AbiEvent {
    name: String,
    #[serde(default)]
    inputs: Vec<AbiInput>,
    #[serde(default)]
    anonymous: bool,
}

#[derive(Debug, Deserialize)]
struct AbiInput {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    indexed: bool,
}

fn parse_event(item: &Value) -> Option<EventSchemaEntry> {
    if item.get("type").and_then(|t| t.as_str()) != Some("event") {
        return None;
    }

    let event: AbiEvent = match serde_json::from_value(item.clone()) {
        Ok(e) => e,
        Err(e) => {
            warn!("skipping event entry: {e}");
            return None;
        }
    };

    if event.anonymous {
        warn!("skipping anonymous event '{}': no topic0 to route on", event.name);
        return None;
    }

    let mut inputs = Vec::with_capacity(event.inputs.len());
    for input in event.inputs {
        let Some(kind) = ParamKind::parse(&input.ty) else {
            warn!(
                "skipping event '{}': unsupported parameter type '{}'",
                event.name, input.ty
            );
            return None;
        };
        inputs.push(ParamSpec::new(input.name, kind, input.indexed));
    }

    Some(EventSchemaEntry::new(event.name, inputs))
}
