//! # Peregrine DNS Cache
//!
//! An insert-only record cache keyed by (name, record type). The decoder
//! side inserts every record it parses; the resolution engine and the
//! `dump` command read it back. There is no eviction and TTLs are stored
//! but not enforced; expiry belongs to whoever wraps this cache.

use parking_lot::RwLock;
use peregrine_proto::{Name, Question, ResourceRecord, Type};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Cache key: a lowercased owner name plus a record type.
#[derive(Debug, Clone, Eq)]
pub struct CacheKey {
    /// Owner name, lowercased for lookup.
    name: Name,

    /// Record type.
    rtype: Type,
}

impl CacheKey {
    /// Creates a new cache key.
    pub fn new(name: &Name, rtype: Type) -> Self {
        Self {
            name: name.lowercased(),
            rtype,
        }
    }

    /// Creates a cache key from a question.
    pub fn from_question(question: &Question) -> Self {
        Self::new(&question.qname, question.qtype)
    }

    /// Creates a cache key from a record's owner name and type.
    pub fn from_record(record: &ResourceRecord) -> Self {
        Self::new(record.name(), record.rtype())
    }

    /// Returns the owner name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Type {
        self.rtype
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.rtype == other.rtype
    }
}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.rtype.to_u16().hash(state);
    }
}

#[derive(Default)]
struct Inner {
    map: HashMap<CacheKey, Vec<ResourceRecord>>,
    /// Keys in first-insertion order, for stable enumeration.
    order: Vec<CacheKey>,
}

/// The shared record cache.
///
/// Mutated only by record insertion; read by the engine and by cache
/// enumeration. Per-key record lists keep arrival order and drop exact
/// duplicates (full-tuple identity).
#[derive(Default)]
pub struct RecordCache {
    inner: RwLock<Inner>,
}

impl RecordCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its (owner name, type) key.
    ///
    /// An exact duplicate of an already-cached record is dropped.
    pub fn insert(&self, record: ResourceRecord) {
        let key = CacheKey::from_record(&record);
        let mut inner = self.inner.write();

        if let Some(records) = inner.map.get_mut(&key) {
            if !records.contains(&record) {
                records.push(record);
            }
            return;
        }
        inner.map.insert(key.clone(), vec![record]);
        inner.order.push(key);
    }

    /// Returns the cached records for a question's (name, type) key.
    pub fn lookup(&self, question: &Question) -> Vec<ResourceRecord> {
        let key = CacheKey::from_question(question);
        self.inner.read().map.get(&key).cloned().unwrap_or_default()
    }

    /// Visits every (key, records) entry in key insertion order.
    pub fn for_each(&self, mut visitor: impl FnMut(&CacheKey, &[ResourceRecord])) {
        let inner = self.inner.read();
        for key in &inner.order {
            if let Some(records) = inner.map.get(key) {
                visitor(key, records);
            }
        }
    }

    /// Returns the number of distinct (name, type) keys.
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    /// Returns true if nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
