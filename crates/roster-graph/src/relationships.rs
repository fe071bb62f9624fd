//! Relationship store: permanent and temporary edges plus their indices
//!
//! Edges live in one primary map keyed by [`EdgeKey`]. Two secondary
//! indices map an employee to the keys of edges where it is the superior
//! (`by_superior`) or the inferior (`by_inferior`).
//!
//! Invariant: a key is in the primary map iff it is in
//! `by_superior[key.superior()]` and `by_inferior[key.inferior()]`, and in no
//! other index set. Empty index sets are never kept.
//!
//! Every mutation validates first and only then touches the maps. The
//! apply steps cannot fail, so a rejected call leaves all three maps as
//! they were.

use crate::error::{RosterError, RosterResult};
use crate::registry::Registry;
use roster_domain::{
    Edge, EdgeFilter, EdgeKey, EmployeeId, PermanentRelationship, TemporaryRelationship,
    Timestamp,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Edge storage with by-superior and by-inferior indices
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    edges: BTreeMap<EdgeKey, Edge>,
    by_superior: HashMap<EmployeeId, BTreeSet<EdgeKey>>,
    by_inferior: HashMap<EmployeeId, BTreeSet<EdgeKey>>,
}

impl Relationships {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a permanent edge
    ///
    /// Fails with `NotFound` if either endpoint is unknown, `InvalidArgument`
    /// on self-reference and `Conflict` if the pair already has one.
    pub fn add_permanent(
        &mut self,
        registry: &Registry,
        rel: PermanentRelationship,
    ) -> RosterResult<EdgeKey> {
        Self::check_endpoints(registry, rel.superior_id, rel.inferior_id)?;

        let key = rel.key();
        if self.edges.contains_key(&key) {
            return Err(RosterError::Conflict(format!(
                "employee {} already has a permanent relationship over {}",
                rel.superior_id, rel.inferior_id
            )));
        }

        self.insert(Edge::Permanent(rel));
        Ok(key)
    }

    /// Add a temporary edge
    ///
    /// Same endpoint checks as [`add_permanent`](Self::add_permanent), plus
    /// `InvalidArgument` if `starting >= ending` and `Conflict` if an edge
    /// with the same pair and start exists.
    pub fn add_temporary(
        &mut self,
        registry: &Registry,
        rel: TemporaryRelationship,
    ) -> RosterResult<EdgeKey> {
        Self::check_endpoints(registry, rel.superior_id, rel.inferior_id)?;

        if !rel.has_valid_window() {
            return Err(RosterError::InvalidArgument(format!(
                "temporary relationship must start before it ends (starting={}, ending={})",
                rel.starting, rel.ending
            )));
        }

        let key = rel.key();
        if self.edges.contains_key(&key) {
            return Err(RosterError::Conflict(format!(
                "employee {} already has a temporary relationship over {} starting at {}",
                rel.superior_id, rel.inferior_id, rel.starting
            )));
        }

        self.insert(Edge::Temporary(rel));
        Ok(key)
    }

    /// Remove an edge by key
    pub fn remove(&mut self, key: &EdgeKey) -> RosterResult<Edge> {
        let edge = self
            .edges
            .remove(key)
            .ok_or_else(|| RosterError::NotFound(format!("edge {}", key)))?;

        Self::unindex(&mut self.by_superior, key.superior(), key);
        Self::unindex(&mut self.by_inferior, key.inferior(), key);
        Ok(edge)
    }

    /// Remove every edge touching `id`, returning them in key order
    pub(crate) fn remove_touching(&mut self, id: EmployeeId) -> Vec<Edge> {
        let keys = self.keys_touching(id);
        keys.iter().filter_map(|key| self.remove(key).ok()).collect()
    }

    /// Look up an edge
    pub fn get(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// All edges in key order
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the store holds no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether any edge references `id`
    pub fn is_referenced(&self, id: EmployeeId) -> bool {
        self.by_superior.contains_key(&id) || self.by_inferior.contains_key(&id)
    }

    /// Keys of every edge touching `id`, in key order
    pub fn keys_touching(&self, id: EmployeeId) -> Vec<EdgeKey> {
        let mut keys: BTreeSet<EdgeKey> = BTreeSet::new();
        for index in [&self.by_superior, &self.by_inferior] {
            if let Some(set) = index.get(&id) {
                keys.extend(set.iter().copied());
            }
        }
        keys.into_iter().collect()
    }

    /// Edges where `id` is the superior
    pub fn list_by_superior(&self, id: EmployeeId, filter: EdgeFilter) -> Vec<Edge> {
        self.collect(&self.by_superior, id, filter)
    }

    /// Edges where `id` is the inferior
    pub fn list_by_inferior(&self, id: EmployeeId, filter: EdgeFilter) -> Vec<Edge> {
        self.collect(&self.by_inferior, id, filter)
    }

    /// Temporary edges touching `id` that hold at `as_of`
    pub fn active_temporary_at(
        &self,
        id: EmployeeId,
        as_of: Timestamp,
    ) -> Vec<TemporaryRelationship> {
        self.keys_touching(id)
            .iter()
            .filter_map(|key| self.edges.get(key))
            .filter_map(Edge::as_temporary)
            .filter(|rel| rel.is_active_at(as_of))
            .cloned()
            .collect()
    }

    /// Check the index invariant described in the module docs
    pub fn verify_consistency(&self) -> Result<(), String> {
        for (key, edge) in &self.edges {
            if edge.key() != *key {
                return Err(format!("edge stored under {} has key {}", key, edge.key()));
            }
            if !Self::indexed(&self.by_superior, key.superior(), key) {
                return Err(format!("{} missing from by-superior index", key));
            }
            if !Self::indexed(&self.by_inferior, key.inferior(), key) {
                return Err(format!("{} missing from by-inferior index", key));
            }
        }

        self.check_index("by-superior", &self.by_superior, EdgeKey::superior)?;
        self.check_index("by-inferior", &self.by_inferior, EdgeKey::inferior)?;

        Ok(())
    }

    fn check_endpoints(
        registry: &Registry,
        superior: EmployeeId,
        inferior: EmployeeId,
    ) -> RosterResult<()> {
        registry.get(superior)?;
        registry.get(inferior)?;
        if superior == inferior {
            return Err(RosterError::InvalidArgument(format!(
                "employee {} cannot report to themselves",
                superior
            )));
        }
        Ok(())
    }

    fn insert(&mut self, edge: Edge) {
        let key = edge.key();
        self.by_superior.entry(key.superior()).or_default().insert(key);
        self.by_inferior.entry(key.inferior()).or_default().insert(key);
        self.edges.insert(key, edge);
    }

    fn unindex(index: &mut HashMap<EmployeeId, BTreeSet<EdgeKey>>, id: EmployeeId, key: &EdgeKey) {
        if let Some(set) = index.get_mut(&id) {
            set.remove(key);
            if set.is_empty() {
                index.remove(&id);
            }
        }
    }

    fn check_index(
        &self,
        name: &str,
        index: &HashMap<EmployeeId, BTreeSet<EdgeKey>>,
        endpoint: fn(&EdgeKey) -> EmployeeId,
    ) -> Result<(), String> {
        for (id, keys) in index {
            if keys.is_empty() {
                return Err(format!("empty {} entry for employee {}", name, id));
            }
            for key in keys {
                if endpoint(key) != *id {
                    return Err(format!("{} filed under employee {} in {}", key, id, name));
                }
                if !self.edges.contains_key(key) {
                    return Err(format!("{} index holds dangling {}", name, key));
                }
            }
        }
        Ok(())
    }

    fn indexed(index: &HashMap<EmployeeId, BTreeSet<EdgeKey>>, id: EmployeeId, key: &EdgeKey) -> bool {
        index.get(&id).is_some_and(|set| set.contains(key))
    }

    fn collect(
        &self,
        index: &HashMap<EmployeeId, BTreeSet<EdgeKey>>,
        id: EmployeeId,
        filter: EdgeFilter,
    ) -> Vec<Edge> {
        index
            .get(&id)
            .into_iter()
            .flatten()
            .filter(|key| filter.matches(key.kind()))
            .filter_map(|key| self.edges.get(key))
            .cloned()
            .collect()
    }
}
