//! Single-inheritance type hierarchy.
//!
//! Every type has at most one supertype; a type without one hangs off the
//! root. Each type's subtype set is transitive: adding an edge pushes the
//! new subtype and everything beneath it into every ancestor up to the
//! root. `subtypes(root)` is every type the tree knows about.
//!
//! Edges whose supertype is only known by name (an `inherits` clause that
//! names a class from another dictionary) are held as orphans until a
//! lookup can resolve them.

use rustc_hash::{FxHashMap, FxHashSet};

use super::name::TermName;
use super::uri::SemanticUri;

/// A type edge waiting for its supertype's name to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrphanEdge {
    pub subtype: SemanticUri,
    pub supertype_name: TermName,
}

#[derive(Clone, Debug)]
pub struct TypeTree {
    root: SemanticUri,
    supertypes: FxHashMap<SemanticUri, SemanticUri>,
    subtypes: FxHashMap<SemanticUri, FxHashSet<SemanticUri>>,
    known: FxHashSet<SemanticUri>,
    orphans: Vec<OrphanEdge>,
}

impl TypeTree {
    pub fn new(root: SemanticUri) -> Self {
        Self {
            root,
            supertypes: FxHashMap::default(),
            subtypes: FxHashMap::default(),
            known: FxHashSet::default(),
            orphans: Vec::new(),
        }
    }

    pub fn root(&self) -> &SemanticUri {
        &self.root
    }

    pub fn contains(&self, ty: &SemanticUri) -> bool {
        *ty == self.root || self.known.contains(ty)
    }

    /// Record `supertype` as the supertype of `ty`.
    ///
    /// Re-adding an existing edge changes nothing. Adding a different
    /// supertype for a type moves it and its subtypes to the new chain.
    /// An edge that would make a type its own ancestor is ignored.
    pub fn add(&mut self, ty: SemanticUri, supertype: SemanticUri) {
        if ty == self.root || ty == supertype {
            return;
        }
        if self.is_a(&supertype, &ty) {
            tracing::debug!(%ty, %supertype, "ignoring type edge that would form a cycle");
            return;
        }

        self.known.insert(ty.clone());
        if supertype != self.root {
            self.known.insert(supertype.clone());
        }

        let previous = self.supertypes.insert(ty.clone(), supertype.clone());
        if previous.as_ref() == Some(&supertype) {
            return;
        }

        let mut moving: Vec<SemanticUri> = vec![ty.clone()];
        if let Some(beneath) = self.subtypes.get(&ty) {
            moving.extend(beneath.iter().cloned());
        }

        if let Some(previous) = previous {
            for ancestor in self.chain_from(previous) {
                if let Some(set) = self.subtypes.get_mut(&ancestor) {
                    for moved in &moving {
                        set.remove(moved);
                    }
                }
            }
        }
        for ancestor in self.chain_from(supertype) {
            self.subtypes
                .entry(ancestor)
                .or_default()
                .extend(moving.iter().cloned());
        }
    }

    /// The supertype of `ty`. Types without an explicit edge have the root.
    /// The root itself has no supertype and yields `None`, which is what
    /// ends an ancestor walk.
    pub fn supertype(&self, ty: &SemanticUri) -> Option<&SemanticUri> {
        if *ty == self.root {
            return None;
        }
        Some(self.supertypes.get(ty).unwrap_or(&self.root))
    }

    /// Every type beneath `ty`. For the root this is every known type.
    pub fn subtypes(&self, ty: &SemanticUri) -> FxHashSet<SemanticUri> {
        if *ty == self.root {
            return self.known.clone();
        }
        self.subtypes.get(ty).cloned().unwrap_or_default()
    }

    /// Ancestors of `ty` from its supertype up to and including the root.
    pub fn ancestors(&self, ty: &SemanticUri) -> Vec<SemanticUri> {
        match self.supertype(ty) {
            Some(supertype) => self.chain_from(supertype.clone()),
            None => Vec::new(),
        }
    }

    /// True if `ty` is `other` or lies beneath it.
    pub fn is_a(&self, ty: &SemanticUri, other: &SemanticUri) -> bool {
        ty == other || *other == self.root || self.ancestors(ty).contains(other)
    }

    /// `start` followed by each of its ancestors up to the root.
    fn chain_from(&self, start: SemanticUri) -> Vec<SemanticUri> {
        let mut chain = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = start;
        while visited.insert(current.clone()) {
            chain.push(current.clone());
            if current == self.root {
                break;
            }
            current = self
                .supertypes
                .get(&current)
                .cloned()
                .unwrap_or_else(|| self.root.clone());
        }
        chain
    }

    // ========================================================================
    // ORPHANS
    // ========================================================================

    /// Hold an edge whose supertype is only known by name.
    pub fn add_orphan(&mut self, subtype: SemanticUri, supertype_name: TermName) {
        self.known.insert(subtype.clone());
        self.orphans.push(OrphanEdge {
            subtype,
            supertype_name,
        });
    }

    pub fn orphans(&self) -> &[OrphanEdge] {
        &self.orphans
    }

    /// Link every orphan whose supertype name `lookup` resolves. Returns
    /// how many were linked; the rest stay orphaned.
    pub fn reconcile<F>(&mut self, mut lookup: F) -> usize
    where
        F: FnMut(&TermName) -> Option<SemanticUri>,
    {
        let pending = std::mem::take(&mut self.orphans);
        let mut linked = 0;
        for orphan in pending {
            match lookup(&orphan.supertype_name) {
                Some(supertype) => {
                    self.add(orphan.subtype, supertype);
                    linked += 1;
                }
                None => self.orphans.push(orphan),
            }
        }
        if !self.orphans.is_empty() {
            tracing::debug!(remaining = self.orphans.len(), "unresolved type edges");
        }
        linked
    }

    /// Add every edge and orphan of `other`.
    pub fn merge(&mut self, other: &TypeTree) {
        for (ty, supertype) in &other.supertypes {
            self.add(ty.clone(), supertype.clone());
        }
        for ty in &other.known {
            self.known.insert(ty.clone());
        }
        self.orphans.extend(other.orphans.iter().cloned());
    }
}
