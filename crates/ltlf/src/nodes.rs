use std::{fmt, hash::Hash, marker::PhantomData};

use ahash::AHashMap;

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub struct NodeArena<N> {
    nodes: Vec<N>,
}

pub struct NodeId<N> {
    id: u32,
    _ph: PhantomData<N>,
}

impl<N: fmt::Debug> fmt::Debug for NodeId<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<N>();
        write!(
            f,
            "N[{}@{}]",
            name.rsplit("::").next().unwrap_or(name).trim_end_matches('>'),
            self.id
        )
    }
}

impl<N> NodeId<N> {
    fn new(id: u32) -> Self {
        Self {
            id,
            _ph: PhantomData,
        }
    }
}

impl<N> Clone for NodeId<N> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<N> Copy for NodeId<N> {}
impl<N> PartialEq for NodeId<N> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<N> Eq for NodeId<N> {}
impl<N> PartialOrd for NodeId<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<N> Ord for NodeId<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}
impl<N> Hash for NodeId<N> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: Default::default(),
        }
    }
}

impl<N> NodeArena<N> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn push(&mut self, node: N) -> NodeId<N> {
        let id = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeId::new(id)
    }
}

impl<N> std::ops::Index<NodeId<N>> for NodeArena<N> {
    type Output = N;

    fn index(&self, id: NodeId<N>) -> &Self::Output {
        &self.nodes[id.id as usize]
    }
}

/// A [`NodeArena`] where structurally equal nodes share one id.
#[derive(Debug, Clone)]
pub struct Interner<N> {
    arena: NodeArena<N>,
    ids: AHashMap<N, NodeId<N>>,
}

impl<N> Default for Interner<N> {
    fn default() -> Self {
        Self {
            arena: NodeArena::new(),
            ids: AHashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> Interner<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, node: N) -> NodeId<N> {
        if let Some(id) = self.ids.get(&node) {
            return *id;
        }
        let id = self.arena.push(node.clone());
        self.ids.insert(node, id);
        id
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

}

impl<N> std::ops::Index<NodeId<N>> for Interner<N> {
    type Output = N;

    fn index(&self, id: NodeId<N>) -> &Self::Output {
        &self.arena[id]
    }
}
