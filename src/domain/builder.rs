//! Site builder: assembles a content arena from flat parent-referencing node specs.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::ContentArena;
use crate::domain::entities::{NodeData, NodeId};
use crate::domain::error::DomainError;

/// Result type for graph construction.
pub type TreeResult<T> = Result<T, DomainError>;

/// One node declaration: its payload and the name of its parent.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub parent: Option<String>,
    pub data: NodeData,
}

/// Built graph plus the name index used to resolve references into it.
#[derive(Debug)]
pub struct SiteGraph {
    pub arena: ContentArena,
    pub names: HashMap<String, NodeId>,
}

impl SiteGraph {
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.arena.root()
    }
}

/// Constructs a single-rooted hierarchy from node specs.
#[derive(Debug, Default)]
pub struct SiteBuilder {
    specs: HashMap<String, NodeSpec>,
    /// Declaration order, which is also child order
    order: Vec<String>,
    relationship_cache: HashMap<String, Vec<String>>,
    visited: HashSet<String>,
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: NodeSpec) -> TreeResult<()> {
        let name = spec.data.name.clone();
        if self.specs.contains_key(&name) {
            return Err(DomainError::DuplicateNode(name));
        }
        self.order.push(name.clone());
        self.specs.insert(name, spec);
        Ok(())
    }

    /// Build the graph, validating parents, the single root and acyclicity.
    #[instrument(level = "debug", skip(self), fields(nodes = self.order.len()))]
    pub fn build(&mut self) -> TreeResult<SiteGraph> {
        self.relationship_cache.clear();
        self.visited.clear();

        let mut roots = Vec::new();
        for name in &self.order {
            match &self.specs[name].parent {
                Some(parent) if !self.specs.contains_key(parent) => {
                    return Err(DomainError::UnknownParent {
                        node: name.clone(),
                        parent: parent.clone(),
                    });
                }
                Some(parent) => self
                    .relationship_cache
                    .entry(parent.clone())
                    .or_default()
                    .push(name.clone()),
                None => roots.push(name.clone()),
            }
        }

        let root = match roots.as_slice() {
            [root] => root.clone(),
            [] if self.order.is_empty() => return Err(DomainError::NoRoot),
            // every node has a parent, so the parent links loop
            [] => return Err(DomainError::CycleDetected(self.order[0].clone())),
            _ => return Err(DomainError::MultipleRoots(roots)),
        };

        let graph = self.build_tree(&root)?;

        if let Some(orphan) = self.order.iter().find(|n| !self.visited.contains(*n)) {
            return Err(DomainError::CycleDetected(orphan.clone()));
        }
        debug!("built site with {} nodes", graph.arena.len());
        Ok(graph)
    }

    fn build_tree(&mut self, root: &str) -> TreeResult<SiteGraph> {
        let mut arena = ContentArena::new();
        let mut names = HashMap::new();
        let mut stack: Vec<(String, Option<(NodeId, String)>)> = vec![(root.to_string(), None)];

        while let Some((name, parent)) = stack.pop() {
            // Cycle detection
            if !self.visited.insert(name.clone()) {
                return Err(DomainError::CycleDetected(name));
            }

            let mut data = self.specs[&name].data.clone();
            if data.url.is_empty() {
                data.url = match &parent {
                    Some((_, parent_url)) => {
                        format!("{}/{}/", parent_url.trim_end_matches('/'), data.name)
                    }
                    None => "/".to_string(),
                };
            }
            let url = data.url.clone();
            let id = arena.insert_node(data, parent.map(|(id, _)| id));
            names.insert(name.clone(), id);

            // Reverse so the first declared child is inserted first
            if let Some(children) = self.relationship_cache.get(&name) {
                for child in children.iter().rev() {
                    stack.push((child.clone(), Some((id, url.clone()))));
                }
            }
        }

        Ok(SiteGraph { arena, names })
    }
}
