//! Project reference graph and dependency collection
//!
//! The reference graph is materialized once per pack() call: starting from
//! the root project, every referenced project is loaded and becomes a graph
//! node, with edges in manifest declaration order. The dependency collector
//! then computes the ordered transitive closure `[root, dep1, dep2, ...]`
//! as a pre-order DFS, which is stable for identical input graphs. A
//! reference that revisits a project already on the current DFS path is a
//! cycle and fails the whole pack() call; nothing is ever re-entered or
//! looped.

use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};

use crate::{
    error::{PackError, Result},
    types::FxIndexMap,
    workspace::{Project, Workspace},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// The loaded project reference graph of one pack() invocation.
#[derive(Debug)]
pub struct ProjectGraph {
    graph: DiGraph<Project, ()>,
    root: NodeIndex,
}

impl ProjectGraph {
    /// Load the root project and everything it transitively references.
    pub fn build(workspace: &Workspace, root_dir: &Path) -> Result<Self> {
        let mut graph: DiGraph<Project, ()> = DiGraph::new();
        let mut nodes: FxIndexMap<PathBuf, NodeIndex> = FxIndexMap::default();

        let root_project = workspace.load_project(root_dir)?;
        let root = graph.add_node(root_project);
        nodes.insert(graph[root].dir.clone(), root);

        let mut queue = vec![root];
        while let Some(node) = queue.pop() {
            let references = graph[node].references.clone();
            for reference in references {
                let referrer = graph[node].name.clone();
                let target = match std::fs::canonicalize(&reference) {
                    Ok(dir) => dir,
                    Err(_) => {
                        return Err(PackError::CyclicOrMissingReference(format!(
                            "project `{referrer}` references {}, which cannot be located",
                            reference.display()
                        )));
                    }
                };
                let target_node = match nodes.get(&target) {
                    Some(&existing) => existing,
                    None => {
                        let project = workspace.load_project(&target)?;
                        let added = graph.add_node(project);
                        nodes.insert(target, added);
                        queue.push(added);
                        added
                    }
                };
                graph.add_edge(node, target_node, ());
            }
        }

        log::debug!(
            "Reference graph has {} projects and {} references",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, root })
    }

    /// Ordered transitive closure of the root: the root first, then every
    /// transitively referenced project exactly once, in pre-order DFS.
    pub fn closure(&self) -> Result<Vec<&Project>> {
        let mut marks = vec![Mark::Unvisited; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count());
        let mut stack: Vec<(NodeIndex, std::vec::IntoIter<NodeIndex>)> = Vec::new();

        marks[self.root.index()] = Mark::OnPath;
        order.push(self.root);
        stack.push((self.root, self.children(self.root)));

        while let Some(frame) = stack.last_mut() {
            let next_child = frame.1.next();
            match next_child {
                Some(child) => match marks[child.index()] {
                    Mark::OnPath => {
                        return Err(self.cycle_error(&stack, child));
                    }
                    Mark::Unvisited => {
                        marks[child.index()] = Mark::OnPath;
                        order.push(child);
                        stack.push((child, self.children(child)));
                    }
                    Mark::Done => {}
                },
                None => {
                    let (done, _) = stack.pop().expect("stack entry just observed");
                    marks[done.index()] = Mark::Done;
                }
            }
        }

        Ok(order.into_iter().map(|node| &self.graph[node]).collect())
    }

    /// Direct references of a node in manifest declaration order. petgraph
    /// iterates neighbors in reverse insertion order, so restore it.
    fn children(&self, node: NodeIndex) -> std::vec::IntoIter<NodeIndex> {
        let mut children: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        children.reverse();
        children.into_iter()
    }

    fn cycle_error(
        &self,
        stack: &[(NodeIndex, std::vec::IntoIter<NodeIndex>)],
        repeat: NodeIndex,
    ) -> PackError {
        let mut chain: Vec<&str> = stack
            .iter()
            .map(|(node, _)| self.graph[*node].name.as_str())
            .collect();
        chain.push(self.graph[repeat].name.as_str());
        PackError::CyclicOrMissingReference(format!(
            "project reference cycle: {}",
            chain.join(" -> ")
        ))
    }
}
