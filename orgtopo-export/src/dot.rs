//! Graphviz rendering of accepted samples.
//!
//! Each family gets its own layout hints: bipartite graphs put buyers and
//! sellers in two ranked columns, trees are drawn top-down from node `0`,
//! and everything else uses a force-directed layout.

use std::{
    collections::VecDeque,
    fmt,
    fs::File,
    io::{BufWriter, Write},
    num::NonZeroUsize,
};

use orgtopo_core::{AcceptanceObserver, Graph, GraphFamily, ObserverError, Partition};
use tracing::{debug, instrument};

use crate::{error::ExportError, layout::OutputLayout};

/// Layout strategy chosen for a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotLayout {
    /// Two ranked columns, left to right.
    Bipartite,
    /// Rooted top-down hierarchy.
    Hierarchy,
    /// Force-directed placement.
    Generic,
}

impl DotLayout {
    /// Picks the layout for `graph` from its family and partition.
    #[must_use]
    pub fn for_graph(graph: &Graph) -> Self {
        match graph.family() {
            _ if graph.partition().is_some() => Self::Bipartite,
            Some(GraphFamily::UniformRandomTree) => Self::Hierarchy,
            Some(GraphFamily::BipartiteRandom | GraphFamily::DirectedRandom) | None => {
                Self::Generic
            }
        }
    }
}

/// DOT document for one graph, produced through [`fmt::Display`].
///
/// # Examples
/// ```
/// use orgtopo_core::{Directedness, Graph};
/// use orgtopo_export::Dot;
///
/// let graph = Graph::try_new(2, Directedness::Directed, [(0, 1)])?;
/// let text = Dot::new("team-1", &graph).to_string();
/// assert!(text.starts_with("digraph \"team-1\" {"));
/// assert!(text.contains("  0 -> 1;"));
/// # Ok::<(), orgtopo_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Dot<'a> {
    name: &'a str,
    graph: &'a Graph,
    layout: DotLayout,
}

impl<'a> Dot<'a> {
    /// Renders `graph` under the layout [`DotLayout::for_graph`] selects.
    #[must_use]
    pub fn new(name: &'a str, graph: &'a Graph) -> Self {
        Self {
            name,
            graph,
            layout: DotLayout::for_graph(graph),
        }
    }

    /// Layout the document uses.
    #[must_use]
    pub fn layout(&self) -> DotLayout {
        self.layout
    }

    fn write_bipartite(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  rankdir=LR;")?;
        writeln!(f, "  node [shape=circle];")?;
        for (side, partition, prefix, colour) in [
            ("buyers", Partition::Buyer, 'B', "lightblue"),
            ("sellers", Partition::Seller, 'S', "lightsalmon"),
        ] {
            writeln!(f, "  subgraph {side} {{")?;
            writeln!(f, "    rank=same;")?;
            for node in self
                .graph
                .nodes()
                .filter(|&node| self.graph.partition_of(node) == Some(partition))
            {
                writeln!(
                    f,
                    "    {node} [style=filled, fillcolor={colour}, label=\"{prefix}{node}\"];"
                )?;
            }
            writeln!(f, "  }}")?;
        }
        self.write_edges(f, self.graph.edges().iter().copied())
    }

    fn write_hierarchy(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  rankdir=TB;")?;
        writeln!(f, "  node [shape=box];")?;
        writeln!(f, "  edge [arrowhead=none];")?;
        for node in self.graph.nodes() {
            writeln!(f, "  {node};")?;
        }
        self.write_edges(f, rooted_edges(self.graph).into_iter())
    }

    fn write_generic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  layout=neato;")?;
        writeln!(f, "  overlap=false;")?;
        writeln!(f, "  node [shape=circle];")?;
        if !self.graph.is_directed() {
            writeln!(f, "  edge [dir=none];")?;
        }
        for node in self.graph.nodes() {
            writeln!(f, "  {node};")?;
        }
        self.write_edges(f, self.graph.edges().iter().copied())
    }

    fn write_edges(
        &self,
        f: &mut fmt::Formatter<'_>,
        edges: impl Iterator<Item = (usize, usize)>,
    ) -> fmt::Result {
        for (source, target) in edges {
            writeln!(f, "  {source} -> {target};")?;
        }
        Ok(())
    }
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph \"{}\" {{", self.name.escape_default())?;
        match self.layout {
            DotLayout::Bipartite => self.write_bipartite(f)?,
            DotLayout::Hierarchy => self.write_hierarchy(f)?,
            DotLayout::Generic => self.write_generic(f)?,
        }
        writeln!(f, "}}")
    }
}

/// Orients the edges of a tree away from node `0`, in breadth-first order.
///
/// Edges outside the component of the root keep their stored orientation and
/// follow the rooted ones.
fn rooted_edges(graph: &Graph) -> Vec<(usize, usize)> {
    let mut adjacency = vec![Vec::new(); graph.node_count()];
    for &(a, b) in graph.edges() {
        if let Some(neighbours) = adjacency.get_mut(a) {
            neighbours.push(b);
        }
        if let Some(neighbours) = adjacency.get_mut(b) {
            neighbours.push(a);
        }
    }

    let mut visited = vec![false; graph.node_count()];
    let mut oriented = Vec::with_capacity(graph.edge_count());
    let mut queue = VecDeque::new();
    if let Some(root) = visited.first_mut() {
        *root = true;
        queue.push_back(0);
    }
    while let Some(parent) = queue.pop_front() {
        let Some(children) = adjacency.get(parent) else {
            continue;
        };
        for &child in children {
            if let Some(seen) = visited.get_mut(child).filter(|seen| !**seen) {
                *seen = true;
                oriented.push((parent, child));
                queue.push_back(child);
            }
        }
    }

    let reached = |node: usize| visited.get(node).copied().unwrap_or(false);
    let detached: Vec<(usize, usize)> = graph
        .edges()
        .iter()
        .copied()
        .filter(|&(a, b)| !reached(a) && !reached(b))
        .collect();
    oriented.extend(detached);
    oriented
}

/// Writes one DOT file per accepted sample.
///
/// Implements [`AcceptanceObserver`] so rendering happens the moment a sample
/// joins the corpus.
#[derive(Clone, Debug)]
pub struct DotRenderer {
    layout: OutputLayout,
    written: usize,
}

impl DotRenderer {
    /// Renders into the plot directory of `layout`, which must exist.
    #[must_use]
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout, written: 0 }
    }

    /// Number of files written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Writes the document for sample `ordinal`.
    ///
    /// # Errors
    /// Returns [`ExportError::Io`] when the file cannot be written.
    #[instrument(name = "export.render", level = "debug", err, skip(self, graph))]
    pub fn render(&mut self, ordinal: NonZeroUsize, graph: &Graph) -> Result<(), ExportError> {
        let path = self.layout.graph_path(ordinal);
        let name = format!("{}-{ordinal}", self.layout.stem());
        let io_error = |source| ExportError::Io {
            path: path.clone(),
            source,
        };
        let mut out = BufWriter::new(File::create(&path).map_err(io_error)?);
        write!(out, "{}", Dot::new(&name, graph)).map_err(io_error)?;
        out.flush().map_err(io_error)?;
        self.written += 1;
        debug!(path = %path.display(), "graph rendered");
        Ok(())
    }
}

impl AcceptanceObserver for DotRenderer {
    fn sample_accepted(
        &mut self,
        ordinal: NonZeroUsize,
        graph: &Graph,
    ) -> Result<(), ObserverError> {
        Ok(self.render(ordinal, graph)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use orgtopo_core::{
        Directedness,
        generator::{bipartite_random, tree_from_prufer},
    };
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    fn bipartite_graphs_get_ranked_columns() {
        let graph = bipartite_random(2, 1, 1.0, &mut SmallRng::seed_from_u64(0));
        let dot = Dot::new("market-1", &graph);
        assert_eq!(dot.layout(), DotLayout::Bipartite);
        let text = dot.to_string();
        assert!(text.contains("rankdir=LR;"));
        assert!(text.contains("subgraph buyers {"));
        assert!(text.contains("  0 -> 2;\n  1 -> 2;\n"));
    }

    #[rstest]
    fn trees_point_away_from_the_root() {
        // Prüfer [3, 3] decodes to the star centred on 3.
        let tree = tree_from_prufer(&[3, 3]).expect("valid sequence");
        assert_eq!(DotLayout::for_graph(&tree), DotLayout::Hierarchy);
        assert_eq!(rooted_edges(&tree), vec![(0, 3), (3, 1), (3, 2)]);
        let text = Dot::new("hierarchy-2", &tree).to_string();
        assert!(text.contains("edge [arrowhead=none];"));
        assert!(text.contains("  0 -> 3;"));
    }

    #[rstest]
    fn forests_keep_detached_edges_after_the_rooted_ones() {
        let forest = Graph::try_new(5, Directedness::Undirected, [(1, 0), (3, 4), (2, 1)])
            .expect("valid edges")
            .with_family(GraphFamily::UniformRandomTree);
        assert_eq!(DotLayout::for_graph(&forest), DotLayout::Hierarchy);
        assert_eq!(rooted_edges(&forest), vec![(0, 1), (1, 2), (3, 4)]);
        let text = Dot::new("forest", &forest).to_string();
        assert_eq!(text.matches(" -> ").count(), 3);
    }

    #[rstest]
    fn unlabelled_graphs_use_the_force_layout() {
        let graph = Graph::try_new(3, Directedness::Undirected, [(0, 1), (1, 2)])
            .expect("valid edges");
        let dot = Dot::new("plain", &graph);
        assert_eq!(dot.layout(), DotLayout::Generic);
        let text = dot.to_string();
        assert!(text.contains("layout=neato;"));
        assert!(text.contains("edge [dir=none];"));
        assert!(text.ends_with("}\n"));
    }
}
