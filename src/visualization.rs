//! # Visualization
//!
//! $$
//! L(i,j)\mapsto\text{layered tree graph, two forward edges per non-terminal node}
//! $$
//!
use impl_new_derive::ImplNew;
use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;
use plotly::common::Anchor;
use plotly::common::Font;
use plotly::common::Line;
use plotly::common::Marker;
use plotly::common::Mode;
use plotly::common::color::NamedColor;
use plotly::layout::Annotation;
use plotly::layout::GridPattern;
use plotly::layout::LayoutGrid;
use plotly::layout::Margin;

use crate::lattice::Lattice;

/// Node of a layered tree graph, keyed by `(step, node)`.
#[derive(ImplNew, Debug, Clone, Copy, PartialEq)]
pub struct TreeNode {
  /// Time layer index.
  pub step: usize,
  /// Node index within the layer (number of down-moves).
  pub node: usize,
  /// Layout x coordinate (the time layer).
  pub x: f64,
  /// Layout y coordinate, spread symmetrically around the root.
  pub y: f64,
  /// Value displayed at the node.
  pub label: f64,
}

/// Edge from a node to one of its two successors at the next layer.
#[derive(ImplNew, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
  pub from: (usize, usize),
  pub to: (usize, usize),
}

/// Layered graph of a triangular lattice.
///
/// Holds `(n + 1)(n + 2) / 2` nodes and `n(n + 1)` edges for an `n`-step
/// lattice. Node `(i, j)` sits at `x = i`, `y = n + i - 2j`, so each layer
/// spreads symmetrically around the root's height.
#[derive(Debug, Clone)]
pub struct TreeGraph {
  nodes: Vec<TreeNode>,
  edges: Vec<TreeEdge>,
  steps: usize,
}

impl TreeGraph {
  /// Build the graph of `lattice`: one node per valid cell, edges from
  /// every node below the terminal layer to its two successors.
  pub fn from_lattice(lattice: &Lattice) -> Self {
    let n = lattice.steps();
    let mut nodes = Vec::with_capacity(lattice.node_count());
    let mut edges = Vec::with_capacity(n * (n + 1));
    for i in 0..=n {
      for j in 0..=i {
        let y = (n + i) as f64 - 2.0 * j as f64;
        nodes.push(TreeNode::new(i, j, i as f64, y, lattice.get(i, j)));
        if i < n {
          edges.push(TreeEdge::new((i, j), (i + 1, j)));
          edges.push(TreeEdge::new((i, j), (i + 1, j + 1)));
        }
      }
    }

    Self { nodes, edges, steps: n }
  }

  pub fn steps(&self) -> usize {
    self.steps
  }

  pub fn nodes(&self) -> &[TreeNode] {
    &self.nodes
  }

  pub fn edges(&self) -> &[TreeEdge] {
    &self.edges
  }

  /// Layout position of node `(step, node)`.
  pub fn position(&self, step: usize, node: usize) -> (f64, f64) {
    (step as f64, (self.steps + step) as f64 - 2.0 * node as f64)
  }
}

struct TreeEntry {
  title: String,
  graph: TreeGraph,
}

/// Builder that renders lattices as layered tree figures.
pub struct TreePlotter {
  entries: Vec<TreeEntry>,
  cols: usize,
  node_size: usize,
  line_width: f64,
  title: String,
}

impl TreePlotter {
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
      cols: 2,
      node_size: 30,
      line_width: 1.0,
      title: String::new(),
    }
  }

  pub fn title(mut self, title: &str) -> Self {
    self.title = title.into();
    self
  }

  pub fn cols(mut self, n: usize) -> Self {
    self.cols = n.max(1);
    self
  }

  pub fn node_size(mut self, size: usize) -> Self {
    self.node_size = size;
    self
  }

  pub fn line_width(mut self, w: f64) -> Self {
    self.line_width = w;
    self
  }

  pub fn register(mut self, lattice: &Lattice, title: &str) -> Self {
    self.entries.push(TreeEntry {
      title: title.into(),
      graph: TreeGraph::from_lattice(lattice),
    });

    self
  }

  pub fn plot(self) -> Plot {
    let n_entries = self.entries.len();
    let cols = self.cols.min(n_entries.max(1));
    let rows = n_entries.div_ceil(cols).max(1);

    let axis_name = |subplot_idx: usize, axis: &str| -> String {
      if subplot_idx == 1 {
        axis.to_string()
      } else {
        format!("{axis}{subplot_idx}")
      }
    };

    let mut annotations = Vec::with_capacity(n_entries);
    for (idx, entry) in self.entries.iter().enumerate() {
      let subplot_idx = idx + 1;
      let xa = axis_name(subplot_idx, "x");
      let ya = axis_name(subplot_idx, "y");

      annotations.push(
        Annotation::new()
          .text(format!("<b>{}</b>", entry.title))
          .x_ref(format!("{xa} domain"))
          .y_ref(format!("{ya} domain"))
          .x(0.5)
          .y(1.0)
          .x_anchor(Anchor::Center)
          .y_anchor(Anchor::Bottom)
          .font(Font::new().size(12))
          .show_arrow(false),
      );
    }

    let mut plot = Plot::new();
    plot.set_layout(
      Layout::new()
        .title(self.title.as_str())
        .auto_size(true)
        .height(rows * 480 + 160)
        .margin(Margin::new().left(48).right(24).top(72).bottom(40))
        .annotations(annotations)
        .grid(
          LayoutGrid::new()
            .rows(rows)
            .columns(cols)
            .pattern(GridPattern::Independent),
        ),
    );

    for (idx, entry) in self.entries.iter().enumerate() {
      let subplot_idx = idx + 1;
      let xa = axis_name(subplot_idx, "x");
      let ya = axis_name(subplot_idx, "y");
      let graph = &entry.graph;

      for edge in graph.edges() {
        let (x0, y0) = graph.position(edge.from.0, edge.from.1);
        let (x1, y1) = graph.position(edge.to.0, edge.to.1);
        let segment = Scatter::new(vec![x0, x1], vec![y0, y1])
          .mode(Mode::Lines)
          .line(Line::new().width(self.line_width).color(NamedColor::Gray))
          .show_legend(false)
          .x_axis(xa.as_str())
          .y_axis(ya.as_str());
        plot.add_trace(segment);
      }

      let xs: Vec<f64> = graph.nodes().iter().map(|node| node.x).collect();
      let ys: Vec<f64> = graph.nodes().iter().map(|node| node.y).collect();
      let labels: Vec<String> = graph
        .nodes()
        .iter()
        .map(|node| node.label.to_string())
        .collect();
      let hover_text = graph
        .nodes()
        .iter()
        .map(|node| format!("step {}, node {}: {}", node.step, node.node, node.label))
        .collect::<Vec<String>>();
      let markers = Scatter::new(xs, ys)
        .mode(Mode::MarkersText)
        .text_array(labels)
        .marker(
          Marker::new()
            .size(self.node_size)
            .color(NamedColor::White)
            .line(Line::new().width(1.0).color(NamedColor::Gray)),
        )
        .hover_text_array(hover_text)
        .hover_template("%{hovertext}<extra></extra>")
        .show_legend(false)
        .x_axis(xa.as_str())
        .y_axis(ya.as_str());
      plot.add_trace(markers);
    }

    plot
  }

  pub fn show(self) {
    self.plot().show();
  }
}
