use std::collections::HashMap;
use std::collections::VecDeque;

use crate::tokens::TokenKind;

/// Index of a state inside a [`DelimiterAutomaton`]. The default is the root.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

/// One automaton state: the prefix of at least one registered delimiter.
#[derive(Debug, Clone, Default)]
struct Node {
	/// Outgoing transitions keyed by the next character.
	children: HashMap<char, NodeId>,
	/// Set when the prefix of this node is a full registered delimiter.
	kind: Option<TokenKind>,
	/// The state to resume from when no transition matches.
	fallback: NodeId,
	/// Literal text released when falling back from this node.
	drop: String,
	/// The characters read from the root to reach this node.
	prefix: String,
}

impl Node {
	fn depth(&self) -> usize {
		self.prefix.chars().count()
	}
}

/// A trie of block delimiters with fallback links, recognising several
/// delimiters in a single pass over a character stream.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]. Every
/// fallback link points to a strictly shallower node except the root, which
/// falls back to itself, so fallback chains always terminate.
///
/// Build an automaton by calling [`register`](Self::register) for every
/// delimiter and then [`build_fallbacks`](Self::build_fallbacks) once. After
/// that the automaton is read only and can be shared between lexers.
#[derive(Debug, Clone)]
pub struct DelimiterAutomaton {
	nodes: Vec<Node>,
	built: bool,
}

impl Default for DelimiterAutomaton {
	fn default() -> Self {
		Self::new()
	}
}

impl DelimiterAutomaton {
	pub fn new() -> Self {
		Self {
			nodes: vec![Node::default()],
			built: false,
		}
	}

	pub fn root(&self) -> NodeId {
		ROOT
	}

	pub fn is_root(&self, node: NodeId) -> bool {
		node == ROOT
	}

	/// Number of states, the root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.len() == 1
	}

	/// The delimiter kind recognised when `node` is reached, if any.
	pub fn kind(&self, node: NodeId) -> Option<TokenKind> {
		self.nodes[node.0].kind
	}

	/// Insert `pattern` as a path from the root, terminating in `kind`.
	///
	/// Returns `false` without modifying the automaton when `pattern` is empty
	/// or was already registered, whatever kind it was registered with. A
	/// pattern that is a prefix of another one is accepted.
	pub fn register(&mut self, pattern: &str, kind: TokenKind) -> bool {
		if pattern.is_empty() || self.find(pattern).is_some_and(|node| self.kind(node).is_some()) {
			return false;
		}

		let mut node = ROOT;

		for ch in pattern.chars() {
			node = match self.nodes[node.0].children.get(&ch) {
				Some(&child) => child,
				None => {
					let child = NodeId(self.nodes.len());
					let mut prefix = self.nodes[node.0].prefix.clone();
					prefix.push(ch);

					self.nodes.push(Node {
						prefix,
						..Node::default()
					});
					self.nodes[node.0].children.insert(ch, child);

					child
				}
			};
		}

		self.nodes[node.0].kind = Some(kind);
		self.built = false;

		true
	}

	/// Compute the fallback node and drop string of every node.
	///
	/// Nodes are visited breadth first so each fallback is resolved from the
	/// already computed fallbacks of shallower nodes.
	pub fn build_fallbacks(&mut self) {
		let mut queue = VecDeque::new();

		self.nodes[ROOT.0].fallback = ROOT;
		self.nodes[ROOT.0].drop.clear();

		for &child in self.nodes[ROOT.0].children.values() {
			queue.push_back(child);
		}

		for child in queue.clone() {
			let node = &mut self.nodes[child.0];
			node.fallback = ROOT;
			node.drop.clone_from(&node.prefix);
		}

		while let Some(parent) = queue.pop_front() {
			let children: Vec<(char, NodeId)> = self.nodes[parent.0]
				.children
				.iter()
				.map(|(&ch, &child)| (ch, child))
				.collect();

			for (ch, child) in children {
				let fallback = self.resolve_fallback(self.nodes[parent.0].fallback, ch);
				let dropped = self.nodes[child.0].depth() - self.nodes[fallback.0].depth();
				let node = &mut self.nodes[child.0];

				node.fallback = fallback;
				node.drop = node.prefix.chars().take(dropped).collect();
				queue.push_back(child);
			}
		}

		self.built = true;

		tracing::debug!(
			nodes = self.nodes.len(),
			delimiters = self.nodes.iter().filter(|node| node.kind.is_some()).count(),
			"built delimiter automaton"
		);
	}

	/// Advance from `node` on `ch`.
	///
	/// When `node` has no transition for `ch` the fallback chain is followed
	/// and the drop string of every abandoned node is appended to `literal`.
	/// If even the root has no transition, `ch` itself is literal text and
	/// the root is returned.
	pub fn move_to(&self, node: NodeId, ch: char, literal: &mut String) -> NodeId {
		debug_assert!(self.built, "`build_fallbacks` must run before matching");

		let mut node = node;

		loop {
			let current = &self.nodes[node.0];

			if let Some(&child) = current.children.get(&ch) {
				return child;
			}

			if node == ROOT {
				literal.push(ch);
				return ROOT;
			}

			literal.push_str(&current.drop);
			node = current.fallback;
		}
	}

	/// Release the partial match held by `node` as literal text, by dropping
	/// every node of its fallback chain down to the root.
	pub fn flush(&self, node: NodeId, literal: &mut String) {
		debug_assert!(self.built, "`build_fallbacks` must run before matching");

		let mut node = node;

		while node != ROOT {
			let current = &self.nodes[node.0];

			literal.push_str(&current.drop);
			node = current.fallback;
		}
	}

	fn find(&self, pattern: &str) -> Option<NodeId> {
		pattern.chars().try_fold(ROOT, |node, ch| {
			self.nodes[node.0].children.get(&ch).copied()
		})
	}

	/// Follow fallbacks from `node` until a state with a transition on `ch`
	/// is found, or the root is reached.
	fn resolve_fallback(&self, node: NodeId, ch: char) -> NodeId {
		let mut node = node;

		loop {
			if let Some(&child) = self.nodes[node.0].children.get(&ch) {
				return child;
			}

			if node == ROOT {
				return ROOT;
			}

			node = self.nodes[node.0].fallback;
		}
	}
}
