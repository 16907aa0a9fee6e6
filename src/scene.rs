use std::fmt::{self, Display};

use glam::{Mat4, Vec4};
use indextree::{Arena, NodeId};

use crate::host::{Capability, Primitive, SceneSink, SceneSource};
use crate::math::transform::TransformOffset;

/// One live node of a [`Scene`].
#[derive(Debug)]
pub struct SceneNode {
	pub name: String,
	pub primitive: Primitive,
	pub trans_offset: TransformOffset,
	/// Graphic color, or material color when a surface is attached.
	pub color: Option<Vec4>,
	pub has_surface: bool,
	pub capabilities: Vec<Box<dyn Capability>>,
}

impl SceneNode {
	fn new(name: &str, primitive: Primitive) -> Self {
		Self {
			name: name.to_owned(),
			primitive,
			trans_offset: TransformOffset::default(),
			color: None,
			has_surface: false,
			capabilities: Vec::new(),
		}
	}

	pub fn capability_names(&self) -> impl Iterator<Item = &str> {
		self.capabilities.iter().map(|c| c.type_name())
	}

	pub fn capability<T: Capability>(&self) -> Option<&T> {
		self.capabilities.iter().find_map(|c| c.as_any().downcast_ref::<T>())
	}

	pub fn has_capability(&self, name: &str) -> bool {
		self.capability_names().any(|n| n == name)
	}
}

/// In-memory scene host backed by an arena.
///
/// Handles are arena ids. Passing an id from another scene, or one whose node was despawned,
/// panics.
#[derive(Debug, Default)]
pub struct Scene {
	arena: Arena<SceneNode>,
	roots: Vec<NodeId>,
}

impl Scene {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
		self.arena.get(id).filter(|n| !n.is_removed()).map(indextree::Node::get)
	}

	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
		self.arena
			.get_mut(id)
			.filter(|n| !n.is_removed())
			.map(indextree::Node::get_mut)
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.arena.get(id)?.parent()
	}

	/// Top-level nodes in creation order.
	pub fn roots(&self) -> &[NodeId] {
		&self.roots
	}

	pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
		id.children(&self.arena).collect()
	}

	/// All live nodes below and including `id`, in pre-order.
	pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		id.descendants(&self.arena).collect()
	}

	/// First live node named `name`, searching each root in pre-order.
	pub fn find(&self, name: &str) -> Option<NodeId> {
		self.roots
			.iter()
			.flat_map(|root| root.descendants(&self.arena))
			.find(|id| self.arena[*id].get().name == name)
	}

	/// Transform from `id`'s local frame to the scene frame.
	pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
		self.get(id)?;
		Some(
			id.ancestors(&self.arena)
				.map(|ancestor| self.arena[ancestor].get().trans_offset.to_matrix())
				.fold(Mat4::IDENTITY, |child_to_scene, parent| parent * child_to_scene),
		)
	}

	pub fn node_count(&self) -> usize {
		self.arena.iter().filter(|n| !n.is_removed()).count()
	}

	/// Removes `id` and everything below it.
	pub fn despawn(&mut self, id: NodeId) {
		self.roots.retain(|root| *root != id);
		id.remove_subtree(&mut self.arena);
	}
}

impl SceneSource for Scene {
	type Handle = NodeId;

	fn name(&self, node: NodeId) -> &str {
		&self.arena[node].get().name
	}

	fn local_transform(&self, node: NodeId) -> TransformOffset {
		self.arena[node].get().trans_offset
	}

	fn capability_names(&self, node: NodeId) -> Vec<String> {
		self.arena[node].get().capability_names().map(str::to_owned).collect()
	}

	fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.child_ids(node)
	}

	fn color(&self, node: NodeId) -> Option<Vec4> {
		self.arena[node].get().color
	}
}

impl SceneSink for Scene {
	type Handle = NodeId;

	fn spawn(&mut self, name: &str, primitive: Primitive, parent: Option<NodeId>) -> NodeId {
		let id = self.arena.new_node(SceneNode::new(name, primitive));
		match parent {
			Some(parent) => parent.append(id, &mut self.arena),
			None => self.roots.push(id),
		}
		id
	}

	fn set_local_transform(&mut self, node: NodeId, offset: &TransformOffset) {
		self.arena[node].get_mut().trans_offset = *offset;
	}

	fn set_color(&mut self, node: NodeId, color: Vec4) {
		self.arena[node].get_mut().color = Some(color);
	}

	fn attach_surface(&mut self, node: NodeId, color: Vec4) {
		let node = self.arena[node].get_mut();
		node.has_surface = true;
		node.color = Some(color);
	}

	fn attach(&mut self, node: NodeId, capability: Box<dyn Capability>) {
		self.arena[node].get_mut().capabilities.push(capability);
	}
}

fn rec_fmt(indent: usize, f: &mut fmt::Formatter<'_>, node_id: NodeId, arena: &Arena<SceneNode>) -> fmt::Result {
	let Some(node) = arena.get(node_id) else {
		return Ok(());
	};

	let node = node.get();

	let primitive = format!("{:?}", node.primitive);
	#[cfg(feature = "owo")]
	let primitive = {
		use owo_colors::OwoColorize;
		primitive.magenta().to_string()
	};

	write!(f, "{}- [{}] {}", "  ".repeat(indent), primitive, node.name)?;
	if !node.capabilities.is_empty() {
		write!(f, " ({})", node.capability_names().collect::<Vec<_>>().join(", "))?;
	}
	writeln!(f)?;
	for child in node_id.children(arena) {
		rec_fmt(indent + 1, f, child, arena)?;
	}

	Ok(())
}

impl Display for Scene {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.roots.is_empty() {
			return write!(f, "(empty)");
		}

		for root in &self.roots {
			rec_fmt(0, f, *root, &self.arena)?;
		}

		Ok(())
	}
}
