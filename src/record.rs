use std::fmt;

use glam::{Vec3, Vec4};

use crate::math::transform::TransformOffset;

/// Opaque white, the color every captured node carries.
pub const WHITE: Vec4 = Vec4::ONE;

/// Serializable snapshot of one node and everything below it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
	/// Not unique within a tree.
	pub name: String,
	pub trans_offset: TransformOffset,
	/// RGBA in `[0, 1]`. `None` means no color was recorded, which is not the same as any color.
	pub color: Option<Vec4>,
	/// Capabilities to attach, in attachment order. Duplicates are kept.
	pub component_names: Vec<String>,
	/// Child records. Stored under `components` in documents.
	pub components: Vec<NodeRecord>,
}

impl NodeRecord {
	/// Record with no capabilities and no children.
	pub fn new(name: impl Into<String>, position: Vec3, rotation: Vec3, scale: Vec3, color: Option<Vec4>) -> Self {
		Self {
			name: name.into(),
			trans_offset: TransformOffset {
				translation: position,
				rotation,
				scale,
			},
			color,
			component_names: Vec::new(),
			components: Vec::new(),
		}
	}

	pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
		self.component_names.push(name.into());
		self
	}

	pub fn with_child(mut self, child: NodeRecord) -> Self {
		self.components.push(child);
		self
	}

	pub fn position(&self) -> Vec3 {
		self.trans_offset.translation
	}

	pub fn rotation(&self) -> Vec3 {
		self.trans_offset.rotation
	}

	pub fn scale(&self) -> Vec3 {
		self.trans_offset.scale
	}

	/// Number of records in this tree, this one included.
	pub fn node_count(&self) -> usize {
		let mut count = 0;
		let mut stack = vec![self];
		while let Some(record) = stack.pop() {
			count += 1;
			stack.extend(record.components.iter());
		}
		count
	}

	/// Number of levels in this tree. A record without children has depth 1.
	pub fn depth(&self) -> usize {
		let mut deepest = 0;
		let mut stack = vec![(self, 1)];
		while let Some((record, depth)) = stack.pop() {
			deepest = deepest.max(depth);
			stack.extend(record.components.iter().map(|child| (child, depth + 1)));
		}
		deepest
	}

	/// First record named `name`, in pre-order.
	pub fn find(&self, name: &str) -> Option<&NodeRecord> {
		let mut stack = vec![self];
		while let Some(record) = stack.pop() {
			if record.name == name {
				return Some(record);
			}
			stack.extend(record.components.iter().rev());
		}
		None
	}
}

fn rec_fmt(indent: usize, f: &mut fmt::Formatter<'_>, record: &NodeRecord) -> fmt::Result {
	let caps = record.component_names.len();
	#[cfg(feature = "owo")]
	let caps = {
		use owo_colors::OwoColorize;
		caps.magenta()
	};

	writeln!(f, "{}- [{} caps] {}", "  ".repeat(indent), caps, record.name)?;
	for child in &record.components {
		rec_fmt(indent + 1, f, child)?;
	}

	Ok(())
}

impl fmt::Display for NodeRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		rec_fmt(0, f, self)
	}
}
