use glam::{Vec3, Vec4};

use crate::record::NodeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Template index {index} is out of range, catalog holds {len} templates")]
pub struct InvalidSelectionError {
	pub index: usize,
	pub len: usize,
}

/// Ordered list of standalone template trees.
///
/// Templates are addressed by position, so an index taken before a mutation must be checked
/// again afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCatalog {
	pub elements: Vec<NodeRecord>,
}

impl TemplateCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_elements(elements: Vec<NodeRecord>) -> Self {
		Self { elements }
	}

	/// Appends a fresh single-node template and returns its index.
	pub fn append_template(
		&mut self,
		name: impl Into<String>,
		position: Vec3,
		rotation: Vec3,
		scale: Vec3,
		color: Option<Vec4>,
	) -> usize {
		self.elements.push(NodeRecord::new(name, position, rotation, scale, color));
		self.elements.len() - 1
	}

	pub fn push(&mut self, template: NodeRecord) -> usize {
		self.elements.push(template);
		self.elements.len() - 1
	}

	pub fn get(&self, index: usize) -> Result<&NodeRecord, InvalidSelectionError> {
		self.elements.get(index).ok_or(InvalidSelectionError {
			index,
			len: self.elements.len(),
		})
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, NodeRecord> {
		self.elements.iter()
	}

	/// Template names in catalog order, for a selection menu.
	pub fn names(&self) -> Vec<&str> {
		self.elements.iter().map(|e| e.name.as_str()).collect()
	}
}

impl<'a> IntoIterator for &'a TemplateCatalog {
	type Item = &'a NodeRecord;
	type IntoIter = std::slice::Iter<'a, NodeRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.elements.iter()
	}
}
