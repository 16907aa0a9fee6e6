/*!
Seams between the document core and the scene runtime that owns live nodes.

- [`SceneSource`] is read during capture.
- [`SceneSink`] receives new nodes during reconstruction.
- [`Capability`] is a behavior attached to a node, built by name through a
  [`CapabilityRegistry`](crate::capability::CapabilityRegistry).
*/

use std::any::Any;
use std::fmt::Debug;

use glam::Vec4;

use crate::math::transform::TransformOffset;

/// Kind of node the importer asks the host to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
	/// Canvas-like container hosting interactive 2D children.
	SurfaceRoot,
	/// Image-like leaf with a settable color.
	Graphic,
	/// Bare node with nothing attached.
	Empty,
}

/// A named behavior that can be attached to a live node.
pub trait Capability: Any + Debug {
	/// Name used in documents. Must match the name it is registered under.
	fn type_name(&self) -> &str;

	fn as_any(&self) -> &dyn Any;
}

/// Read access to a live hierarchy.
pub trait SceneSource {
	type Handle: Copy;

	fn name(&self, node: Self::Handle) -> &str;

	fn local_transform(&self, node: Self::Handle) -> TransformOffset;

	/// Every capability attached to `node`, by name, in host order.
	fn capability_names(&self, node: Self::Handle) -> Vec<String>;

	/// Children of `node`, in host order.
	fn children(&self, node: Self::Handle) -> Vec<Self::Handle>;

	/// Rendered color, if the host tracks one.
	fn color(&self, _node: Self::Handle) -> Option<Vec4> {
		None
	}
}

/// Write access used to build a live hierarchy.
pub trait SceneSink {
	type Handle: Copy;

	/// Creates a node of the given kind, appended as the last child of `parent`.
	fn spawn(&mut self, name: &str, primitive: Primitive, parent: Option<Self::Handle>) -> Self::Handle;

	fn set_local_transform(&mut self, node: Self::Handle, offset: &TransformOffset);

	/// Sets the color of a [`Primitive::Graphic`] node.
	fn set_color(&mut self, node: Self::Handle, color: Vec4);

	/// Attaches a drawable surface to `node` and sets its material color.
	fn attach_surface(&mut self, node: Self::Handle, color: Vec4);

	fn attach(&mut self, node: Self::Handle, capability: Box<dyn Capability>);
}
