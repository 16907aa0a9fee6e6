/*!
Rebuilding live hierarchies from records.

Both policies walk the record tree depth-first and stay on the same policy all the way down:

- [`ImportPolicy::Interactive`]: the top node becomes a surface root when it has no parent,
  every other node becomes a colored graphic.
- [`ImportPolicy::Renderable`]: every node starts empty and gets a drawable surface when its
  record carries a color.

Capability names the registry does not know are skipped.
*/

use crate::capability::CapabilityRegistry;
use crate::catalog::{InvalidSelectionError, TemplateCatalog};
use crate::host::{Primitive, SceneSink};
use crate::record::NodeRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportPolicy {
	#[default]
	Interactive,
	Renderable,
}

/// What a reconstruction did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
	pub nodes_created: usize,
	pub capabilities_attached: usize,
	/// Names without a registered constructor, in encounter order.
	pub skipped: Vec<String>,
}

struct Importer<'a, S: SceneSink> {
	sink: &'a mut S,
	registry: &'a CapabilityRegistry,
	report: ImportReport,
}

impl<'a, S: SceneSink> Importer<'a, S> {
	fn new(sink: &'a mut S, registry: &'a CapabilityRegistry) -> Self {
		Self {
			sink,
			registry,
			report: ImportReport::default(),
		}
	}

	fn spawn(&mut self, record: &NodeRecord, primitive: Primitive, parent: Option<S::Handle>) -> S::Handle {
		self.report.nodes_created += 1;
		self.sink.spawn(&record.name, primitive, parent)
	}

	fn attach_capabilities(&mut self, node: S::Handle, record: &NodeRecord) {
		for name in &record.component_names {
			match self.registry.resolve(name) {
				Some(ctor) => {
					self.sink.attach(node, ctor());
					self.report.capabilities_attached += 1;
				}
				None => {
					tracing::debug!("Skipping unknown capability {name:?} on {:?}", record.name);
					self.report.skipped.push(name.clone());
				}
			}
		}
	}

	fn build_interactive(&mut self, record: &NodeRecord, parent: Option<S::Handle>) -> S::Handle {
		let node = match parent {
			None => self.spawn(record, Primitive::SurfaceRoot, None),
			Some(parent) => {
				let node = self.spawn(record, Primitive::Graphic, Some(parent));
				if let Some(color) = record.color {
					self.sink.set_color(node, color);
				}
				node
			}
		};

		self.attach_capabilities(node, record);
		self.sink.set_local_transform(node, &record.trans_offset);

		for child in &record.components {
			self.build_interactive(child, Some(node));
		}
		node
	}

	fn build_renderable(&mut self, record: &NodeRecord, parent: Option<S::Handle>) -> S::Handle {
		let node = self.spawn(record, Primitive::Empty, parent);
		if let Some(color) = record.color {
			self.sink.attach_surface(node, color);
		}

		self.attach_capabilities(node, record);
		self.sink.set_local_transform(node, &record.trans_offset);

		for child in &record.components {
			self.build_renderable(child, Some(node));
		}
		node
	}

	fn build(&mut self, record: &NodeRecord, parent: Option<S::Handle>, policy: ImportPolicy) -> S::Handle {
		let node = match policy {
			ImportPolicy::Interactive => self.build_interactive(record, parent),
			ImportPolicy::Renderable => self.build_renderable(record, parent),
		};
		tracing::debug!(
			"Reconstructed {:?} ({:?}): {} nodes, {} capabilities, {} skipped",
			record.name,
			policy,
			self.report.nodes_created,
			self.report.capabilities_attached,
			self.report.skipped.len(),
		);
		node
	}
}

/// Builds `record` into `sink` under `parent` and returns the handle of its top node.
pub fn reconstruct<S: SceneSink>(
	sink: &mut S,
	registry: &CapabilityRegistry,
	record: &NodeRecord,
	parent: Option<S::Handle>,
	policy: ImportPolicy,
) -> S::Handle {
	reconstruct_with_report(sink, registry, record, parent, policy).0
}

pub fn reconstruct_with_report<S: SceneSink>(
	sink: &mut S,
	registry: &CapabilityRegistry,
	record: &NodeRecord,
	parent: Option<S::Handle>,
	policy: ImportPolicy,
) -> (S::Handle, ImportReport) {
	let mut importer = Importer::new(sink, registry);
	let node = importer.build(record, parent, policy);
	(node, importer.report)
}

/// Handles created by [`instantiate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instantiated<H> {
	pub surface_root: H,
	pub template_root: H,
}

/// Builds template `index` under a new surface root named `surface_root_name`.
///
/// The template itself is built with [`ImportPolicy::Renderable`]. Nothing is created when the
/// index is out of range.
pub fn instantiate<S: SceneSink>(
	sink: &mut S,
	registry: &CapabilityRegistry,
	catalog: &TemplateCatalog,
	index: usize,
	surface_root_name: &str,
) -> Result<Instantiated<S::Handle>, InvalidSelectionError> {
	let template = catalog.get(index)?;

	let surface_root = sink.spawn(surface_root_name, Primitive::SurfaceRoot, None);
	let template_root = reconstruct(sink, registry, template, Some(surface_root), ImportPolicy::Renderable);

	tracing::info!("Instantiated template {index} ({:?})", template.name);
	Ok(Instantiated {
		surface_root,
		template_root,
	})
}

#[cfg(test)]
mod tests {
	use glam::{vec3, vec4, Vec3, Vec4};

	use super::*;
	use crate::host::{Capability, SceneSource};
	use crate::math::transform::TransformOffset;
	use crate::scene::Scene;

	fn registry() -> CapabilityRegistry {
		let mut registry = CapabilityRegistry::new();
		registry.register_tag("Image").register_tag("Button");
		registry
	}

	fn menu() -> NodeRecord {
		NodeRecord::new("Menu", Vec3::ZERO, Vec3::ZERO, Vec3::ONE, Some(Vec4::ONE))
			.with_component_name("Button")
			.with_child(
				NodeRecord::new(
					"Title",
					vec3(0.0, 80.0, 0.0),
					vec3(0.0, 0.0, 10.0),
					Vec3::ONE,
					Some(vec4(1.0, 0.0, 0.0, 1.0)),
				)
				.with_component_name("Image")
				.with_child(NodeRecord::new("Glyph", Vec3::X, Vec3::ZERO, Vec3::splat(0.5), None)),
			)
			.with_child(NodeRecord::new("Footer", Vec3::ZERO, Vec3::ZERO, Vec3::ONE, None).with_component_name("Image"))
	}

	/// Sink that only logs what it is asked to do.
	#[derive(Default)]
	struct Recorder {
		events: Vec<String>,
		next: usize,
	}

	impl SceneSink for Recorder {
		type Handle = usize;

		fn spawn(&mut self, name: &str, primitive: Primitive, parent: Option<usize>) -> usize {
			self.events.push(format!("spawn {name} {primitive:?} {parent:?}"));
			self.next += 1;
			self.next - 1
		}

		fn set_local_transform(&mut self, node: usize, _offset: &TransformOffset) {
			self.events.push(format!("transform {node}"));
		}

		fn set_color(&mut self, node: usize, _color: Vec4) {
			self.events.push(format!("color {node}"));
		}

		fn attach_surface(&mut self, node: usize, _color: Vec4) {
			self.events.push(format!("surface {node}"));
		}

		fn attach(&mut self, node: usize, capability: Box<dyn Capability>) {
			self.events.push(format!("attach {node} {}", capability.type_name()));
		}
	}

	#[test]
	fn interactive_builds_surface_root_and_graphics() {
		let mut scene = Scene::new();
		let root = reconstruct(&mut scene, &registry(), &menu(), None, ImportPolicy::Interactive);

		assert_eq!(scene.get(root).unwrap().primitive, Primitive::SurfaceRoot);
		// the root is not a graphic, so its color goes nowhere
		assert_eq!(scene.get(root).unwrap().color, None);
		assert_eq!(scene.capability_names(root), vec!["Button"]);

		let title = scene.find("Title").unwrap();
		let node = scene.get(title).unwrap();
		assert_eq!(node.primitive, Primitive::Graphic);
		assert_eq!(node.color, Some(vec4(1.0, 0.0, 0.0, 1.0)));
		assert_eq!(node.trans_offset.translation, vec3(0.0, 80.0, 0.0));
		assert_eq!(node.trans_offset.rotation, vec3(0.0, 0.0, 10.0));
		assert_eq!(scene.parent(title), Some(root));

		let glyph = scene.get(scene.find("Glyph").unwrap()).unwrap();
		assert_eq!(glyph.primitive, Primitive::Graphic);
		assert_eq!(glyph.color, None);
		assert_eq!(glyph.trans_offset.scale, Vec3::splat(0.5));

		assert_eq!(scene.children(root).len(), 2);
		assert_eq!(scene.node_count(), 4);
	}

	#[test]
	fn renderable_stays_renderable_at_every_depth() {
		let mut scene = Scene::new();
		let root = reconstruct(&mut scene, &registry(), &menu(), None, ImportPolicy::Renderable);

		for id in scene.descendants(root) {
			assert_eq!(scene.get(id).unwrap().primitive, Primitive::Empty);
		}

		assert!(scene.get(root).unwrap().has_surface);
		assert_eq!(scene.color(root), Some(Vec4::ONE));
		let glyph = scene.get(scene.find("Glyph").unwrap()).unwrap();
		assert!(!glyph.has_surface);
		assert_eq!(glyph.color, None);
	}

	#[test]
	fn unknown_capabilities_are_skipped() {
		let record = NodeRecord::new("Root", Vec3::ZERO, Vec3::ZERO, Vec3::ONE, None)
			.with_component_name("Image")
			.with_component_name("RectTransform")
			.with_component_name("Image")
			.with_component_name("MissingScript");

		let mut scene = Scene::new();
		let (root, report) = reconstruct_with_report(&mut scene, &registry(), &record, None, ImportPolicy::Interactive);

		assert_eq!(scene.capability_names(root), vec!["Image", "Image"]);
		assert_eq!(report.capabilities_attached, 2);
		assert_eq!(report.skipped, vec!["RectTransform", "MissingScript"]);
		assert_eq!(report.nodes_created, 1);
	}

	#[test]
	fn attachments_come_before_transform() {
		let leaf =
			NodeRecord::new("Leaf", Vec3::ZERO, Vec3::ZERO, Vec3::ONE, Some(Vec4::ONE)).with_component_name("Image");
		let record = NodeRecord::new("Root", Vec3::ZERO, Vec3::ZERO, Vec3::ONE, Some(Vec4::ONE)).with_child(leaf);

		let mut recorder = Recorder::default();
		reconstruct(&mut recorder, &registry(), &record, None, ImportPolicy::Interactive);
		assert_eq!(
			recorder.events,
			vec![
				"spawn Root SurfaceRoot None",
				"transform 0",
				"spawn Leaf Graphic Some(0)",
				"color 1",
				"attach 1 Image",
				"transform 1",
			]
		);

		let mut recorder = Recorder::default();
		reconstruct(&mut recorder, &registry(), &record, None, ImportPolicy::Renderable);
		assert_eq!(
			recorder.events,
			vec![
				"spawn Root Empty None",
				"surface 0",
				"transform 0",
				"spawn Leaf Empty Some(0)",
				"surface 1",
				"attach 1 Image",
				"transform 1",
			]
		);
	}

	#[test]
	fn interactive_under_existing_parent_has_no_surface_root() {
		let mut scene = Scene::new();
		let host_root = scene.spawn("Host", Primitive::Empty, None);
		let top = reconstruct(&mut scene, &registry(), &menu(), Some(host_root), ImportPolicy::Interactive);

		assert_eq!(scene.get(top).unwrap().primitive, Primitive::Graphic);
		assert_eq!(scene.parent(top), Some(host_root));
		assert_eq!(scene.roots(), &[host_root]);
	}

	#[test]
	fn instantiate_wraps_template_in_surface_root() {
		let mut catalog = TemplateCatalog::new();
		catalog.append_template("Panel", vec3(0.0, 1.0, 0.0), Vec3::ZERO, Vec3::ONE, Some(Vec4::ONE));
		catalog.push(menu());

		let mut scene = Scene::new();
		let made = instantiate(&mut scene, &registry(), &catalog, 1, "Canvas").unwrap();

		let surface = scene.get(made.surface_root).unwrap();
		assert_eq!(surface.name, "Canvas");
		assert_eq!(surface.primitive, Primitive::SurfaceRoot);
		assert_eq!(scene.parent(made.template_root), Some(made.surface_root));
		assert_eq!(scene.get(made.template_root).unwrap().name, "Menu");
		assert_eq!(scene.get(made.template_root).unwrap().primitive, Primitive::Empty);
		assert_eq!(scene.node_count(), 5);
	}

	#[test]
	fn instantiate_out_of_range_creates_nothing() {
		let mut catalog = TemplateCatalog::new();
		catalog.append_template("Panel", Vec3::ZERO, Vec3::ZERO, Vec3::ONE, None);

		let mut scene = Scene::new();
		let err = instantiate(&mut scene, &registry(), &catalog, 1, "Canvas").unwrap_err();

		assert_eq!(err, InvalidSelectionError { index: 1, len: 1 });
		assert_eq!(scene.node_count(), 0);
		assert!(instantiate(&mut scene, &registry(), &TemplateCatalog::new(), 0, "Canvas").is_err());
	}
}
