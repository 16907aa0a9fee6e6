/*!
Editor session: the state an interactive template editor keeps between actions.

The session owns the text buffer shown to the user, the template catalog parsed from it, the
selected template and the "new template" form. Every action is a method taking `&mut self`;
failed reads, writes and parses leave the buffer and catalog as they were.
*/

use std::path::PathBuf;

use glam::{Vec3, Vec4};

use crate::capability::CapabilityRegistry;
use crate::catalog::{InvalidSelectionError, TemplateCatalog};
use crate::export::{capture_with, ColorCapture};
use crate::formats::{decode_catalog, decode_tree, encode_catalog, encode_tree, DecodeError};
use crate::host::{SceneSink, SceneSource};
use crate::import::{instantiate, reconstruct, ImportPolicy, Instantiated};
use crate::math::transform::TransformOffset;
use crate::persist::{DocumentStore, FsStore, PersistenceError};
use crate::record::{NodeRecord, WHITE};
use crate::EMPTY_CATALOG_DOCUMENT;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
	#[error(transparent)]
	Decode(#[from] DecodeError),
	#[error(transparent)]
	Persistence(#[from] PersistenceError),
	#[error(transparent)]
	InvalidSelection(#[from] InvalidSelectionError),
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
	/// Document read by [`EditorSession::load`] and written by save and export.
	pub document_path: PathBuf,
	/// Name of the container created around an instantiated template.
	pub surface_root_name: String,
	pub color_capture: ColorCapture,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			document_path: PathBuf::from("UIHierarchy.json"),
			surface_root_name: "Canvas".to_owned(),
			color_capture: ColorCapture::FixedWhite,
		}
	}
}

/// Values of the "create new template" form.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
	pub name: String,
	pub trans_offset: TransformOffset,
	pub color: Vec4,
}

impl Default for TemplateDraft {
	fn default() -> Self {
		Self {
			name: "New Template".to_owned(),
			trans_offset: TransformOffset::default(),
			color: WHITE,
		}
	}
}

pub struct EditorSession<D: DocumentStore = FsStore> {
	config: SessionConfig,
	store: D,
	buffer: String,
	catalog: Option<TemplateCatalog>,
	selected_template: usize,
	pub draft: TemplateDraft,
}

impl EditorSession<FsStore> {
	pub fn new(config: SessionConfig) -> Self {
		Self::with_store(config, FsStore)
	}
}

impl<D: DocumentStore> EditorSession<D> {
	pub fn with_store(config: SessionConfig, store: D) -> Self {
		Self {
			config,
			store,
			buffer: EMPTY_CATALOG_DOCUMENT.to_owned(),
			catalog: None,
			selected_template: 0,
			draft: TemplateDraft::default(),
		}
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	pub fn store(&self) -> &D {
		&self.store
	}

	/// Text currently held by the session, as the user would edit it.
	pub fn buffer(&self) -> &str {
		&self.buffer
	}

	pub fn set_buffer(&mut self, text: impl Into<String>) {
		self.buffer = text.into();
	}

	/// `None` until a document is loaded or a template is created.
	pub fn catalog(&self) -> Option<&TemplateCatalog> {
		self.catalog.as_ref()
	}

	pub fn template_names(&self) -> Vec<&str> {
		self.catalog.as_ref().map(TemplateCatalog::names).unwrap_or_default()
	}

	fn catalog_len(&self) -> usize {
		self.catalog.as_ref().map_or(0, TemplateCatalog::len)
	}

	pub fn selected_template(&self) -> usize {
		self.selected_template
	}

	pub fn select_template(&mut self, index: usize) -> Result<(), InvalidSelectionError> {
		let len = self.catalog_len();
		if index >= len {
			return Err(InvalidSelectionError { index, len });
		}
		self.selected_template = index;
		Ok(())
	}

	/// Reads the document and parses it as a catalog.
	///
	/// Buffer and catalog are only replaced when both steps succeed.
	pub fn load(&mut self) -> SessionResult<()> {
		let path = &self.config.document_path;
		let text = self.store.read_all(path).map_err(|e| {
			tracing::error!("{}", e);
			e
		})?;
		let catalog = decode_catalog(&text).map_err(|e| {
			tracing::warn!("Document at {:?} is not a template catalog: {}", path, e);
			e
		})?;

		tracing::info!("Loaded {} templates from {:?}", catalog.len(), path);
		if self.selected_template >= catalog.len() {
			self.selected_template = 0;
		}
		self.buffer = text;
		self.catalog = Some(catalog);
		Ok(())
	}

	/// Writes the buffer, as is, over the document.
	pub fn save(&mut self) -> SessionResult<()> {
		let path = &self.config.document_path;
		self.store.write_all(path, &self.buffer).map_err(|e| {
			tracing::error!("{}", e);
			e
		})?;

		tracing::info!("Saved document to {:?}", path);
		Ok(())
	}

	/// Appends a single-node template and rewrites the buffer from the catalog.
	pub fn append_template(
		&mut self,
		name: impl Into<String>,
		position: Vec3,
		rotation: Vec3,
		scale: Vec3,
		color: Vec4,
	) -> usize {
		let catalog = self.catalog.get_or_insert_with(TemplateCatalog::new);
		let index = catalog.append_template(name, position, rotation, scale, Some(color));
		self.buffer = encode_catalog(catalog);
		index
	}

	/// [`append_template`](Self::append_template) with the values of [`Self::draft`].
	pub fn create_template(&mut self) -> usize {
		let TemplateDraft {
			name,
			trans_offset,
			color,
		} = self.draft.clone();
		self.append_template(
			name,
			trans_offset.translation,
			trans_offset.rotation,
			trans_offset.scale,
			color,
		)
	}

	pub fn instantiate_template<S: SceneSink>(
		&self,
		sink: &mut S,
		registry: &CapabilityRegistry,
		index: usize,
	) -> SessionResult<Instantiated<S::Handle>> {
		let Some(catalog) = self.catalog.as_ref() else {
			return Err(InvalidSelectionError { index, len: 0 }.into());
		};
		Ok(instantiate(sink, registry, catalog, index, &self.config.surface_root_name)?)
	}

	pub fn instantiate_selected<S: SceneSink>(
		&self,
		sink: &mut S,
		registry: &CapabilityRegistry,
	) -> SessionResult<Instantiated<S::Handle>> {
		self.instantiate_template(sink, registry, self.selected_template)
	}

	/// Parses the buffer as a tree document and rebuilds it as a new interactive hierarchy.
	pub fn instantiate_buffer<S: SceneSink>(
		&self,
		sink: &mut S,
		registry: &CapabilityRegistry,
	) -> SessionResult<S::Handle> {
		let record = decode_tree(&self.buffer)?;
		Ok(reconstruct(sink, registry, &record, None, ImportPolicy::Interactive))
	}

	/// Captures `node` and writes it as a tree document. The buffer is left alone.
	pub fn export_scene<S: SceneSource>(&mut self, source: &S, node: S::Handle) -> SessionResult<NodeRecord> {
		let record = capture_with(source, node, self.config.color_capture);
		let path = &self.config.document_path;
		self.store.write_all(path, &encode_tree(&record)).map_err(|e| {
			tracing::error!("{}", e);
			e
		})?;

		tracing::info!("Exported {:?} to {:?}", record.name, path);
		Ok(record)
	}
}
