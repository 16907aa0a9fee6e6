use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::host::Capability;

/// Builds a fresh capability instance.
pub type CapabilityCtor = dyn Fn() -> Box<dyn Capability>;

/// Capability with a fixed document name, constructible from nothing.
pub trait NamedCapability: Capability + Default {
	const NAME: &'static str;
}

/// Stateless capability that only carries its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	name: String,
}

impl Tag {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

impl Capability for Tag {
	fn type_name(&self) -> &str {
		&self.name
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Name to constructor map, filled once at startup by every capability that can be rebuilt
/// from a document.
#[derive(Default)]
pub struct CapabilityRegistry {
	ctors: HashMap<String, Box<CapabilityCtor>>,
}

impl CapabilityRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register<T: NamedCapability>(&mut self) -> &mut Self {
		self.register_fn(T::NAME, || Box::new(T::default()) as Box<dyn Capability>)
	}

	/// Registers a [`Tag`] under `name`.
	pub fn register_tag(&mut self, name: &str) -> &mut Self {
		let owned = name.to_owned();
		self.register_fn(name, move || Box::new(Tag::new(owned.clone())) as Box<dyn Capability>)
	}

	/// Replaces any constructor previously registered under `name`.
	pub fn register_fn(&mut self, name: &str, ctor: impl Fn() -> Box<dyn Capability> + 'static) -> &mut Self {
		if self.ctors.insert(name.to_owned(), Box::new(ctor)).is_some() {
			tracing::warn!("Capability {name:?} registered twice, keeping the latest");
		}
		self
	}

	pub fn resolve(&self, name: &str) -> Option<&CapabilityCtor> {
		self.ctors.get(name).map(|ctor| &**ctor)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.ctors.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.ctors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ctors.is_empty()
	}

	/// Registered names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names = self.ctors.keys().map(String::as_str).collect::<Vec<_>>();
		names.sort_unstable();
		names
	}
}

impl fmt::Debug for CapabilityRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.names()).finish()
	}
}
