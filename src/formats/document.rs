use glam::{Vec3, Vec4};
use json::JsonValue;

use crate::catalog::TemplateCatalog;
use crate::math::transform::TransformOffset;
use crate::record::NodeRecord;

use super::json::{JsonError, JsonObject, SerialExtend};

pub type DecodeResult<T> = Result<T, DecodeError>;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("Document is not valid JSON\n  - {0}")]
	Syntax(#[from] json::Error),
	#[error(transparent)]
	JsonError(#[from] JsonError),
}

impl DecodeError {
	pub fn nested(self, key: &str) -> Self {
		match self {
			DecodeError::JsonError(err) => DecodeError::JsonError(err.nested(key)),
			_ => self,
		}
	}
}

fn as_object<'file>(msg: &str, val: &'file JsonValue) -> DecodeResult<JsonObject<'file>> {
	if let Some(obj) = val.as_object() {
		Ok(JsonObject(obj))
	} else {
		Err(DecodeError::JsonError(JsonError::ValueIsNotObject(msg.to_owned())))
	}
}

// record deserialization

fn deserialize_record(obj: JsonObject) -> DecodeResult<NodeRecord> {
	Ok(NodeRecord {
		name: obj.get_str("name")?.to_owned(),
		trans_offset: TransformOffset {
			translation: Vec3::from_array(obj.get_floats("position")?),
			rotation: Vec3::from_array(obj.get_floats("rotation")?),
			scale: Vec3::from_array(obj.get_floats("scale")?),
		},
		color: deserialize_color(obj)?,
		component_names: obj.get_str_list("componentNames")?,
		components: deserialize_children(obj.get_list_or_empty("components")?)?,
	})
}

fn deserialize_color(obj: JsonObject) -> DecodeResult<Option<Vec4>> {
	let Some(color) = obj.get_nullable_floats::<4>("color")? else {
		return Ok(None);
	};
	if let Some(val) = color.iter().find(|c| !(0.0..=1.0).contains(*c)) {
		return Err(JsonError::ParseVecError {
			key: "color".to_owned(),
			msg: format!("expected components in [0, 1], but got {val}"),
		}
		.into());
	}
	Ok(Some(Vec4::from_array(color)))
}

fn deserialize_children(children: &[JsonValue]) -> DecodeResult<Vec<NodeRecord>> {
	let mut records = Vec::with_capacity(children.len());
	for (i, child) in children.iter().enumerate() {
		let msg = &format!("components[{}]", i);

		let child = as_object(msg, child)?;
		records.push(deserialize_record(child).map_err(|e| e.nested(msg))?);
	}
	Ok(records)
}

/// Parses a tree document.
pub fn decode_tree(text: &str) -> DecodeResult<NodeRecord> {
	let payload = json::parse(text)?;
	deserialize_record(as_object("(root)", &payload)?)
}

/// Parses a catalog document.
pub fn decode_catalog(text: &str) -> DecodeResult<TemplateCatalog> {
	let payload = json::parse(text)?;
	let obj = as_object("(catalog)", &payload)?;

	let elements = obj.get_list("elements")?;
	let mut catalog = TemplateCatalog::new();
	for (i, element) in elements.iter().enumerate() {
		let msg = &format!("elements[{}]", i);

		let element = as_object(msg, element)?;
		catalog.push(deserialize_record(element).map_err(|e| e.nested(msg))?);
	}
	Ok(catalog)
}

// record serialization

/// Shortest text that reads back as the same `f32`, so `0.7` stays `0.7` in documents.
fn float(value: f32) -> JsonValue {
	match value.to_string().parse::<f64>() {
		Ok(shortest) => JsonValue::from(shortest),
		Err(_) => JsonValue::from(value),
	}
}

fn floats(values: &[f32]) -> JsonValue {
	JsonValue::Array(values.iter().copied().map(float).collect())
}

fn serialize_record(record: &NodeRecord) -> JsonValue {
	let mut obj = json::object::Object::new();
	obj.insert("name", record.name.as_str().into());
	obj.insert("position", floats(&record.trans_offset.translation.to_array()));
	obj.insert("rotation", floats(&record.trans_offset.rotation.to_array()));
	obj.insert("scale", floats(&record.trans_offset.scale.to_array()));
	obj.insert(
		"color",
		match record.color {
			Some(color) => floats(&color.to_array()),
			None => JsonValue::Null,
		},
	);
	obj.insert(
		"componentNames",
		JsonValue::Array(record.component_names.iter().map(|n| n.as_str().into()).collect()),
	);
	obj.insert(
		"components",
		JsonValue::Array(record.components.iter().map(serialize_record).collect()),
	);
	JsonValue::Object(obj)
}

/// Pretty-printed tree document.
pub fn encode_tree(record: &NodeRecord) -> String {
	json::stringify_pretty(serialize_record(record), 2)
}

/// Pretty-printed catalog document.
pub fn encode_catalog(catalog: &TemplateCatalog) -> String {
	let mut obj = json::object::Object::new();
	obj.insert(
		"elements",
		JsonValue::Array(catalog.iter().map(serialize_record).collect()),
	);
	json::stringify_pretty(JsonValue::Object(obj), 2)
}
