//! JSON API wrapper, with methods and structs similar to Java's `org.json`.

use json::JsonValue;

pub(crate) trait SerialExtend {
	fn as_object(&self) -> Option<&json::object::Object>;
}

impl SerialExtend for json::JsonValue {
	fn as_object(&self) -> Option<&json::object::Object> {
		if let json::JsonValue::Object(obj) = self {
			Some(obj)
		} else {
			None
		}
	}
}

pub type JsonResult<T> = Result<T, JsonError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JsonError {
	#[error("Key {0:?} does not exist")]
	KeyDoesNotExist(String),
	#[error("Value at {0:?} is not an object")]
	ValueIsNotObject(String),
	#[error("Value at {0:?} is not a list")]
	ValueIsNotList(String),
	#[error("Value at {0:?} is not a string")]
	ValueIsNotString(String),
	#[error("Error while parsing vector at {key:?}\n  - {msg}")]
	ParseVecError { key: String, msg: String },
	#[error("Error in object at {key:?}\n  - {inner}")]
	ErrorInObject { key: String, inner: Box<JsonError> },
}

impl JsonError {
	pub fn nested(self, key: &str) -> Self {
		Self::ErrorInObject {
			key: key.to_owned(),
			inner: Box::new(self),
		}
	}

	/// Dotted path from the document root to the offending value.
	pub fn path(&self) -> String {
		match self {
			Self::ErrorInObject { key, inner } => {
				let rest = inner.path();
				if rest.is_empty() {
					key.clone()
				} else if rest.starts_with('[') {
					format!("{key}{rest}")
				} else {
					format!("{key}.{rest}")
				}
			}
			Self::KeyDoesNotExist(key)
			| Self::ValueIsNotObject(key)
			| Self::ValueIsNotList(key)
			| Self::ValueIsNotString(key)
			| Self::ParseVecError { key, .. } => key.clone(),
		}
	}
}

#[derive(Clone, Copy)]
pub struct JsonObject<'a>(pub &'a json::object::Object);

impl<'a> JsonObject<'a> {
	fn get(&self, key: &str) -> JsonResult<&'a json::JsonValue> {
		match self.0.get(key) {
			Some(value) => Ok(value),
			None => Err(JsonError::KeyDoesNotExist(key.to_owned())),
		}
	}

	/// `None` when the key is absent.
	fn get_opt(&self, key: &str) -> Option<&'a json::JsonValue> {
		self.0.get(key)
	}

	pub fn get_list(&self, key: &str) -> JsonResult<&'a [JsonValue]> {
		match self.get(key)? {
			json::JsonValue::Array(arr) => Ok(arr),
			_ => Err(JsonError::ValueIsNotList(key.to_owned())),
		}
	}

	/// Empty when the key is absent, an error when it holds something other than a list.
	pub fn get_list_or_empty(&self, key: &str) -> JsonResult<&'a [JsonValue]> {
		match self.get_opt(key) {
			None => Ok(&[]),
			Some(json::JsonValue::Array(arr)) => Ok(arr),
			Some(_) => Err(JsonError::ValueIsNotList(key.to_owned())),
		}
	}

	pub fn get_str(&self, key: &str) -> JsonResult<&'a str> {
		match self.get(key)?.as_str() {
			Some(val) => Ok(val),
			None => Err(JsonError::ValueIsNotString(key.to_owned())),
		}
	}

	pub fn get_str_list(&self, key: &str) -> JsonResult<Vec<String>> {
		let list = self.get_list_or_empty(key)?;
		let mut strings = Vec::with_capacity(list.len());
		for (i, val) in list.iter().enumerate() {
			match val.as_str() {
				Some(s) => strings.push(s.to_owned()),
				None => return Err(JsonError::ValueIsNotString(format!("[{i}]")).nested(key)),
			}
		}
		Ok(strings)
	}

	pub fn get_floats<const N: usize>(&self, key: &str) -> JsonResult<[f32; N]> {
		floats_from_list(key, self.get_list(key)?)
	}

	/// `None` for an absent key or an explicit `null`.
	pub fn get_nullable_floats<const N: usize>(&self, key: &str) -> JsonResult<Option<[f32; N]>> {
		match self.get_opt(key) {
			None => Ok(None),
			Some(val) if val.is_null() => Ok(None),
			Some(json::JsonValue::Array(arr)) => floats_from_list(key, arr).map(Some),
			Some(_) => Err(JsonError::ValueIsNotList(key.to_owned())),
		}
	}
}

fn floats_from_list<const N: usize>(key: &str, list: &[JsonValue]) -> JsonResult<[f32; N]> {
	if list.len() != N {
		return Err(JsonError::ParseVecError {
			key: key.to_owned(),
			msg: format!("expected list of length {N}, but has length {}", list.len()),
		});
	}

	let mut out = [0.0; N];
	for (slot, val) in out.iter_mut().zip(list) {
		// through f64, so the nearest f32 is picked
		*slot = match val.as_f64() {
			Some(val) => val as f32,
			None => {
				return Err(JsonError::ParseVecError {
					key: key.to_owned(),
					msg: "expected float, but did not get a number".to_owned(),
				})
			}
		};
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::{JsonError, JsonObject, SerialExtend};

	fn with_obj<T>(text: &str, f: impl FnOnce(JsonObject) -> T) -> T {
		let value = json::parse(text).unwrap();
		f(JsonObject(value.as_object().unwrap()))
	}

	#[test]
	fn floats_of_exact_length() {
		with_obj(r#"{"v": [1, 2.5, -3]}"#, |obj| {
			assert_eq!(obj.get_floats::<3>("v").unwrap(), [1.0, 2.5, -3.0]);
			assert!(matches!(obj.get_floats::<4>("v"), Err(JsonError::ParseVecError { .. })));
		});
		with_obj(r#"{"v": [1, "x", 3]}"#, |obj| {
			assert!(matches!(obj.get_floats::<3>("v"), Err(JsonError::ParseVecError { .. })));
		});
	}

	#[test]
	fn floats_keep_their_f32_value() {
		with_obj(r#"{"v": [0.699999988079071, 0.7, -33.3]}"#, |obj| {
			assert_eq!(obj.get_floats::<3>("v").unwrap(), [0.7, 0.7, -33.3]);
		});
	}

	#[test]
	fn nullable_floats() {
		with_obj(r#"{"a": null, "b": [0, 0, 0, 1], "c": 4}"#, |obj| {
			assert_eq!(obj.get_nullable_floats::<4>("a").unwrap(), None);
			assert_eq!(obj.get_nullable_floats::<4>("b").unwrap(), Some([0.0, 0.0, 0.0, 1.0]));
			assert_eq!(obj.get_nullable_floats::<4>("missing").unwrap(), None);
			assert_eq!(
				obj.get_nullable_floats::<4>("c"),
				Err(JsonError::ValueIsNotList("c".to_owned()))
			);
		});
	}

	#[test]
	fn string_lists() {
		with_obj(r#"{"names": ["A", "B", "A"], "bad": ["A", 1]}"#, |obj| {
			assert_eq!(obj.get_str_list("names").unwrap(), vec!["A", "B", "A"]);
			assert!(obj.get_str_list("missing").unwrap().is_empty());
			assert_eq!(obj.get_str_list("bad").unwrap_err().path(), "bad[1]");
		});
	}

	#[test]
	fn nested_paths() {
		let err = JsonError::KeyDoesNotExist("position".to_owned())
			.nested("components[1]")
			.nested("elements[0]");
		assert_eq!(err.path(), "elements[0].components[1].position");
	}
}
