use glam::{EulerRot, Mat4, Quat, Vec3};

/// Transform relative to the parent's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOffset {
	/// X Y Z
	pub translation: Vec3,
	/// Euler angles in degrees
	pub rotation: Vec3,
	/// X Y Z
	pub scale: Vec3,
}

impl Default for TransformOffset {
	fn default() -> Self {
		Self {
			translation: Vec3::ZERO,
			rotation: Vec3::ZERO,
			scale: Vec3::ONE,
		}
	}
}

impl TransformOffset {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_translation(mut self, translation: Vec3) -> Self {
		self.translation = translation;
		self
	}

	pub fn with_rotation(mut self, rotation: Vec3) -> Self {
		self.rotation = rotation;
		self
	}

	pub fn with_scale(mut self, scale: Vec3) -> Self {
		self.scale = scale;
		self
	}

	/// Rotation as a quaternion. Angles apply around Z first, then X, then Y.
	pub fn rotation_quat(&self) -> Quat {
		Quat::from_euler(
			EulerRot::YXZ,
			self.rotation.y.to_radians(),
			self.rotation.x.to_radians(),
			self.rotation.z.to_radians(),
		)
	}

	pub fn to_matrix(&self) -> Mat4 {
		Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
	}
}

#[cfg(test)]
mod tests {
	use glam::{vec3, Vec3};

	use super::TransformOffset;

	#[test]
	fn identity_by_default() {
		let offset = TransformOffset::default();
		assert_eq!(offset.to_matrix(), glam::Mat4::IDENTITY);
	}

	#[test]
	fn rotation_is_in_degrees() {
		let offset = TransformOffset::new().with_rotation(vec3(0.0, 0.0, 90.0));
		let rotated = offset.to_matrix().transform_point3(Vec3::X);
		assert!(rotated.abs_diff_eq(Vec3::Y, 1e-5), "{rotated:?}");
	}

	#[test]
	fn scale_then_rotate_then_translate() {
		let offset = TransformOffset::new()
			.with_translation(vec3(1.0, 0.0, 0.0))
			.with_rotation(vec3(0.0, 90.0, 0.0))
			.with_scale(vec3(2.0, 2.0, 2.0));
		let point = offset.to_matrix().transform_point3(Vec3::X);
		assert!(point.abs_diff_eq(vec3(1.0, 0.0, -2.0), 1e-5), "{point:?}");
	}
}
