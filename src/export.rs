use crate::host::SceneSource;
use crate::record::{NodeRecord, WHITE};

/// Where captured records get their color from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorCapture {
	/// Every record is opaque white, whatever the node looks like.
	#[default]
	FixedWhite,
	/// Ask the host through [`SceneSource::color`]. Nodes without a color stay unset.
	FromHost,
}

/// Snapshots `node` and its whole subtree. Colors are fixed to opaque white.
pub fn capture<S: SceneSource>(source: &S, node: S::Handle) -> NodeRecord {
	capture_with(source, node, ColorCapture::FixedWhite)
}

pub fn capture_with<S: SceneSource>(source: &S, node: S::Handle, color: ColorCapture) -> NodeRecord {
	let record = capture_rec(source, node, color);
	tracing::debug!("Captured {:?} with {} nodes", record.name, record.node_count());
	record
}

fn capture_rec<S: SceneSource>(source: &S, node: S::Handle, color: ColorCapture) -> NodeRecord {
	let offset = source.local_transform(node);
	NodeRecord {
		name: source.name(node).to_owned(),
		trans_offset: offset,
		color: match color {
			ColorCapture::FixedWhite => Some(WHITE),
			ColorCapture::FromHost => source.color(node),
		},
		component_names: source.capability_names(node),
		components: source
			.children(node)
			.into_iter()
			.map(|child| capture_rec(source, child, color))
			.collect(),
	}
}
