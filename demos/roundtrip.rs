use std::path::PathBuf;

use clap::Parser;
use glam::{vec3, vec4};
use scenedoc::capability::{CapabilityRegistry, Tag};
use scenedoc::host::{Primitive, SceneSink};
use scenedoc::import::ImportPolicy;
use scenedoc::math::transform::TransformOffset;
use scenedoc::scene::Scene;
use scenedoc::session::{EditorSession, SessionConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[arg(help = "Where to write the captured tree document.")]
	output: PathBuf,

	#[arg(short, long, help = "Rebuild with empty renderable nodes instead of graphics")]
	renderable: bool,
}

fn main() {
	tracing_subscriber::fmt::init();
	let cli = Cli::parse();

	let mut scene = Scene::new();
	let root = scene.spawn("Menu", Primitive::SurfaceRoot, None);
	let title = scene.spawn("Title", Primitive::Graphic, Some(root));
	scene.set_local_transform(title, &TransformOffset::new().with_translation(vec3(0.0, 120.0, 0.0)));
	scene.set_color(title, vec4(1.0, 0.8, 0.2, 1.0));
	scene.attach(title, Box::new(Tag::new("Image")));
	let play = scene.spawn("Play", Primitive::Graphic, Some(root));
	scene.attach(play, Box::new(Tag::new("Image")));
	scene.attach(play, Box::new(Tag::new("Button")));
	scene.attach(play, Box::new(Tag::new("AudioSource")));

	println!("== Source scene ==\n{scene}");

	let mut session = EditorSession::new(SessionConfig {
		document_path: cli.output.clone(),
		..SessionConfig::default()
	});
	session.export_scene(&scene, root).unwrap();
	session.set_buffer(std::fs::read_to_string(&cli.output).unwrap());

	let mut registry = CapabilityRegistry::new();
	registry.register_tag("Image").register_tag("Button");

	let mut rebuilt = Scene::new();
	let policy = if cli.renderable {
		ImportPolicy::Renderable
	} else {
		ImportPolicy::Interactive
	};
	let record = scenedoc::formats::decode_tree(session.buffer()).unwrap();
	let (_, report) =
		scenedoc::import::reconstruct_with_report(&mut rebuilt, &registry, &record, None, policy);

	println!("== Rebuilt scene ({policy:?}) ==\n{rebuilt}");
	println!("skipped capabilities: {:?}", report.skipped);
}
