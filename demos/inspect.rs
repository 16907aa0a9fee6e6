use std::path::PathBuf;

use clap::Parser;
use scenedoc::formats::{decode_catalog, decode_tree};
use scenedoc::persist::{DocumentStore, FsStore};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[arg(help = "Path to a tree or catalog document.")]
	path: PathBuf,

	#[arg(short, long, help = "Read the document as a template catalog")]
	catalog: bool,
}

fn main() {
	tracing_subscriber::fmt::init();
	let cli = Cli::parse();

	let text = FsStore.read_all(&cli.path).unwrap();

	if cli.catalog {
		let catalog = decode_catalog(&text).unwrap();
		println!("== Templates ({}) ==", catalog.len());
		for (i, template) in catalog.iter().enumerate() {
			println!("{i}: {}", template.name);
			print!("{template}");
		}
	} else {
		let tree = decode_tree(&text).unwrap();
		println!("== Nodes ({}, depth {}) ==", tree.node_count(), tree.depth());
		print!("{tree}");
	}
}
