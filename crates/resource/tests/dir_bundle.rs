use std::fs;

use pretty_assertions::assert_eq;
use stagehand_resource::{Bundle, DirBundle, MemoryBundle, ResourceConfig, ResourceError, Resources};
use tempfile::TempDir;

fn dir_with(files: &[(&str, &str)]) -> TempDir {
	let dir = tempfile::tempdir().unwrap();
	for (path, contents) in files {
		let full = dir.path().join(path);
		if let Some(parent) = full.parent() {
			fs::create_dir_all(parent).unwrap();
		}
		fs::write(full, contents).unwrap();
	}
	dir
}

#[test]
fn dir_bundle_reads_nested_files() {
	let dir = dir_with(&[("themes/dark.toml", "bg = 0")]);
	let bundle = DirBundle::new(dir.path());

	let file = bundle.open("themes/dark.toml").unwrap().unwrap();
	assert_eq!(file.path(), "themes/dark.toml");
	assert_eq!(file.text().unwrap(), "bg = 0");
	assert!(bundle.open("themes/light.toml").unwrap().is_none());
}

#[test]
fn directories_are_not_resources() {
	let dir = dir_with(&[("themes/dark.toml", "")]);
	let bundle = DirBundle::new(dir.path());

	assert!(bundle.open("themes").unwrap().is_none());
	assert!(bundle.open(".").unwrap().is_none());
}

#[test]
fn earlier_directory_shadows_later() {
	let first = dir_with(&[("f", "one")]);
	let second = dir_with(&[("f", "two"), ("g", "two-only")]);
	let config = ResourceConfig {
		dirs: vec![first.path().to_path_buf(), second.path().to_path_buf()],
	};

	let resources = Resources::from_config(&config);
	assert_eq!(resources.load("f").unwrap().bytes(), b"one");
	assert_eq!(resources.load("g").unwrap().bytes(), b"two-only");
}

#[test]
fn memory_bundle_falls_through_to_directory() {
	let dir = dir_with(&[("f", "disk")]);
	let mut resources = Resources::new();
	resources
		.register(MemoryBundle::new("memory").with("other", "mem"))
		.register(DirBundle::new(dir.path()));

	assert_eq!(resources.load("f").unwrap().text().unwrap(), "disk");
	assert_eq!(resources.load("other").unwrap().text().unwrap(), "mem");
}

#[test]
fn missing_root_reports_absence() {
	let dir = tempfile::tempdir().unwrap();
	let mut resources = Resources::new();
	resources.register(DirBundle::new(dir.path().join("nowhere")));

	let err = resources.load("f").unwrap_err();
	assert!(matches!(err, ResourceError::NotFound { ref path } if path == "f"));
}
