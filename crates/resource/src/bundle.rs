//! Resource bundles: static tables, in-memory maps and directories.

use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::error::ResourceError;

/// A loaded resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	path: String,
	contents: Cow<'static, [u8]>,
}

impl File {
	pub fn new(path: impl Into<String>, contents: impl Into<Cow<'static, [u8]>>) -> Self {
		Self {
			path: path.into(),
			contents: contents.into(),
		}
	}

	/// Path the file was loaded under.
	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn bytes(&self) -> &[u8] {
		&self.contents
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.contents.into_owned()
	}

	/// Returns the contents as UTF-8 text.
	pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
		std::str::from_utf8(&self.contents)
	}

	/// Returns a reader over the contents.
	pub fn reader(&self) -> io::Cursor<&[u8]> {
		io::Cursor::new(self.bytes())
	}
}

/// A read-only collection of files addressed by slash-separated paths.
pub trait Bundle: Send + Sync {
	/// Name used in logs and errors.
	fn name(&self) -> &str;

	/// Opens `path`, already validated, returning `None` if the bundle does
	/// not contain it.
	fn open(&self, path: &str) -> Result<Option<File>, ResourceError>;
}

/// Bundle over a static file table, usually built with `include_bytes!`.
///
/// ```
/// use stagehand_resource::EmbeddedBundle;
///
/// static ASSETS: EmbeddedBundle = EmbeddedBundle::new("assets", &[
/// 	("greeting.txt", b"hello"),
/// ]);
/// ```
#[derive(Debug)]
pub struct EmbeddedBundle {
	name: &'static str,
	files: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedBundle {
	pub const fn new(name: &'static str, files: &'static [(&'static str, &'static [u8])]) -> Self {
		Self { name, files }
	}
}

impl Bundle for EmbeddedBundle {
	fn name(&self) -> &str {
		self.name
	}

	fn open(&self, path: &str) -> Result<Option<File>, ResourceError> {
		Ok(self
			.files
			.iter()
			.find(|(p, _)| *p == path)
			.map(|(p, contents)| File::new(*p, *contents)))
	}
}

impl Bundle for &'static EmbeddedBundle {
	fn name(&self) -> &str {
		self.name
	}

	fn open(&self, path: &str) -> Result<Option<File>, ResourceError> {
		(**self).open(path)
	}
}

/// Bundle over files held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryBundle {
	name: String,
	files: FxHashMap<String, Vec<u8>>,
}

impl MemoryBundle {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			files: FxHashMap::default(),
		}
	}

	/// Adds or replaces a file.
	pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> &mut Self {
		self.files.insert(path.into(), contents.into());
		self
	}

	pub fn with(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
		self.insert(path, contents);
		self
	}
}

impl Bundle for MemoryBundle {
	fn name(&self) -> &str {
		&self.name
	}

	fn open(&self, path: &str) -> Result<Option<File>, ResourceError> {
		Ok(self
			.files
			.get(path)
			.map(|contents| File::new(path, contents.clone())))
	}
}

/// Bundle rooted at a directory on disk.
///
/// Directories inside the root are not resources; opening one reports it as
/// absent.
#[derive(Debug, Clone)]
pub struct DirBundle {
	name: String,
	root: PathBuf,
}

impl DirBundle {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		let root = root.into();
		Self {
			name: root.display().to_string(),
			root,
		}
	}

	pub fn root(&self) -> &std::path::Path {
		&self.root
	}
}

impl Bundle for DirBundle {
	fn name(&self) -> &str {
		&self.name
	}

	fn open(&self, path: &str) -> Result<Option<File>, ResourceError> {
		let full = path.split('/').fold(self.root.clone(), |acc, part| acc.join(part));
		match std::fs::metadata(&full) {
			Ok(meta) if meta.is_dir() => return Ok(None),
			Ok(_) => {}
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(source) => return Err(self.io_error(path, source)),
		}
		match std::fs::read(&full) {
			Ok(contents) => Ok(Some(File::new(path, contents))),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(source) => Err(self.io_error(path, source)),
		}
	}
}

impl DirBundle {
	fn io_error(&self, path: &str, source: io::Error) -> ResourceError {
		ResourceError::Io {
			path: path.to_string(),
			bundle: self.name.clone(),
			source,
		}
	}
}

/// Returns true if `path` is a clean, slash-separated relative path.
///
/// `"."` names the root. Otherwise no element may be empty, `.` or `..`,
/// and backslashes are rejected so paths mean the same on every platform.
pub fn valid_path(path: &str) -> bool {
	if path == "." {
		return true;
	}
	!path.is_empty()
		&& !path.contains('\\')
		&& path
			.split('/')
			.all(|part| !part.is_empty() && part != "." && part != "..")
}
