//! Local admin flag.
//!
//! There is no authentication. The flag is a single key in a small key-value store, restored when
//! the service starts and written through on every change.

use std::{
	collections::{BTreeMap, HashMap},
	fs,
	io::ErrorKind,
	path::PathBuf,
	sync::{
		Arc, Mutex,
		atomic::{AtomicBool, Ordering},
	},
};

use crate::{Error, Result};

const ADMIN_VALUE: &str = "true";

pub trait KeyValueStore
where
	Self: Send + Sync,
{
	fn get(&self, key: &str) -> Result<Option<String>>;

	fn set(&self, key: &str, value: &str) -> Result<()>;

	fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<HashMap<String, String>>,
}

/// A JSON object of string values on disk. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	lock: Mutex<()>,
}
impl FileStore {
	pub fn new(path: PathBuf) -> Self {
		Self { path, lock: Mutex::new(()) }
	}

	fn read(&self) -> Result<BTreeMap<String, String>> {
		let raw = match fs::read_to_string(&self.path) {
			Ok(raw) => raw,
			Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
			Err(err) => return Err(session_error(&self.path, err)),
		};

		if raw.trim().is_empty() {
			return Ok(BTreeMap::new());
		}

		serde_json::from_str(&raw).map_err(|err| session_error(&self.path, err))
	}

	fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
		let raw = serde_json::to_string_pretty(entries).map_err(|err| session_error(&self.path, err))?;
		let tmp = self.path.with_extension("tmp");

		if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|err| session_error(parent, err))?;
		}

		fs::write(&tmp, raw).map_err(|err| session_error(&tmp, err))?;
		fs::rename(&tmp, &self.path).map_err(|err| session_error(&self.path, err))
	}

	fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
		let _guard = self.lock.lock().unwrap_or_else(|err| err.into_inner());
		let mut entries = self.read()?;
		apply(&mut entries);

		self.write(&entries)
	}
}

pub struct AdminSession {
	store: Arc<dyn KeyValueStore>,
	key: String,
	admin: AtomicBool,
}
impl AdminSession {
	/// Reads the persisted flag. Only the exact value `"true"` counts as admin.
	pub fn restore(store: Arc<dyn KeyValueStore>, key: &str) -> Result<Self> {
		let admin = store.get(key)?.is_some_and(|value| value == ADMIN_VALUE);
		tracing::debug!(key, admin, "Admin session restored.");

		Ok(Self { store, key: key.to_string(), admin: AtomicBool::new(admin) })
	}

	/// In-memory session that starts as a visitor.
	pub fn ephemeral(key: &str) -> Self {
		Self {
			store: Arc::new(MemoryStore::default()),
			key: key.to_string(),
			admin: AtomicBool::new(false),
		}
	}

	pub fn is_admin(&self) -> bool {
		self.admin.load(Ordering::SeqCst)
	}

	pub fn login(&self) -> Result<()> {
		self.store.set(&self.key, ADMIN_VALUE)?;
		self.admin.store(true, Ordering::SeqCst);
		tracing::info!("Admin mode enabled.");

		Ok(())
	}

	pub fn logout(&self) -> Result<()> {
		self.store.remove(&self.key)?;
		self.admin.store(false, Ordering::SeqCst);
		tracing::info!("Admin mode disabled.");

		Ok(())
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		Ok(self.entries.lock().unwrap_or_else(|err| err.into_inner()).get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		self.entries
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.insert(key.to_string(), value.to_string());

		Ok(())
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner()).remove(key);

		Ok(())
	}
}

impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		let _guard = self.lock.lock().unwrap_or_else(|err| err.into_inner());

		Ok(self.read()?.remove(key))
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		self.update(|entries| {
			entries.insert(key.to_string(), value.to_string());
		})
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.update(|entries| {
			entries.remove(key);
		})
	}
}

fn session_error(path: &std::path::Path, err: impl std::fmt::Display) -> Error {
	Error::Session { message: format!("{}: {err}", path.display()) }
}
