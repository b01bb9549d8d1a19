pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Admin required: {message}")]
	AdminRequired { message: String },
	#[error("Catalog is still loading.")]
	NotReady,
	#[error("Catalog failed to load: {message}")]
	LoadFailed { message: String },
	#[error("Store error: {message}")]
	Store { message: String },
	#[error("Session error: {message}")]
	Session { message: String },
}
impl From<vintager_store::Error> for Error {
	fn from(err: vintager_store::Error) -> Self {
		Self::Store { message: err.to_string() }
	}
}
