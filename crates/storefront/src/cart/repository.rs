//! Persisted cart storage.
//!
//! The cart survives across runs as one JSON blob. The [`CartRepository`]
//! trait keeps the state machine testable without a real storage backend;
//! [`FileRepository`] is the production implementation.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::warn;

use super::Cart;

/// Errors that can occur while persisting the cart.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Writing the blob failed.
    #[error("failed to write cart: {0}")]
    Io(#[from] io::Error),

    /// Encoding the cart failed.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Storage for the persisted cart blob.
///
/// `load` is tolerant by contract: missing or corrupt state reads as an empty
/// cart, never as an error. `save` reports failures so a dropped write stays
/// visible to the caller.
pub trait CartRepository {
    /// Read the persisted cart; empty if nothing usable is stored.
    fn load(&self) -> Cart;

    /// Persist the cart, replacing the previous blob.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be encoded or written.
    fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;
}

/// Cart blob stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Create a repository backed by the file at `path`.
    ///
    /// The file is created on first save; it does not need to exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartRepository for FileRepository {
    fn load(&self) -> Cart {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Cart::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cart blob unreadable, treating as empty");
                return Cart::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cart blob corrupt, treating as empty");
                Cart::default()
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let json = serde_json::to_vec(cart)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    cart: Mutex<Cart>,
}

impl CartRepository for MemoryRepository {
    fn load(&self) -> Cart {
        self.cart.lock().map(|cart| cart.clone()).unwrap_or_default()
    }

    fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        if let Ok(mut slot) = self.cart.lock() {
            *slot = cart.clone();
        }
        Ok(())
    }
}
