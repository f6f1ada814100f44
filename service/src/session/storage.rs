//! Durable [`Storage`] of a [`Session`].

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use derive_more::{Display, Error as StdError, From};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use super::Session;

/// Persistence hooks of a [`Session`] store.
///
/// The [`Session`] is kept under a single key as a JSON blob of the
/// `{"state": {"user": ..., "token": ...}}` shape.
pub trait Storage: fmt::Debug + Send + Sync {
    /// Loads the persisted [`Session`], if any.
    ///
    /// # Errors
    ///
    /// If the persisted [`Session`] cannot be read or decoded.
    fn load(&self) -> Result<Option<Session>, Traced<Error>>;

    /// Persists the provided [`Session`], replacing the previous one.
    ///
    /// # Errors
    ///
    /// If the [`Session`] cannot be encoded or written.
    fn save(&self, session: &Session) -> Result<(), Traced<Error>>;

    /// Removes the persisted [`Session`]. Removing nothing is not an error.
    ///
    /// # Errors
    ///
    /// If the persisted [`Session`] cannot be removed.
    fn remove(&self) -> Result<(), Traced<Error>>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn load(&self) -> Result<Option<Session>, Traced<Error>> {
        (**self).load()
    }

    fn save(&self, session: &Session) -> Result<(), Traced<Error>> {
        (**self).save(session)
    }

    fn remove(&self) -> Result<(), Traced<Error>> {
        (**self).remove()
    }
}

/// Persisted envelope of a [`Session`].
#[derive(Debug, Deserialize, Serialize)]
struct Envelope<S> {
    /// Persisted [`Session`].
    state: S,
}

/// Encodes the provided [`Session`] into its persisted form.
fn encode(session: &Session) -> Result<String, Traced<Error>> {
    serde_json::to_string(&Envelope { state: session })
        .map_err(tracerr::from_and_wrap!(=> Error))
}

/// Decodes a [`Session`] out of its persisted form.
fn decode(blob: &str) -> Result<Session, Traced<Error>> {
    serde_json::from_str::<Envelope<Session>>(blob)
        .map(|e| e.state)
        .map_err(tracerr::from_and_wrap!(=> Error))
}

/// [`Storage`] keeping the [`Session`] in a JSON file named after the key.
#[derive(Clone, Debug)]
pub struct File {
    /// Path to the file.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] storage for the provided `key` inside the
    /// provided `dir`ectory.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Returns the path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for File {
    fn load(&self) -> Result<Option<Session>, Traced<Error>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => decode(&blob).map(Some).map_err(tracerr::wrap!()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(tracerr::new!(Error::Io(e))),
        }
    }

    fn save(&self, session: &Session) -> Result<(), Traced<Error>> {
        let blob = encode(session).map_err(tracerr::wrap!())?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(tracerr::from_and_wrap!(=> Error))?;
        }
        fs::write(&self.path, blob).map_err(tracerr::from_and_wrap!(=> Error))
    }

    fn remove(&self) -> Result<(), Traced<Error>> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                Err(tracerr::new!(Error::Io(e)))
            }
            Ok(()) | Err(_) => Ok(()),
        }
    }
}

/// In-memory [`Storage`] keeping the encoded blob.
#[derive(Debug, Default)]
pub struct Memory {
    /// Encoded [`Session`], if any.
    blob: Mutex<Option<String>>,
}

impl Memory {
    /// Returns the encoded blob currently stored, if any.
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.blob
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Storage for Memory {
    fn load(&self) -> Result<Option<Session>, Traced<Error>> {
        self.blob()
            .map(|b| decode(&b))
            .transpose()
            .map_err(tracerr::wrap!())
    }

    fn save(&self, session: &Session) -> Result<(), Traced<Error>> {
        let blob = encode(session).map_err(tracerr::wrap!())?;
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob);
        Ok(())
    }

    fn remove(&self) -> Result<(), Traced<Error>> {
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Encoding or decoding error.
    #[display("Failed to (de)serialize `Session`: {_0}")]
    Json(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use std::{env, fs};

    use super::{File, Memory, Session, Storage as _};
    use crate::session::Token;

    #[test]
    fn memory_keeps_envelope_shape() {
        let memory = Memory::default();
        memory
            .save(&Session {
                user: None,
                token: Some(Token::new("abc").unwrap()),
            })
            .unwrap();

        assert_eq!(
            memory.blob().unwrap(),
            r#"{"state":{"user":null,"token":"abc"}}"#,
        );
    }

    #[test]
    fn file_roundtrip() {
        let dir = env::temp_dir().join(format!(
            "session-storage-spec-{}",
            std::process::id(),
        ));
        let file = File::new(&dir, "auth-storage");
        assert!(file.load().unwrap().is_none());

        let session = Session {
            user: None,
            token: Some(Token::new("abc").unwrap()),
        };
        file.save(&session).unwrap();
        assert_eq!(file.load().unwrap(), Some(session));

        file.remove().unwrap();
        file.remove().unwrap();
        assert!(file.load().unwrap().is_none());

        _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn file_rejects_garbage() {
        let dir = env::temp_dir().join(format!(
            "session-storage-garbage-{}",
            std::process::id(),
        ));
        fs::create_dir_all(&dir).unwrap();
        let file = File::new(&dir, "auth-storage");
        fs::write(file.path(), "not json").unwrap();

        assert!(file.load().is_err());

        _ = fs::remove_dir_all(dir);
    }
}
