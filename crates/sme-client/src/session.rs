//! Client-side session state: uploaded files, the last analysis, and the
//! backend session id, plus restoring that state at startup.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sme_core::{AnalysisResult, FileAnalysisResponse};

use crate::backend::BackendClient;
use crate::error::StoreError;
use crate::store::KeyValueStore;

const UPLOADED_FILES_KEY: &str = "sme_uploaded_files";
const ANALYSIS_KEY: &str = "sme_analysis";
const SESSION_ID_KEY: &str = "sme_session_id";

/// Typed view over a [`KeyValueStore`].
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.store
            .get(key)
            .map(|value| {
                serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
                    key: key.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(StoreError::Encode)?;
        self.store.set(key, value)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    pub fn save_uploaded_files(&mut self, files: &[FileAnalysisResponse]) -> Result<(), StoreError> {
        self.write(UPLOADED_FILES_KEY, files)
    }

    /// Cached uploads; empty when none were saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the cached entry does not decode.
    pub fn uploaded_files(&self) -> Result<Vec<FileAnalysisResponse>, StoreError> {
        Ok(self.read(UPLOADED_FILES_KEY)?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    pub fn save_analysis(&mut self, analysis: &AnalysisResult) -> Result<(), StoreError> {
        self.write(ANALYSIS_KEY, analysis)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the cached entry does not decode.
    pub fn analysis(&self) -> Result<Option<AnalysisResult>, StoreError> {
        self.read(ANALYSIS_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    pub fn save_session_id(&mut self, session_id: &str) -> Result<(), StoreError> {
        self.write(SESSION_ID_KEY, session_id)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the cached entry is not a string.
    pub fn session_id(&self) -> Result<Option<String>, StoreError> {
        self.read(SESSION_ID_KEY)
    }

    /// Forgets everything this store holds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(UPLOADED_FILES_KEY)?;
        self.store.remove(ANALYSIS_KEY)?;
        self.store.remove(SESSION_ID_KEY)
    }
}

/// What [`restore_session`] brought back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoredSession {
    pub uploaded_files: Vec<FileAnalysisResponse>,
    pub analysis: Option<AnalysisResult>,
    /// True when anything was recovered, locally or from the backend.
    pub restored: bool,
}

/// Rebuilds the previous session.
///
/// Cached uploads and analysis are returned as-is. When no uploads are cached
/// but a session id is, the session is fetched from the backend and cached;
/// if the backend no longer has it, or the fetch fails, the local state is
/// cleared.
///
/// # Errors
///
/// Returns [`StoreError`] only for local storage failures. Backend failures
/// are logged and handled by clearing the store.
pub async fn restore_session<S: KeyValueStore>(
    store: &mut SessionStore<S>,
    backend: &BackendClient,
) -> Result<RestoredSession, StoreError> {
    let mut uploaded_files = store.uploaded_files()?;
    let analysis = store.analysis()?;
    let mut restored = !uploaded_files.is_empty() || analysis.is_some();

    if uploaded_files.is_empty() {
        if let Some(session_id) = store.session_id()? {
            match backend.get_session(&session_id).await {
                Ok(Some(session)) if session.success => {
                    tracing::info!(%session_id, file = %session.file_name, "restored session from backend");
                    uploaded_files = vec![session];
                    store.save_uploaded_files(&uploaded_files)?;
                    restored = true;
                }
                Ok(_) => {
                    tracing::info!(%session_id, "backend session no longer available, clearing");
                    store.clear()?;
                }
                Err(err) => {
                    tracing::warn!(%session_id, error = %err, "failed to restore session from backend, clearing");
                    store.clear()?;
                }
            }
        }
    }

    Ok(RestoredSession {
        uploaded_files,
        analysis,
        restored,
    })
}
