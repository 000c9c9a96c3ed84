use std::path::{Path, PathBuf};

use crate::{
    error::SyncError,
    types::{Account, CredentialsFile},
};

/// Tidal accounts read from the credentials file.
///
/// The file is JSON:
///
/// ```json
/// { "tidal": [ { "username": "me@example.org", "password": "..." } ] }
/// ```
pub struct CredentialsManager {
    path: PathBuf,
    credentials: CredentialsFile,
}

impl CredentialsManager {
    pub async fn load(path: &Path) -> Result<Self, SyncError> {
        let content = async_fs::read_to_string(path).await.map_err(|e| {
            SyncError::Credentials(format!("cannot read {}: {}", path.display(), e))
        })?;
        let credentials: CredentialsFile = serde_json::from_str(&content).map_err(|e| {
            SyncError::Credentials(format!("cannot parse {}: {}", path.display(), e))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            credentials,
        })
    }

    pub fn tidal_accounts(&self) -> &[Account] {
        &self.credentials.tidal
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
