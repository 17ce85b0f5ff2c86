//! The `tabcmd-session.json` file that carries a sign-in across runs.
//!
//! Signing in writes it, signing out nulls every field but `updated-at`,
//! and every other command reads it back into a [`SessionContext`].
//! Concurrent writers are not coordinated; the last one wins.

use crate::client::{Server, SessionContext};
use crate::error::TscError;
use anyhow::{Context, Result};
use chrono::Local;
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE_NAME: &str = "tabcmd-session.json";
const UPDATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionFile {
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub base_url: Option<String>,
    pub authenticity_token: Option<String>,
    pub site_prefix: Option<String>,
    pub site_namespace: Option<String>,
    pub site_displayname: Option<String>,
    pub site_id: Option<String>,
    pub updated_at: Option<String>,
}

impl SessionFile {
    /// Records a fresh sign-in of `username` to the site `site_content_url`
    #[must_use]
    pub fn signed_in(
        username: impl Into<String>,
        server: &Server,
        session: &SessionContext,
        site_content_url: &str,
    ) -> Self {
        Self {
            username: Some(username.into()),
            user_id: Some(session.user_id.clone()),
            base_url: Some(server.address().to_string()),
            authenticity_token: Some(session.auth_token.clone()),
            site_prefix: Some(site_content_url.to_string()),
            site_namespace: Some(site_content_url.to_string()),
            site_displayname: Some(site_content_url.to_string()),
            site_id: Some(session.site_id.clone()),
            updated_at: Some(now()),
        }
    }

    /// The file after a sign-out: every field null but a fresh `updated-at`
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            updated_at: Some(now()),
            ..Self::default()
        }
    }

    /// `tabcmd-session.json` in the per-user data directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "Tableau", "Tabcmd")
            .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a session file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        let session = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file {}", path.display()))?;
        debug!("Loaded session file {}", path.display());
        Ok(session)
    }

    /// Writes the file, creating its directory first
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        let content = serde_json::to_string(self).context("Failed to serialize session file")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write session file {}", path.display()))?;
        debug!("Saved session file {}", path.display());
        Ok(())
    }

    /// The session to resume, if the file holds one
    ///
    /// # Errors
    ///
    /// Returns [`TscError::NotSignedIn`] when the token, site id or user id is null
    pub fn context(&self) -> std::result::Result<SessionContext, TscError> {
        match (&self.authenticity_token, &self.site_id, &self.user_id) {
            (Some(auth_token), Some(site_id), Some(user_id)) => Ok(SessionContext {
                auth_token: auth_token.clone(),
                site_id: site_id.clone(),
                user_id: user_id.clone(),
            }),
            _ => Err(TscError::NotSignedIn),
        }
    }
}

fn now() -> String {
    Local::now().format(UPDATED_AT_FORMAT).to_string()
}
