//! Flat-file theme store backing `/api/theme`.

use std::path::{Path, PathBuf};

use cv_protocol::theme::Theme;

#[derive(Debug, thiserror::Error)]
pub enum ThemeStoreError {
    #[error("theme file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("theme file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads and writes the site theme as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Theme, ThemeStoreError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Overwrite the theme file.
    pub async fn save(&self, theme: &Theme) -> Result<(), ThemeStoreError> {
        let contents = serde_json::to_string_pretty(theme)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}
