use serde::{Deserialize, Serialize};

/// Site theme as stored in `theme.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Primary color, e.g. `"hsl(222 47% 31%)"`.
    pub primary: String,
    pub variant: ThemeVariant,
    pub appearance: Appearance,
    /// Corner radius in rem.
    #[serde(default)]
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Professional,
    Tint,
    Vibrant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("theme primary color is empty")]
    EmptyPrimary,
}

impl Theme {
    pub fn validate(&self) -> Result<(), ThemeError> {
        if self.primary.trim().is_empty() {
            return Err(ThemeError::EmptyPrimary);
        }
        Ok(())
    }
}
