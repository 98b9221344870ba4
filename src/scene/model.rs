use crate::foundation::error::{PonderError, PonderResult};
use crate::scene::base::BaseLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The script document: every scene the player can show, in navigation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub scenes: Vec<Scene>,
}

/// An ordered group of fragments plus the layout placed before the first one runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseLayout>,
    #[serde(rename = "fragment", default)]
    pub fragments: Vec<Fragment>,
}

/// Raw command lines, executed top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment {
    pub lines: Vec<String>,
}

impl Fragment {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl Scene {
    pub fn new(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        Self {
            base: None,
            fragments: fragments.into_iter().collect(),
        }
    }

    pub fn with_base(mut self, base: BaseLayout) -> Self {
        self.base = Some(base);
        self
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}

impl ScriptDocument {
    pub fn new(scenes: impl IntoIterator<Item = Scene>) -> Self {
        Self {
            title: None,
            version: None,
            scenes: scenes.into_iter().collect(),
        }
    }

    pub fn from_json_str(s: &str) -> PonderResult<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Read, parse and validate a script document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> PonderResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            PonderError::validation(format!("read script '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Structural checks only; command text itself is trusted and never rejected here.
    pub fn validate(&self) -> PonderResult<()> {
        if self.scenes.is_empty() {
            return Err(PonderError::validation("script must contain at least one scene"));
        }
        for (i, scene) in self.scenes.iter().enumerate() {
            if scene.fragments.is_empty() {
                return Err(PonderError::validation(format!(
                    "scene {i} must contain at least one fragment"
                )));
            }
        }
        Ok(())
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
