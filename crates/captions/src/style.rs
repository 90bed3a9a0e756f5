//! Saved caption style snapshots.
//!
//! The library keeps the most recently saved styles first and drops the
//! oldest past [`MAX_SAVED_STYLES`]. It persists as a JSON array.

use std::path::Path;

use serde::{Deserialize, Serialize};

use reelcut_common::error::ReelcutResult;
use reelcut_project_model::{new_id, AnimationPreset, CaptionStyle, Project};

/// Maximum number of saved styles.
pub const MAX_SAVED_STYLES: usize = 40;

/// A named caption appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCaptionStyle {
    pub id: String,
    pub name: String,
    pub font_size: f64,
    pub color: String,
    pub shadow: f64,
    pub stroke: f64,
    pub glow: f64,
    pub animation: AnimationPreset,
}

impl SavedCaptionStyle {
    fn snapshot(name: &str, style: &CaptionStyle) -> Self {
        Self {
            id: new_id("caption"),
            name: name.to_string(),
            font_size: style.font_size,
            color: style.color.clone(),
            shadow: style.shadow,
            stroke: style.stroke,
            glow: style.glow,
            animation: style.animation,
        }
    }

    /// Copy the saved appearance onto `style`, leaving layout settings alone.
    pub fn apply_to(&self, style: &mut CaptionStyle) {
        style.font_size = self.font_size;
        style.color = self.color.clone();
        style.shadow = self.shadow;
        style.stroke = self.stroke;
        style.glow = self.glow;
        style.animation = self.animation;
    }
}

/// Bounded, most-recent-first list of saved styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptionStyleLibrary {
    styles: Vec<SavedCaptionStyle>,
}

impl CaptionStyleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a snapshot under `name`. Blank names are ignored.
    pub fn save(&mut self, name: &str, style: &CaptionStyle) -> Option<&SavedCaptionStyle> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.styles.insert(0, SavedCaptionStyle::snapshot(name, style));
        self.styles.truncate(MAX_SAVED_STYLES);
        self.styles.first()
    }

    pub fn get(&self, id: &str) -> Option<&SavedCaptionStyle> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Apply a saved style to the project's caption settings.
    pub fn apply(&self, id: &str, project: &mut Project) -> bool {
        match self.get(id) {
            Some(saved) => {
                saved.apply_to(&mut project.caption);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<SavedCaptionStyle> {
        let idx = self.styles.iter().position(|s| s.id == id)?;
        Some(self.styles.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedCaptionStyle> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Load a library from a JSON file. A missing file is an empty library.
    pub fn load(path: &Path) -> ReelcutResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let mut library: Self = serde_json::from_str(&json)?;
        library.styles.truncate(MAX_SAVED_STYLES);
        Ok(library)
    }

    pub fn save_to(&self, path: &Path) -> ReelcutResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_project_model::FrameRate;

    #[test]
    fn test_save_most_recent_first() {
        let mut library = CaptionStyleLibrary::new();
        let mut style = CaptionStyle::default();
        library.save("first", &style);
        style.font_size = 60.0;
        let id = library.save("second", &style).unwrap().id.clone();

        let names: Vec<&str> = library.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(library.get(&id).unwrap().font_size, 60.0);
    }

    #[test]
    fn test_blank_name_ignored() {
        let mut library = CaptionStyleLibrary::new();
        assert!(library.save("   ", &CaptionStyle::default()).is_none());
        assert!(library.is_empty());
    }

    #[test]
    fn test_library_is_bounded() {
        let mut library = CaptionStyleLibrary::new();
        for i in 0..(MAX_SAVED_STYLES + 5) {
            library.save(&format!("style {i}"), &CaptionStyle::default());
        }
        assert_eq!(library.len(), MAX_SAVED_STYLES);
        assert_eq!(library.iter().next().unwrap().name, "style 44");
    }

    #[test]
    fn test_apply_keeps_layout_settings() {
        let mut library = CaptionStyleLibrary::new();
        let saved = CaptionStyle {
            font_size: 52.0,
            color: "#FF00FF".to_string(),
            animation: AnimationPreset::Bounce,
            ..CaptionStyle::default()
        };
        let id = library.save("loud", &saved).unwrap().id.clone();

        let mut project = Project::new(FrameRate::Fps30);
        project.caption.words_per_caption = 8;
        assert!(library.apply(&id, &mut project));
        assert_eq!(project.caption.font_size, 52.0);
        assert_eq!(project.caption.animation, AnimationPreset::Bounce);
        assert_eq!(project.caption.words_per_caption, 8);
        assert!(!library.apply("missing", &mut project));
    }

    #[test]
    fn test_persist_roundtrip() {
        let dir = std::env::temp_dir().join("reelcut_test_caption_styles");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("styles.json");

        assert!(CaptionStyleLibrary::load(&path).unwrap().is_empty());

        let mut library = CaptionStyleLibrary::new();
        library.save("clean", &CaptionStyle::default());
        library.save_to(&path).unwrap();
        assert_eq!(CaptionStyleLibrary::load(&path).unwrap(), library);

        std::fs::remove_dir_all(&dir).ok();
    }
}
