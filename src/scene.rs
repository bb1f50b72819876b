//! Scene navigation surface
//!
//! Scenes are identified by a typed id that round-trips through plain
//! string names, so persisted "last level" values stay readable.

/// Every navigable scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    MainMenu,
    /// Playable stages Level1..=Level4
    Level(u8),
    /// Credits/thanks screen after the final stage
    End,
}

/// Number of playable stages
pub const LEVEL_COUNT: u8 = 4;

impl SceneId {
    pub fn as_name(&self) -> String {
        match self {
            SceneId::MainMenu => "MainMenu".to_string(),
            SceneId::Level(n) => format!("Level{n}"),
            SceneId::End => "End".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MainMenu" => Some(SceneId::MainMenu),
            "End" => Some(SceneId::End),
            _ => {
                let n: u8 = name.strip_prefix("Level")?.parse().ok()?;
                (1..=LEVEL_COUNT).contains(&n).then_some(SceneId::Level(n))
            }
        }
    }

    /// The stage after this one, or None past the last level
    pub fn next_level(&self) -> Option<SceneId> {
        match self {
            SceneId::Level(n) if *n < LEVEL_COUNT => Some(SceneId::Level(n + 1)),
            _ => None,
        }
    }

    pub fn is_final_level(&self) -> bool {
        matches!(self, SceneId::Level(n) if *n == LEVEL_COUNT)
    }
}

/// Loads named scenes. Called exactly once per terminal transition or
/// explicit navigation request, never mid-cleanup.
pub trait SceneSurface {
    fn load(&mut self, scene: SceneId);
}

/// Swallows navigation; for tests and headless sessions
#[derive(Debug, Default)]
pub struct NullScenes;

impl SceneSurface for NullScenes {
    fn load(&mut self, _scene: SceneId) {}
}

/// Records the navigation history; the demo bin logs it too
#[derive(Debug, Default)]
pub struct LogScenes {
    pub history: Vec<SceneId>,
}

impl SceneSurface for LogScenes {
    fn load(&mut self, scene: SceneId) {
        log::info!("scene: load {}", scene.as_name());
        self.history.push(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for scene in [
            SceneId::MainMenu,
            SceneId::Level(1),
            SceneId::Level(4),
            SceneId::End,
        ] {
            assert_eq!(SceneId::from_name(&scene.as_name()), Some(scene));
        }
    }

    #[test]
    fn test_bad_names_rejected() {
        assert_eq!(SceneId::from_name("Level0"), None);
        assert_eq!(SceneId::from_name("Level5"), None);
        assert_eq!(SceneId::from_name("LevelX"), None);
        assert_eq!(SceneId::from_name("Bonus"), None);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(SceneId::Level(1).next_level(), Some(SceneId::Level(2)));
        assert_eq!(SceneId::Level(4).next_level(), None);
        assert!(SceneId::Level(4).is_final_level());
        assert_eq!(SceneId::MainMenu.next_level(), None);
    }
}
