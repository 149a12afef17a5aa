use serde::{Deserialize, Serialize};

// how the needle moves during playback
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    #[default]
    Linear,
    Bounce,
    Random,
    Wander,
    // named but never given any motion; the needle stays put
    Pattern,
}

impl PlayMode {
    pub fn next(self) -> Self {
        match self {
            PlayMode::Linear => PlayMode::Bounce,
            PlayMode::Bounce => PlayMode::Random,
            PlayMode::Random => PlayMode::Wander,
            PlayMode::Wander => PlayMode::Pattern,
            PlayMode::Pattern => PlayMode::Linear,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayMode::Linear => "LINEAR",
            PlayMode::Bounce => "BOUNCE",
            PlayMode::Random => "RANDOM",
            PlayMode::Wander => "WANDER",
            PlayMode::Pattern => "PATTERN",
        }
    }
}
