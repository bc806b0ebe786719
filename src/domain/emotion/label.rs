//! Emotion label value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::UnknownEmotionError;

/// All emotion classes the backend can predict
pub const ALL_EMOTIONS: &[Emotion] = &[
    Emotion::Happy,
    Emotion::Sad,
    Emotion::Angry,
    Emotion::Fearful,
    Emotion::Calm,
    Emotion::Surprised,
    Emotion::Disgust,
    Emotion::Neutral,
];

/// The eight-class emotion label set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fearful,
    Calm,
    Surprised,
    Disgust,
    Neutral,
}

impl Emotion {
    /// Get the display label for this emotion
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Fearful => "Fearful",
            Self::Calm => "Calm",
            Self::Surprised => "Surprised",
            Self::Disgust => "Disgust",
            Self::Neutral => "Neutral",
        }
    }

    /// Get the emoji shown next to the label
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Sad => "😢",
            Self::Angry => "😠",
            Self::Fearful => "😳",
            Self::Calm => "🍃",
            Self::Surprised => "😲",
            Self::Disgust => "🤢",
            Self::Neutral => "😐",
        }
    }

    /// Get the Font Awesome icon name used by web frontends
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Happy => "fa-smile-beam",
            Self::Sad => "fa-sad-tear",
            Self::Angry => "fa-angry",
            Self::Fearful => "fa-flushed",
            Self::Calm => "fa-leaf",
            Self::Surprised => "fa-surprise",
            Self::Disgust => "fa-dizzy",
            Self::Neutral => "fa-meh",
        }
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotionError;

    /// Parse a backend label. Case-insensitive; accepts the short `fear`
    /// and `surprise` spellings some model checkpoints emit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "sad" => Ok(Self::Sad),
            "angry" => Ok(Self::Angry),
            "fearful" | "fear" => Ok(Self::Fearful),
            "calm" => Ok(Self::Calm),
            "surprised" | "surprise" => Ok(Self::Surprised),
            "disgust" => Ok(Self::Disgust),
            "neutral" => Ok(Self::Neutral),
            _ => Err(UnknownEmotionError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
