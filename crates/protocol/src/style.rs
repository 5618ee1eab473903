use serde::{Deserialize, Serialize};

/// Semantic style classes resolved by the renderer.
///
/// The layout engine never picks colors or stroke widths; it only tags each
/// element so the rendering side can look the visual style up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleClass {
    CourseBar,
    Connector,
    ConnectorBorder,

    ArrowCompletion,
    ArrowParticipation,

    YearBand,
}

/// Decoration placed at the end of an arrow path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    ArrowHead,
}

/// Which prerequisite relation an arrow expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerequisiteKind {
    /// The source course must be passed before the target starts.
    Completion,
    /// The source course must have been attended before the target starts.
    Participation,
}

impl PrerequisiteKind {
    pub fn style(self) -> StyleClass {
        match self {
            Self::Completion => StyleClass::ArrowCompletion,
            Self::Participation => StyleClass::ArrowParticipation,
        }
    }
}
