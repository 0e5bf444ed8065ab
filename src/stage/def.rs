use crate::foundation::core::Dimensions;

/// Guide size used when a [`StageDef`] does not name one.
pub const HD_GUIDE: Dimensions = Dimensions::new(1920, 1080);

/// Serializable description of a stage, left to right.
///
/// This is the configuration surface of the crate. It is turned into an
/// immutable [`crate::StageSpec`] by [`crate::StageSpec::from_def`], which
/// derives every zone offset and rejects inconsistent input.
///
/// ```json
/// {
///   "height": 1080,
///   "pillar_width": 360,
///   "center_width": 2700,
///   "screens": [
///     { "kind": "pillar", "id": "P1", "label": "Pillar 1 (Left)" },
///     { "kind": "pillar", "id": "P2" },
///     { "kind": "center" },
///     { "kind": "pillar", "id": "P3" },
///     { "kind": "pillar", "id": "P4", "x_offset": 3780 }
///   ],
///   "hd_guide": { "width": 1920, "height": 1080 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageDef {
    /// Height shared by every screen, in pixels.
    pub height: u32,
    /// Width shared by every pillar screen, in pixels.
    pub pillar_width: u32,
    /// Width of the center screen, in pixels.
    pub center_width: u32,
    /// Screens in physical order, left to right.
    pub screens: Vec<ScreenDef>,
    /// Advisory guide box centered in the center screen.
    ///
    /// When absent, 1920x1080 is used if it fits the center screen, otherwise
    /// the center screen itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd_guide: Option<Dimensions>,
}

/// One physical screen in a [`StageDef`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScreenDef {
    /// A flanking pillar screen.
    Pillar {
        /// Short stable identifier (`P1`).
        id: String,
        /// Display label; defaults to `id`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        /// Optional explicit offset, checked against the derived one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x_offset: Option<u32>,
    },
    /// The center (safe) screen.
    Center {
        /// Optional explicit offset, checked against the derived one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x_offset: Option<u32>,
    },
}

impl ScreenDef {
    fn pillar(id: &str, label: &str) -> Self {
        Self::Pillar {
            id: id.to_string(),
            label: Some(label.to_string()),
            x_offset: None,
        }
    }
}

impl StageDef {
    /// The 4140x1080 stage: two 360px pillars, a 2700px center, two 360px pillars.
    pub fn five_screen() -> Self {
        Self {
            height: 1080,
            pillar_width: 360,
            center_width: 2700,
            screens: vec![
                ScreenDef::pillar("P1", "Pillar 1 (Left)"),
                ScreenDef::pillar("P2", "Pillar 2 (Left)"),
                ScreenDef::Center { x_offset: None },
                ScreenDef::pillar("P3", "Pillar 3 (Right)"),
                ScreenDef::pillar("P4", "Pillar 4 (Right)"),
            ],
            hd_guide: Some(HD_GUIDE),
        }
    }
}

impl Default for StageDef {
    fn default() -> Self {
        Self::five_screen()
    }
}
