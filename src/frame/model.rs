use serde::{Deserialize, Serialize};

use crate::foundation::{
    clock::{Clock, next_id},
    core::Placement,
    error::{KropperError, KropperResult},
};

/// Background swatches offered in the arrange step.
pub const BACKGROUND_COLORS: [&str; 8] = [
    "#ffffff", "#f5f5f5", "#fef3e2", "#e8f5e9", "#e3f2fd", "#fce4ec", "#f3e5f5", "#1a1a1a",
];

/// Which of the two people an image belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    /// Groom.
    Groom,
    /// Bride.
    Bride,
}

impl PersonKind {
    /// Both people, in draw order.
    pub const BOTH: [PersonKind; 2] = [PersonKind::Groom, PersonKind::Bride];

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Groom => "groom",
            Self::Bride => "bride",
        }
    }

    /// Placement given to a freshly uploaded image, in canonical units.
    pub fn default_placement(self) -> Placement {
        let x = match self {
            Self::Groom => 50.0,
            Self::Bride => 200.0,
        };
        Placement::new(x, 100.0, 150.0, 200.0, 0.0)
    }
}

/// One person's photo within a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonImage {
    /// Owner.
    #[serde(rename = "type")]
    pub kind: PersonKind,
    /// Uploaded source image.
    pub original_url: String,
    /// Cropped cut-out drawn in the frame.
    #[serde(default)]
    pub cropped_url: Option<String>,
    /// Placement in the 540x960 canonical space.
    pub position: Placement,
}

impl PersonImage {
    /// New image at the person's default placement.
    pub fn new(kind: PersonKind, original_url: impl Into<String>) -> Self {
        Self {
            kind,
            original_url: original_url.into(),
            cropped_url: None,
            position: kind.default_placement(),
        }
    }
}

/// A two-person photo frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFrame {
    /// Unique id.
    pub id: String,
    /// User-given name.
    pub name: String,
    /// Groom photo.
    #[serde(default)]
    pub groom_image: Option<PersonImage>,
    /// Bride photo.
    #[serde(default)]
    pub bride_image: Option<PersonImage>,
    /// CSS-style hex color behind the photos.
    pub background_color: String,
    /// Creation time, Unix millis.
    pub created_at: u64,
    /// Last mutation time, Unix millis.
    pub updated_at: u64,
}

impl CustomFrame {
    /// Empty frame with a fresh id.
    pub fn new(clock: &dyn Clock) -> Self {
        let now = clock.now_millis();
        Self {
            id: next_id("frame", clock),
            name: "프레임 1".to_owned(),
            groom_image: None,
            bride_image: None,
            background_color: "#ffffff".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Image for `kind`.
    pub fn person(&self, kind: PersonKind) -> Option<&PersonImage> {
        match kind {
            PersonKind::Groom => self.groom_image.as_ref(),
            PersonKind::Bride => self.bride_image.as_ref(),
        }
    }

    pub(crate) fn person_slot(&mut self, kind: PersonKind) -> &mut Option<PersonImage> {
        match kind {
            PersonKind::Groom => &mut self.groom_image,
            PersonKind::Bride => &mut self.bride_image,
        }
    }

    /// Parse a list of frames (as handed to the photo booth) from JSON.
    pub fn list_from_json(s: &str) -> KropperResult<Vec<Self>> {
        let v: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| KropperError::validation(format!("parse frame JSON: {e}")))?;
        let frames = if v.is_array() {
            serde_json::from_value(v)
        } else {
            serde_json::from_value(v).map(|f| vec![f])
        };
        frames.map_err(|e| KropperError::validation(format!("parse frame JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/model.rs"]
mod tests;
