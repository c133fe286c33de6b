use serde::{Deserialize, Serialize};

use crate::{
    crop::widget::CropHandle,
    foundation::{
        clock::{Clock, SystemClock},
        core::PlacementPatch,
        error::{KropperError, KropperResult},
    },
    frame::model::{CustomFrame, PersonImage, PersonKind},
};

/// Steps of the frame editor, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameEditorStep {
    /// Upload the groom photo.
    GroomUpload,
    /// Crop the groom photo.
    GroomCrop,
    /// Upload the bride photo.
    BrideUpload,
    /// Crop the bride photo.
    BrideCrop,
    /// Arrange both cut-outs and pick a background.
    Arrange,
    /// Name the frame.
    Name,
    /// Done.
    Complete,
}

/// Fixed step sequence.
pub const STEP_ORDER: [FrameEditorStep; 7] = [
    FrameEditorStep::GroomUpload,
    FrameEditorStep::GroomCrop,
    FrameEditorStep::BrideUpload,
    FrameEditorStep::BrideCrop,
    FrameEditorStep::Arrange,
    FrameEditorStep::Name,
    FrameEditorStep::Complete,
];

impl FrameEditorStep {
    /// Position within [`STEP_ORDER`].
    pub fn index(self) -> usize {
        STEP_ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Person the step is about, if any.
    pub fn person(self) -> Option<PersonKind> {
        match self {
            Self::GroomUpload | Self::GroomCrop => Some(PersonKind::Groom),
            Self::BrideUpload | Self::BrideCrop => Some(PersonKind::Bride),
            Self::Arrange | Self::Name | Self::Complete => None,
        }
    }

    /// Header copy for the step.
    pub fn info(self) -> StepInfo {
        let (title, description) = match self {
            Self::GroomUpload => (
                "신랑 사진 업로드",
                "배경이 제거된 신랑 사진을 업로드해주세요",
            ),
            Self::GroomCrop => ("신랑 사진 위치 지정", "프레임에 들어갈 영역을 선택해주세요"),
            Self::BrideUpload => (
                "신부 사진 업로드",
                "배경이 제거된 신부 사진을 업로드해주세요",
            ),
            Self::BrideCrop => ("신부 사진 위치 지정", "프레임에 들어갈 영역을 선택해주세요"),
            Self::Arrange => ("위치 조정", "신랑, 신부 사진의 위치와 크기를 조정해주세요"),
            Self::Name => ("프레임 이름", "프레임 이름을 입력해주세요"),
            Self::Complete => ("완료", "프레임이 저장되었습니다"),
        };
        StepInfo {
            title,
            description,
            person: self.person(),
        }
    }
}

/// Title, description and subject of a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepInfo {
    /// Short title.
    pub title: &'static str,
    /// One-line instruction.
    pub description: &'static str,
    /// Person the step is about.
    pub person: Option<PersonKind>,
}

/// Full editor state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEditorState {
    /// Current step.
    pub step: FrameEditorStep,
    /// Frame under construction.
    pub frame: CustomFrame,
    /// Host is busy (upload, crop export).
    pub is_loading: bool,
    /// Last error shown to the user.
    pub error: Option<String>,
}

/// Commands a parent drives the editor with.
pub trait FrameEditorHandle {
    /// Copy of the frame as it stands.
    fn get_frame(&self) -> CustomFrame;
    /// Discard all progress.
    fn reset(&mut self);
}

/// Step machine plus the frame it builds.
///
/// Every frame mutation refreshes `updated_at`. Steps advance only when
/// [`FrameEditor::can_go_next`] holds.
pub struct FrameEditor {
    state: FrameEditorState,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for FrameEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameEditor")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for FrameEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEditor {
    /// Editor on a new frame, stamped with the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Editor on a new frame, stamped with `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        let frame = CustomFrame::new(&clock);
        Self::from_frame(frame, clock)
    }

    /// Resume editing an existing frame from the first step.
    pub fn from_frame(frame: CustomFrame, clock: impl Clock + 'static) -> Self {
        Self {
            state: FrameEditorState {
                step: FrameEditorStep::GroomUpload,
                frame,
                is_loading: false,
                error: None,
            },
            clock: Box::new(clock),
        }
    }

    /// Current state.
    pub fn state(&self) -> &FrameEditorState {
        &self.state
    }

    /// Frame under construction.
    pub fn frame(&self) -> &CustomFrame {
        &self.state.frame
    }

    /// Current step.
    pub fn step(&self) -> FrameEditorStep {
        self.state.step
    }

    /// Jump directly to `step`, clearing any error.
    pub fn set_step(&mut self, step: FrameEditorStep) {
        self.go_to(step);
    }

    /// Advance one step when the current step is complete. Returns `true` if the step changed.
    pub fn next_step(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        let i = (self.state.step.index() + 1).min(STEP_ORDER.len() - 1);
        self.go_to(STEP_ORDER[i])
    }

    /// Go back one step (stays on the first). Returns `true` if the step changed.
    pub fn prev_step(&mut self) -> bool {
        let i = self.state.step.index().saturating_sub(1);
        self.go_to(STEP_ORDER[i])
    }

    /// Admission guard for leaving the current step.
    pub fn can_go_next(&self) -> bool {
        let frame = &self.state.frame;
        let has_original = |kind| frame.person(kind).is_some_and(|p| !p.original_url.is_empty());
        let has_cropped = |kind| {
            frame
                .person(kind)
                .and_then(|p| p.cropped_url.as_deref())
                .is_some_and(|u| !u.is_empty())
        };
        match self.state.step {
            FrameEditorStep::GroomUpload => has_original(PersonKind::Groom),
            FrameEditorStep::GroomCrop => has_cropped(PersonKind::Groom),
            FrameEditorStep::BrideUpload => has_original(PersonKind::Bride),
            FrameEditorStep::BrideCrop => has_cropped(PersonKind::Bride),
            FrameEditorStep::Arrange => true,
            FrameEditorStep::Name => !frame.name.trim().is_empty(),
            FrameEditorStep::Complete => false,
        }
    }

    /// Replace `kind`'s photo with a fresh upload at the default placement.
    pub fn set_person_image(&mut self, kind: PersonKind, original_url: impl Into<String>) {
        *self.state.frame.person_slot(kind) = Some(PersonImage::new(kind, original_url));
        self.touch();
    }

    /// Record the cropped cut-out for `kind`. Ignored (apart from the timestamp) when no photo
    /// was uploaded.
    pub fn set_cropped_image(&mut self, kind: PersonKind, cropped_url: impl Into<String>) {
        if let Some(p) = self.state.frame.person_slot(kind) {
            p.cropped_url = Some(cropped_url.into());
        }
        self.touch();
    }

    /// Merge `patch` onto `kind`'s placement.
    pub fn update_position(&mut self, kind: PersonKind, patch: PlacementPatch) {
        if let Some(p) = self.state.frame.person_slot(kind) {
            p.position = p.position.merged(patch);
        }
        self.touch();
    }

    /// Upload the groom photo.
    pub fn set_groom_image(&mut self, url: impl Into<String>) {
        self.set_person_image(PersonKind::Groom, url);
    }

    /// Upload the bride photo.
    pub fn set_bride_image(&mut self, url: impl Into<String>) {
        self.set_person_image(PersonKind::Bride, url);
    }

    /// Record the groom cut-out.
    pub fn set_groom_cropped_image(&mut self, url: impl Into<String>) {
        self.set_cropped_image(PersonKind::Groom, url);
    }

    /// Record the bride cut-out.
    pub fn set_bride_cropped_image(&mut self, url: impl Into<String>) {
        self.set_cropped_image(PersonKind::Bride, url);
    }

    /// Adjust the groom placement.
    pub fn update_groom_position(&mut self, patch: PlacementPatch) {
        self.update_position(PersonKind::Groom, patch);
    }

    /// Adjust the bride placement.
    pub fn update_bride_position(&mut self, patch: PlacementPatch) {
        self.update_position(PersonKind::Bride, patch);
    }

    /// Rename the frame.
    pub fn set_frame_name(&mut self, name: impl Into<String>) {
        self.state.frame.name = name.into();
        self.touch();
    }

    /// Change the background color.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.state.frame.background_color = color.into();
        self.touch();
    }

    /// Toggle the busy flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
    }

    /// Set or clear the error message.
    pub fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
    }

    /// Start over with a brand-new frame.
    pub fn reset(&mut self) {
        self.state = FrameEditorState {
            step: FrameEditorStep::GroomUpload,
            frame: CustomFrame::new(self.clock.as_ref()),
            is_loading: false,
            error: None,
        };
        tracing::debug!(id = %self.state.frame.id, "frame editor reset");
    }

    /// Header copy for the current step.
    pub fn step_info(&self) -> StepInfo {
        self.state.step.info()
    }

    /// Index of the current step.
    pub fn current_step_index(&self) -> usize {
        self.state.step.index()
    }

    /// Number of steps shown in the progress indicator (excludes `complete`).
    pub fn total_steps(&self) -> usize {
        STEP_ORDER.len() - 1
    }

    /// Accept an uploaded photo for the current upload step and move on.
    pub fn accept_upload(&mut self, original_url: impl Into<String>) -> KropperResult<()> {
        let kind = match self.state.step {
            FrameEditorStep::GroomUpload => PersonKind::Groom,
            FrameEditorStep::BrideUpload => PersonKind::Bride,
            other => {
                return Err(KropperError::validation(format!(
                    "cannot upload during step {other:?}"
                )));
            }
        };
        self.set_person_image(kind, original_url);
        self.next_step();
        Ok(())
    }

    /// Export a PNG from `cropper` for the current crop step, store it and move on.
    ///
    /// Returns `false` (and stays put) when the cropper had nothing to export.
    pub fn accept_crop(&mut self, cropper: &mut dyn CropHandle) -> KropperResult<bool> {
        let kind = match self.state.step {
            FrameEditorStep::GroomCrop => PersonKind::Groom,
            FrameEditorStep::BrideCrop => PersonKind::Bride,
            other => {
                return Err(KropperError::validation(format!(
                    "cannot crop during step {other:?}"
                )));
            }
        };
        let Some(png) = cropper.crop("image/png") else {
            return Ok(false);
        };
        self.set_cropped_image(kind, png.to_data_url());
        Ok(self.next_step())
    }

    fn go_to(&mut self, step: FrameEditorStep) -> bool {
        self.state.error = None;
        if self.state.step == step {
            return false;
        }
        tracing::debug!(from = ?self.state.step, to = ?step, "frame editor step");
        self.state.step = step;
        true
    }

    fn touch(&mut self) {
        self.state.frame.updated_at = self.clock.now_millis();
    }
}

impl FrameEditorHandle for FrameEditor {
    fn get_frame(&self) -> CustomFrame {
        self.state.frame.clone()
    }

    fn reset(&mut self) {
        FrameEditor::reset(self);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/editor.rs"]
mod tests;
