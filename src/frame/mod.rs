//! Two-person frame model: data types, the step-gated editor, arrange-step dragging and stickers.

pub(crate) mod arrange;
pub(crate) mod editor;
pub(crate) mod model;
pub(crate) mod sticker;

pub use arrange::{ArrangeDrag, pick};
pub use editor::{
    FrameEditor, FrameEditorHandle, FrameEditorState, FrameEditorStep, STEP_ORDER, StepInfo,
};
pub use model::{BACKGROUND_COLORS, CustomFrame, PersonImage, PersonKind};
pub use sticker::{
    MIN_STICKER_SIZE, PlacedSticker, Sticker, StickerBoard, StickerCategory,
    create_placed_sticker, default_stickers, draw_stickers, hit_test_sticker,
};
