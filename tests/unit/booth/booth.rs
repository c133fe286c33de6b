use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::{
    assets::{encode::decode_data_url, store::PreparedImage},
    camera::{
        device::{CameraError, MediaStream, StreamConstraints},
        synthetic::StillImageDevices,
    },
    frame::{PersonImage, PersonKind, default_stickers},
};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

fn assert_near(actual: [u8; 4], expected: [u8; 4]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 2, "{actual:?} vs {expected:?}");
    }
}

fn red_camera() -> StillImageDevices {
    StillImageDevices::new(PreparedImage::solid(90, 160, RED))
}

fn frames(n: usize) -> Vec<CustomFrame> {
    (0..n).map(|_| CustomFrame::new(&FixedClock(1))).collect()
}

fn booth(frames: Vec<CustomFrame>) -> PhotoBooth<StillImageDevices> {
    PhotoBooth::new(red_camera(), frames, BoothOptions::default()).unwrap()
}

#[test]
fn preview_loop_runs_while_open() {
    let mut b = booth(frames(1));
    assert!(!b.on_animation_frame());
    assert!(b.open());
    assert!(b.is_previewing());

    assert!(b.on_animation_frame());
    assert!(b.on_animation_frame());
    assert!(b.is_previewing());
    assert_eq!((b.preview().width(), b.preview().height()), (324, 576));
    assert_eq!(b.preview().pixel(162, 288).unwrap(), RED);
    assert!((b.preview_scale() - 0.6).abs() < 1e-12);
}

#[test]
fn close_cancels_loop_and_camera() {
    let mut b = booth(frames(1));
    b.open();
    b.close();
    assert!(!b.is_open());
    assert!(!b.is_previewing());
    assert!(!b.camera_session().is_streaming);
    assert!(!b.on_animation_frame());
    assert!(b.capture().is_none());
    b.close();
}

#[test]
fn switching_camera_needs_an_open_booth() {
    let mut b = booth(frames(1));
    assert!(!b.switch_camera());
    assert!(!b.camera_session().is_streaming);

    b.open();
    assert!(b.switch_camera());
    assert_eq!(b.camera_session().facing, Facing::Environment);

    b.close();
    assert!(!b.switch_camera());
    assert!(!b.camera_session().is_streaming);
}

#[test]
fn capture_stops_loop_and_notifies() {
    let seen = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = seen.clone();
    let mut b = booth(frames(1)).on_capture(move |url| sink.borrow_mut().push(url.to_owned()));
    b.open();
    b.on_animation_frame();

    let url = b.capture().unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"));
    assert_eq!(seen.borrow().as_slice(), [url.clone()]);
    assert_eq!(b.captured(), Some(url.as_str()));
    assert!(!b.is_previewing());
    assert!(!b.on_animation_frame());

    let (mime, bytes) = decode_data_url(&url).unwrap();
    assert_eq!(mime, "image/jpeg");
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (1080, 1920));

    b.retake();
    assert!(b.captured().is_none());
    assert!(b.is_previewing());
    assert!(b.on_animation_frame());
}

#[test]
fn capture_matches_preview_layout() {
    let mut frame = CustomFrame::new(&FixedClock(1));
    frame.groom_image = Some(PersonImage {
        cropped_url: Some("groom.png".to_owned()),
        ..PersonImage::new(PersonKind::Groom, "g.png")
    });
    let id = frame.id.clone();
    let mut b = booth(vec![frame]);
    b.images
        .insert(id, PersonKind::Groom, PreparedImage::solid(150, 200, BLUE));
    b.open();
    b.on_animation_frame();
    // preview scale 0.6: groom covers (30, 60)..(120, 180)
    assert_near(b.preview().pixel(75, 120).unwrap(), BLUE);
    assert_near(b.preview().pixel(150, 120).unwrap(), RED);

    let url = b.capture().unwrap();
    let (_, bytes) = decode_data_url(&url).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    // capture scale 2.0: groom covers (100, 200)..(400, 600)
    let [r, g, bl, _] = img.get_pixel(250, 400).0;
    assert!(r < 24 && g < 24 && bl > 230, "{r} {g} {bl}");
    let [r, g, bl, _] = img.get_pixel(500, 400).0;
    assert!(r > 230 && g < 24 && bl < 24, "{r} {g} {bl}");
}

struct WarmingUpDevices;

struct WarmingUpStream;

impl MediaStream for WarmingUpStream {
    fn resolution(&self) -> (u32, u32) {
        (0, 0)
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn frame(&mut self) -> KropperResult<PreparedImage> {
        Err(crate::foundation::error::KropperError::render("no data"))
    }

    fn stop(&mut self) {}

    fn is_live(&self) -> bool {
        true
    }
}

impl MediaDevices for WarmingUpDevices {
    fn get_user_media(
        &mut self,
        _constraints: &StreamConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError> {
        Ok(Box::new(WarmingUpStream))
    }
}

#[test]
fn loop_waits_for_video_without_drawing() {
    let mut b = PhotoBooth::new(WarmingUpDevices, frames(1), BoothOptions::default()).unwrap();
    assert!(b.open());
    for _ in 0..3 {
        assert!(!b.on_animation_frame());
        assert!(b.is_previewing());
    }
    assert_eq!(b.preview().pixel(0, 0).unwrap(), [0, 0, 0, 0]);
    assert!(b.capture().is_none());
    assert!(b.captured().is_none());
}

#[test]
fn camera_failure_is_reported_not_raised() {
    let devices = StillImageDevices::failing(
        PreparedImage::solid(1, 1, RED),
        CameraError::PermissionDenied,
    );
    let mut b = PhotoBooth::new(devices, frames(1), BoothOptions::default()).unwrap();
    assert!(!b.open());
    assert!(b.camera_session().error.is_some());
    assert!(!b.on_animation_frame());
    assert!(b.is_previewing());
}

#[test]
fn frames_cycle_in_both_directions() {
    let mut b = booth(frames(3));
    assert_eq!(b.next_frame(), 1);
    assert_eq!(b.next_frame(), 2);
    assert_eq!(b.next_frame(), 0);
    assert_eq!(b.prev_frame(), 2);
    b.select_frame(7);
    assert_eq!(b.selected_index(), 2);
    assert_eq!(b.selected_frame().map(|f| &f.id), Some(&b.frames()[2].id));

    let mut empty = booth(Vec::new());
    assert_eq!(empty.next_frame(), 0);
    assert_eq!(empty.prev_frame(), 0);
    assert!(empty.selected_frame().is_none());
    assert!(empty.thumbnail(0, 48).unwrap().is_none());
}

#[test]
fn filter_picker_toggles_off() {
    let mut b = booth(frames(1));
    assert_eq!(b.toggle_filter(FilterKind::Sepia), FilterKind::Sepia);
    assert_eq!(b.toggle_filter(FilterKind::Warm), FilterKind::Warm);
    assert_eq!(b.toggle_filter(FilterKind::Warm), FilterKind::None);
    b.select_filter(FilterKind::Cool);
    assert_eq!(b.filter(), FilterKind::Cool);
}

#[test]
fn download_name_uses_clock() {
    let b = booth(frames(1)).with_clock(FixedClock(1234));
    assert_eq!(b.download_name(), "photobooth-1234.jpg");
}

#[test]
fn stickers_toggle_through_booth() {
    let mut b = booth(frames(1));
    let heart = default_stickers().remove(0);
    assert!(b.toggle_sticker(&heart));
    assert_eq!(b.stickers().stickers().len(), 1);
    assert!(!b.toggle_sticker(&heart));
    assert!(b.stickers().stickers().is_empty());
}

#[test]
fn invalid_options_are_rejected() {
    let opts = BoothOptions {
        capture_width: 1000,
        ..BoothOptions::default()
    };
    assert!(PhotoBooth::new(red_camera(), frames(1), opts).is_err());
}
