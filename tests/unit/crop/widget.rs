use super::*;
use crate::assets::store::PreparedImage;

const RED: [u8; 4] = [255, 0, 0, 255];

fn solid(w: u32, h: u32) -> ImageSource {
    ImageSource::Prepared(PreparedImage::solid(w, h, RED))
}

#[test]
fn grid_lines_split_canvas_evenly() {
    let lines = grid_lines(Canvas::new(90, 60), 3);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], Line::new((30.0, 0.0), (30.0, 60.0)));
    assert_eq!(lines[1], Line::new((60.0, 0.0), (60.0, 60.0)));
    assert_eq!(lines[2], Line::new((0.0, 20.0), (90.0, 20.0)));
    assert_eq!(lines[3], Line::new((0.0, 40.0), (90.0, 40.0)));
    assert!(grid_lines(Canvas::new(90, 60), 1).is_empty());
}

#[test]
fn src_changes_are_forwarded_once() {
    let mut w = CropWidget::mount(Canvas::new(20, 20), CropOptions::default()).unwrap();
    assert!(w.set_src(Some(solid(40, 20))).unwrap());
    assert!(!w.set_src(Some(solid(40, 20))).unwrap());
    assert!(w.engine().unwrap().image().is_some());

    w.set_zoom(2.0);
    assert!(w.set_src(Some(solid(20, 40))).unwrap());
    assert_eq!(w.engine().unwrap().state().zoom, 1.0);
    assert!(!w.set_src(None).unwrap());
}

#[test]
fn failed_src_can_be_retried() {
    let mut w = CropWidget::mount(Canvas::new(20, 20), CropOptions::default()).unwrap();
    let bad = ImageSource::from("not-a-data-url.png");
    assert!(w.set_src(Some(bad.clone())).is_err());
    assert!(w.set_src(Some(bad)).is_err());
}

#[test]
fn handle_commands_reach_engine() {
    let mut w = CropWidget::mount(Canvas::new(30, 30), CropOptions::default()).unwrap();
    assert!(w.crop("image/png").is_none());

    CropHandle::set_image(&mut w, solid(30, 30)).unwrap();
    w.set_zoom(100.0);
    assert_eq!(w.engine().unwrap().state().zoom, 3.0);
    w.reset();
    assert_eq!(w.engine().unwrap().state().zoom, 1.0);
    w.set_shape("heart");
    assert_eq!(w.engine().unwrap().state().shape, "heart");
    assert!(w.crop("image/png").is_some());
}

#[test]
fn overlay_draws_grid_without_touching_engine_surface() {
    let opts = CropOptions::default().with_grid(true, 3);
    let mut w = CropWidget::mount(Canvas::new(90, 90), opts).unwrap();
    assert!(w.on_animation_frame());

    assert!(w.overlay().pixel(30, 10).unwrap()[3] > 0);
    assert_eq!(w.overlay().pixel(15, 10), Some([0, 0, 0, 0]));
    assert_eq!(w.engine().unwrap().surface().pixel(30, 10), Some([0, 0, 0, 0]));
    assert!(!w.on_animation_frame());
}

#[test]
fn shape_border_only_for_non_rectangles() {
    let opts = CropOptions::default().with_grid(false, 3);
    let mut w = CropWidget::mount(Canvas::new(90, 90), opts).unwrap();
    w.render_overlay().unwrap();
    assert!(w.overlay().data().iter().all(|&b| b == 0));

    w.set_shape("circle");
    assert!(w.on_animation_frame());
    assert!(w.overlay().pixel(45, 0).unwrap()[3] > 0);
    assert_eq!(w.overlay().pixel(45, 45), Some([0, 0, 0, 0]));

    let mut plain = CropWidget::mount(Canvas::new(90, 90), CropOptions::default().with_grid(false, 3))
        .unwrap()
        .with_shape_border(false);
    plain.set_shape("circle");
    plain.render_overlay().unwrap();
    assert!(plain.overlay().data().iter().all(|&b| b == 0));
}

#[test]
fn unmount_is_idempotent() {
    let mut w = CropWidget::mount(Canvas::new(10, 10), CropOptions::default()).unwrap();
    w.set_src(Some(solid(10, 10))).unwrap();
    w.unmount();
    w.unmount();
    assert!(!w.is_mounted());
    assert!(w.crop("image/png").is_none());
    assert!(CropHandle::set_image(&mut w, solid(10, 10)).is_err());
    assert!(!w.handle_event(&InputEvent::Wheel { delta_y: -1.0 }));
    assert!(!w.on_animation_frame());
    assert!(w.render_overlay().is_err());
}
