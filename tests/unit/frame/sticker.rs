use super::*;
use crate::assets::decode::parse_svg;

fn heart() -> Sticker {
    default_stickers()
        .into_iter()
        .find(|s| s.id == "heart")
        .unwrap()
}

#[test]
fn catalog_has_both_categories() {
    let all = default_stickers();
    assert_eq!(all.len(), 8);
    assert!(all.iter().any(|s| s.category == StickerCategory::General));
    assert!(all.iter().any(|s| s.category == StickerCategory::FaceTracking));
    for s in &all {
        assert!(parse_svg(s.svg.as_bytes()).is_ok(), "{}", s.id);
    }
}

#[test]
fn toggle_places_then_removes() {
    let mut board = StickerBoard::new();
    assert!(board.toggle(&heart()));
    let placed = &board.stickers()[0];
    assert_eq!((placed.x, placed.y, placed.width, placed.height), (30.0, 30.0, 60.0, 60.0));
    assert!(board.is_active("heart"));

    assert!(!board.toggle(&heart()));
    assert!(board.stickers().is_empty());
}

#[test]
fn resize_and_rotate_are_normalized() {
    let mut s = create_placed_sticker(&heart(), 0.0, 0.0, 50.0);
    s.resize(5.0, 80.0);
    assert_eq!((s.width, s.height), (MIN_STICKER_SIZE, 80.0));
    s.rotate(-90.0);
    assert_eq!(s.rotation, 270.0);
    s.rotate(720.0);
    assert_eq!(s.rotation, 0.0);
}

#[test]
fn hit_test_returns_topmost_and_respects_rotation() {
    let a = create_placed_sticker(&heart(), 0.0, 0.0, 100.0);
    let b = create_placed_sticker(&heart(), 50.0, 50.0, 100.0);
    let stickers = vec![a.clone(), b.clone()];
    assert_eq!(hit_test_sticker(Point::new(75.0, 75.0), &stickers).unwrap().id, b.id);
    assert_eq!(hit_test_sticker(Point::new(10.0, 10.0), &stickers).unwrap().id, a.id);

    // A thin bar rotated 90 degrees around its center becomes vertical.
    let mut bar = create_placed_sticker(&heart(), 0.0, 45.0, 100.0);
    bar.height = 10.0;
    bar.rotate(90.0);
    let bars = [bar];
    assert!(hit_test_sticker(Point::new(50.0, 10.0), &bars).is_some());
    assert!(hit_test_sticker(Point::new(10.0, 50.0), &bars).is_none());
}

#[test]
fn dragging_moves_by_pointer_delta() {
    let mut board = StickerBoard::new();
    board.toggle(&heart());
    let id = board.pointer_down(Point::new(40.0, 40.0)).unwrap();
    assert!(board.pointer_move(Point::new(50.0, 45.0)));
    assert!(board.pointer_move(Point::new(60.0, 45.0)));
    board.pointer_up();
    assert!(!board.pointer_move(Point::new(0.0, 0.0)));

    let s = board.get_mut(&id).unwrap();
    assert_eq!((s.x, s.y), (50.0, 35.0));
    assert!(board.pointer_down(Point::new(500.0, 500.0)).is_none());
}

#[test]
fn draw_stickers_paints_at_scale() {
    let mut painter = Painter::new();
    let mut dst = Surface::new(100, 100).unwrap();
    let s = create_placed_sticker(&heart(), 0.0, 0.0, 50.0);
    draw_stickers(&mut painter, &mut dst, std::slice::from_ref(&s), 2.0).unwrap();

    assert!(dst.pixel(50, 50).unwrap()[3] > 0);
    assert_eq!(dst.pixel(2, 2).unwrap()[3], 0);

    let first = dst.data().to_vec();
    dst.clear();
    draw_stickers(&mut painter, &mut dst, &[s], 2.0).unwrap();
    assert_eq!(dst.data(), first.as_slice());
}
