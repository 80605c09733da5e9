use super::*;

#[test]
fn rect_contains_is_edge_inclusive() {
    let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert!(rect.contains(10.0, 20.0));
    assert!(rect.contains(110.0, 70.0));
    assert!(!rect.contains(9.9, 30.0));
    assert_eq!(rect.right(), 110.0);
    assert_eq!(rect.bottom(), 70.0);
}

#[test]
fn inset_shrinks_each_edge() {
    let rect = Rect::from_size(Size::new(400.0, 800.0)).inset(EdgeInsets::uniform(5.0));
    assert_eq!(rect, Rect::new(5.0, 5.0, 390.0, 790.0));
}

#[test]
fn translate_keeps_size() {
    let rect = Rect::new(-400.0, 0.0, 400.0, 800.0).translate(250.0, 0.0);
    assert_eq!(rect, Rect::new(-150.0, 0.0, 400.0, 800.0));
}

#[test]
fn point_distance() {
    assert_eq!(Point::ZERO.distance_to(Point::new(3.0, 4.0)), 5.0);
}
