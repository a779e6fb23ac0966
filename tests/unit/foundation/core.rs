use super::*;

#[test]
fn page_index_rejects_zero() {
    assert!(PageIndex::new(0).is_err());
    assert_eq!(PageIndex::new(3).unwrap().get(), 3);
}

#[test]
fn page_count_bounds() {
    let count = PageCount::new(4).unwrap();
    assert!(count.contains(PageIndex::FIRST));
    assert!(count.contains(PageIndex::new(4).unwrap()));
    assert!(!count.contains(PageIndex::new(5).unwrap()));
    assert!(PageIndex::new(5).unwrap().checked_in(count).is_err());
    assert_eq!(count.last().get(), 4);
    assert_eq!(count.pages().count(), 4);
    assert!(PageCount::new(0).is_err());
}

#[test]
fn neighbours_stay_in_document() {
    let count = PageCount::new(3).unwrap();
    assert_eq!(PageIndex::FIRST.prev(), None);
    assert_eq!(
        PageIndex::new(2).unwrap().prev(),
        Some(PageIndex::FIRST)
    );
    assert_eq!(PageIndex::new(3).unwrap().next_within(count), None);
    assert_eq!(
        PageIndex::FIRST.next_within(count),
        Some(PageIndex::new(2).unwrap())
    );
    assert_eq!(PageIndex::new(3).unwrap().distance_to(PageIndex::FIRST), -2);
}

#[test]
fn surface_size_logical_dimensions() {
    let size = SurfaceSize::new(200, 100).unwrap();
    assert_eq!(size.rgba_len().unwrap(), 200 * 100 * 4);
    let logical = size.to_logical(2.0);
    assert_eq!(logical.width, 100.0);
    assert_eq!(logical.height, 50.0);
    // Bad ratios fall back to 1:1.
    assert_eq!(size.to_logical(0.0).width, 200.0);
    assert!(SurfaceSize::new(0, 10).is_err());
}
