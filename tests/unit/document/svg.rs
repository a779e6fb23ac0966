use super::*;

fn page_svg(color: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4"><rect width="8" height="4" fill="{color}"/></svg>"#
    )
}

fn deck_json(colors: &[&str]) -> Vec<u8> {
    let pages: Vec<String> = colors.iter().map(|c| page_svg(c)).collect();
    serde_json::to_vec(&serde_json::json!({ "pages": pages })).unwrap()
}

#[test]
fn load_reports_page_count() {
    let doc = SvgDocument::load(&deck_json(&["red", "blue", "lime"])).unwrap();
    assert_eq!(doc.info().page_count.get(), 3);
    assert_eq!(Rasterizer::page_count(&doc).get(), 3);
}

#[test]
fn load_rejects_empty_and_malformed_decks() {
    let empty = serde_json::to_vec(&serde_json::json!({ "pages": [] })).unwrap();
    assert!(matches!(SvgDocument::load(&empty), Err(ViewerError::Load(_))));
    assert!(matches!(
        SvgDocument::load(b"not json"),
        Err(ViewerError::Load(_))
    ));
    let bad_svg = serde_json::to_vec(&serde_json::json!({ "pages": ["<nope"] })).unwrap();
    assert!(matches!(SvgDocument::load(&bad_svg), Err(ViewerError::Load(_))));
}

#[test]
fn page_dimensions_follow_effective_scale() {
    let doc = SvgDocument::load(&deck_json(&["red"])).unwrap();
    let size = doc
        .page_dimensions(PageIndex::FIRST, RasterScale::new(1.5, 2.0).unwrap())
        .unwrap();
    assert_eq!((size.width, size.height), (24, 12));
    assert!(
        doc.page_dimensions(PageIndex::new(2).unwrap(), RasterScale::default())
            .is_err()
    );
}

#[tokio::test]
async fn rasterize_fills_page_with_its_content() {
    let doc = SvgDocument::load(&deck_json(&["red", "blue"])).unwrap();
    let scale = RasterScale::new(1.0, 2.0).unwrap();
    let bmp = doc.rasterize(PageIndex::new(2).unwrap(), scale).await.unwrap();
    assert_eq!((bmp.width(), bmp.height()), (16, 8));
    assert_eq!(bmp.scale(), 2.0);
    assert_eq!(bmp.pixel(4, 4), Some([0, 0, 255, 255]));
    assert_eq!(bmp.logical_size().width, 8.0);
}

#[tokio::test]
async fn rasterize_out_of_range_is_a_rasterization_error() {
    let doc = SvgDocument::load(&deck_json(&["red"])).unwrap();
    let err = doc
        .rasterize(PageIndex::new(4).unwrap(), RasterScale::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ViewerError::Rasterization { page: 4, .. }));
}
