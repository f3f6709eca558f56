use pdf_slice::constants::A4_ASPECT;
use pdf_slice::*;

fn ranges(pages: &[PageSpec]) -> Vec<(u32, u32)> {
    pages
        .iter()
        .map(|p| (p.source_y_offset, p.source_end()))
        .collect()
}

fn assert_tiles(width: u32, height: u32, pages: &[PageSpec]) {
    assert!(!pages.is_empty(), "{}x{} produced no pages", width, height);

    let mut expected_start = 0;
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.index, i);
        assert_eq!(
            page.source_y_offset, expected_start,
            "{}x{} page {} leaves a gap or overlaps",
            width, height, i
        );
        assert!(page.source_height > 0, "{}x{} page {} is empty", width, height, i);

        let (_, raster_height) = page.raster_size();
        assert!(page.source_height <= raster_height);

        let ratio = page.target_width / page.target_height;
        assert!(
            ((ratio - A4_ASPECT) / A4_ASPECT).abs() < 1e-6,
            "{}x{} page ratio {} is not A4",
            width,
            height,
            ratio
        );
        expected_start = page.source_end();
    }
    assert_eq!(expected_start, height, "{}x{} rows not fully covered", width, height);
}

#[test]
fn test_tall_image_three_pages() {
    let pages = paginate(1000, 3000, &SliceOptions::default()).unwrap();

    assert_eq!(pages.len(), 3);
    assert_eq!(ranges(&pages), vec![(0, 1414), (1414, 2829), (2829, 3000)]);
    assert_eq!(pages[2].source_height, 171);
    assert!((pages[0].target_height - 1414.2857).abs() < 1e-3);
    assert_eq!(pages[0].target_width, 1000.0);
}

#[test]
fn test_short_image_single_page() {
    let pages = paginate(1000, 500, &SliceOptions::default()).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].source_y_offset, 0);
    assert_eq!(pages[0].source_height, 500);
    assert_eq!(pages[0].raster_size(), (1000, 1415));
}

#[test]
fn test_panoramic_guard() {
    let pages = paginate(5000, 1000, &SliceOptions::default()).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].target_width, 500.0);
    assert!((pages[0].target_height - 707.142857).abs() < 1e-5);
    assert_eq!(ranges(&pages), vec![(0, 707), (707, 1000)]);
}

#[test]
fn test_panoramic_guard_disabled_by_threshold() {
    let options = SliceOptions {
        panoramic_threshold: 10.0,
        ..Default::default()
    };
    let pages = paginate(5000, 1000, &options).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].target_width, 5000.0);
    assert_eq!(pages[0].source_height, 1000);
}

#[test]
fn test_exact_multiple_of_page_height() {
    // 210 wide gives a 297 row page exactly
    let pages = paginate(210, 594, &SliceOptions::default()).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(ranges(&pages), vec![(0, 297), (297, 594)]);
    assert_eq!(pages[1].raster_size(), (210, 297));
}

#[test]
fn test_zero_dimensions_rejected() {
    let options = SliceOptions::default();

    for (w, h) in [(0, 100), (100, 0), (0, 0)] {
        match paginate(w, h, &options) {
            Err(SliceError::InvalidImageDimensions { width, height }) => {
                assert_eq!((width, height), (w, h));
            }
            other => panic!("Expected InvalidImageDimensions, got {:?}", other),
        }
    }
}

#[test]
fn test_pages_tile_many_sizes() {
    let options = SliceOptions::default();
    let widths = [1, 2, 3, 7, 100, 210, 333, 999, 1000, 1080, 4096];
    let heights = [1, 2, 5, 141, 297, 1000, 1414, 1415, 2829, 3000, 10_000];

    for &w in &widths {
        for &h in &heights {
            let pages = paginate(w, h, &options).unwrap();
            assert_tiles(w, h, &pages);

            let page_height = pages[0].target_height;
            let ceil = (h as f64 / page_height).ceil() as usize;
            assert!(pages.len() <= ceil.max(1));
        }
    }
}

#[test]
fn test_panoramic_sizes_tile() {
    let options = SliceOptions::default();
    for (w, h) in [(9, 1), (401, 100), (5000, 1000), (20_000, 333), (12_345, 7)] {
        let pages = paginate(w, h, &options).unwrap();
        assert_tiles(w, h, &pages);
        assert!(pages[0].target_width < w as f64);
    }
}

#[test]
fn test_page_count_matches_ceil_for_whole_pixel_pages() {
    let options = SliceOptions::default();
    for (w, h) in [(1000, 3000), (1000, 500), (5000, 1000), (720, 5000), (1242, 8000)] {
        let pages = paginate(w, h, &options).unwrap();
        let expected = (h as f64 / pages[0].target_height).ceil() as usize;
        assert_eq!(pages.len(), expected, "{}x{}", w, h);
    }
}

#[test]
fn test_statistics() {
    let stats = calculate_statistics(1000, 3000, &SliceOptions::default()).unwrap();
    assert_eq!(stats.page_count, 3);
    assert_eq!(stats.last_page_rows, 171);
    assert!(!stats.panoramic);

    let stats = calculate_statistics(5000, 1000, &SliceOptions::default()).unwrap();
    assert_eq!(stats.page_count, 2);
    assert_eq!(stats.page_width_px, 500.0);
    assert!(stats.panoramic);

    assert!(calculate_statistics(0, 10, &SliceOptions::default()).is_err());
}
