use fabric_roll::*;

const ASPECT_RATIOS: [f64; 6] = [0.25, 0.5, 1.0, 4.0 / 3.0, 2.0, 3.7];

fn roll_templates() -> Vec<Template> {
    vec![
        RollTemplate::six_foot().template,
        RollTemplate::fifteen_foot().template,
        Template::new(100.0, 260.0),
    ]
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_six_foot_two_to_one_scenario() {
    let template = RollTemplate::six_foot().template;
    let tiles = compute_tile_set(template, 2.0, 6, OverflowPolicy::Bleed).unwrap();

    assert!((tiles.tile_width - 361.92).abs() < 0.01);
    assert!((tiles.tile_height - 180.96).abs() < 0.01);
    assert_eq!(tiles.rows, 30);
    assert_eq!(tiles.columns, 6);
    assert_eq!(tiles.len(), 180);
}

#[test]
fn test_rows_span_template_width() {
    for template in roll_templates() {
        for ratio in ASPECT_RATIOS {
            let tiles = compute_tile_set(template, ratio, 6, OverflowPolicy::Bleed).unwrap();

            for row in 0..tiles.rows {
                let row_tiles = tiles.row(row);
                assert_eq!(row_tiles.len(), 6);

                let span: f64 = row_tiles.iter().map(|t| t.width).sum();
                assert!(close(span, template.width), "span {} vs {}", span, template.width);
                assert_eq!(row_tiles[0].x, 0.0);
                assert!(close(row_tiles[5].right(), template.width));
            }
        }
    }
}

#[test]
fn test_tiles_preserve_aspect_ratio() {
    for template in roll_templates() {
        for ratio in ASPECT_RATIOS {
            let tiles = compute_tile_set(template, ratio, 6, OverflowPolicy::Bleed).unwrap();
            for tile in &tiles.tiles {
                assert!(close(tile.width / tile.height, ratio));
            }
        }
    }
}

#[test]
fn test_row_count_covers_template() {
    for template in roll_templates() {
        for ratio in ASPECT_RATIOS {
            let tiles = compute_tile_set(template, ratio, 6, OverflowPolicy::Bleed).unwrap();
            let expected = (template.height / tiles.tile_height).ceil() as usize;
            assert_eq!(tiles.rows, expected);

            let last = tiles.tiles.last().unwrap();
            assert!(last.y < template.height);
            assert!(last.bottom() >= template.height - 1e-9);
        }
    }
}

#[test]
fn test_tiles_are_row_major() {
    let tiles = compute_tile_set(Template::new(300.0, 500.0), 1.5, 3, OverflowPolicy::Bleed).unwrap();

    for pair in tiles.tiles.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(b.y > a.y || (b.y == a.y && b.x > a.x));
    }
}

#[test]
fn test_compute_is_deterministic() {
    let template = RollTemplate::fifteen_foot().template;
    let first = compute_tile_set(template, 1.37, 6, OverflowPolicy::Bleed).unwrap();
    let second = compute_tile_set(template, 1.37, 6, OverflowPolicy::Bleed).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_bleed_keeps_full_last_row() {
    // 2 columns of 50pt, tiles 25pt high: 11 rows, last starts at y=250
    let tiles = compute_tile_set(Template::new(100.0, 260.0), 2.0, 2, OverflowPolicy::Bleed).unwrap();

    assert_eq!(tiles.rows, 11);
    let last_row = tiles.row(10);
    assert_eq!(last_row[0].y, 250.0);
    assert_eq!(last_row[0].height, 25.0);
    assert!(!tiles.is_truncated(&last_row[0]));
}

#[test]
fn test_clip_truncates_last_row() {
    let tiles = compute_tile_set(Template::new(100.0, 260.0), 2.0, 2, OverflowPolicy::Clip).unwrap();

    assert_eq!(tiles.rows, 11);
    for tile in tiles.row(10) {
        assert_eq!(tile.y, 250.0);
        assert!(close(tile.height, 10.0));
        assert!(tiles.is_truncated(tile));
    }
    // Earlier rows are untouched
    assert_eq!(tiles.row(9)[0].height, 25.0);
}

#[test]
fn test_exact_fit_has_no_partial_row() {
    let tiles = compute_tile_set(Template::new(100.0, 250.0), 2.0, 2, OverflowPolicy::Clip).unwrap();
    assert_eq!(tiles.rows, 10);
    assert!(tiles.tiles.iter().all(|t| !tiles.is_truncated(t)));
}

#[test]
fn test_single_repeat() {
    let tiles = compute_tile_set(Template::new(200.0, 300.0), 1.0, 1, OverflowPolicy::Bleed).unwrap();
    assert_eq!(tiles.columns, 1);
    assert_eq!(tiles.rows, 2);
    assert_eq!(tiles.tiles[0], Rect::new(0.0, 0.0, 200.0, 200.0));
    assert_eq!(tiles.tiles[1], Rect::new(0.0, 200.0, 200.0, 200.0));
}

#[test]
fn test_rejects_invalid_inputs() {
    let template = Template::new(100.0, 100.0);

    assert!(matches!(
        compute_tile_set(Template::new(0.0, 100.0), 1.0, 6, OverflowPolicy::Bleed),
        Err(RollError::InvalidGeometry(_))
    ));
    assert!(matches!(
        compute_tile_set(Template::new(100.0, -5.0), 1.0, 6, OverflowPolicy::Bleed),
        Err(RollError::InvalidGeometry(_))
    ));
    assert!(matches!(
        compute_tile_set(template, 0.0, 6, OverflowPolicy::Bleed),
        Err(RollError::InvalidGeometry(_))
    ));
    assert!(matches!(
        compute_tile_set(template, f64::NAN, 6, OverflowPolicy::Bleed),
        Err(RollError::InvalidGeometry(_))
    ));
    assert!(matches!(
        compute_tile_set(template, 1.0, 0, OverflowPolicy::Bleed),
        Err(RollError::InvalidGeometry(_))
    ));
}

#[test]
fn test_aspect_ratio_of_pixels() {
    assert_eq!(fabric_roll::layout::aspect_ratio_of(400, 200).unwrap(), 2.0);
    assert!(fabric_roll::layout::aspect_ratio_of(0, 200).is_err());
}

#[test]
fn test_rect_pdf_coordinates() {
    let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(rect.right(), 40.0);
    assert_eq!(rect.bottom(), 60.0);
    assert_eq!(rect.pdf_y(100.0), 40.0);
}
