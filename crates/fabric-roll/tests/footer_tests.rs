use fabric_roll::footer::*;
use fabric_roll::raster::RasterXObject;
use fabric_roll::render::{TiledPage, render_tiled_page};
use fabric_roll::*;
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;
use tempfile::TempDir;

fn write_footer_pdf(path: &Path, width: i64, height: i64) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        b"0.5 g 0 0 10 10 re f".to_vec(),
    ));
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width),
                Object::Integer(height),
            ]),
        ),
        ("Resources", Object::Dictionary(Dictionary::new())),
        ("Contents", Object::Reference(content_id)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc.save(path).unwrap();
}

fn test_page(template: Template) -> TiledPage {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        8,
        4,
        image::Rgb([40, 120, 200]),
    ));
    let raster = RasterXObject::from_image(&image).unwrap();
    let tiles = compute_tile_set(template, 2.0, 6, OverflowPolicy::Bleed).unwrap();
    render_tiled_page(&tiles, template, &raster).unwrap()
}

fn fields(pattern_name: &str) -> FooterFields {
    FooterFields {
        pattern_name: pattern_name.to_string(),
        roll_width: "30'".to_string(),
        roll_length: "6'".to_string(),
    }
}

fn page_content(page: &TiledPage) -> Vec<u8> {
    page.document.get_page_content(page.page_id).unwrap()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn config_in(dir: &TempDir) -> RollConfig {
    RollConfig::with_base_dir(dir.path().join("base"))
}

fn create_layout(config: &RollConfig) {
    for dir in [&config.base_dir, &config.templates_dir, &config.scripts_dir] {
        std::fs::create_dir_all(dir).unwrap();
    }
}

// =============================================================================
// Locating
// =============================================================================

#[test]
fn test_search_order() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let paths = footer_search_paths(&config);

    assert_eq!(
        paths,
        vec![
            config.scripts_dir.join("Footer.pdf"),
            config.templates_dir.join("Footer.pdf"),
            config.base_dir.join("Footer.pdf"),
            config.scripts_dir.join("footer.pdf"),
            config.templates_dir.join("footer.pdf"),
            config.base_dir.join("footer.pdf"),
        ]
    );
    assert_eq!(paths[0], config.primary_footer_path());
}

#[test]
fn test_only_base_folder_footer_is_found() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    create_layout(&config);

    let base_footer = config.base_dir.join("Footer.pdf");
    write_footer_pdf(&base_footer, 612, 100);

    assert_eq!(locate_footer(&config), FooterSource::File(base_footer));
}

#[test]
fn test_primary_footer_wins() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    create_layout(&config);

    write_footer_pdf(&config.base_dir.join("Footer.pdf"), 612, 100);
    write_footer_pdf(&config.primary_footer_path(), 612, 100);

    assert_eq!(
        locate_footer(&config),
        FooterSource::File(config.primary_footer_path())
    );
}

#[test]
fn test_templates_folder_before_base_folder() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    create_layout(&config);

    let templates_footer = config.templates_dir.join("Footer.pdf");
    write_footer_pdf(&templates_footer, 612, 100);
    write_footer_pdf(&config.base_dir.join("Footer.pdf"), 612, 100);

    assert_eq!(locate_footer(&config), FooterSource::File(templates_footer));
}

#[test]
fn test_missing_footer_falls_back_to_synthetic() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    create_layout(&config);

    assert_eq!(locate_footer(&config), FooterSource::Synthetic);
}

// =============================================================================
// Assets
// =============================================================================

#[test]
fn test_footer_height_scaling() {
    assert_eq!(footer_height(1000.0, 250.0, 2000.0), 500.0);
    let h = footer_height(612.0, 100.0, 2171.53);
    assert!((h - 100.0 / 612.0 * 2171.53).abs() < 1e-9);
}

#[test]
fn test_load_pdf_footer_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Footer.pdf");
    write_footer_pdf(&path, 612, 100);

    let asset = FooterAsset::load(&path).unwrap();
    assert_eq!(asset.size(), (612.0, 100.0));
}

#[test]
fn test_load_raster_footer_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("footer.png");
    image::RgbImage::from_pixel(300, 30, image::Rgb([250, 250, 250]))
        .save(&path)
        .unwrap();

    let asset = FooterAsset::load(&path).unwrap();
    assert_eq!(asset.size(), (300.0, 30.0));
}

#[test]
fn test_empty_footer_pdf_is_rejected() {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![])),
        ("Count", Object::Integer(0)),
    ]));
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    assert!(matches!(
        FooterAsset::from_document(doc),
        Err(RollError::Footer(_))
    ));
}

#[test]
fn test_synthetic_footer_is_fixed_height() {
    let asset = FooterAsset::synthetic(2171.53, &FooterBranding::default()).unwrap();
    assert_eq!(asset.size(), (2171.53, 100.0));
}

#[test]
fn test_synthetic_band_is_exactly_100pt_on_both_rolls() {
    // Widths with a fractional part must not be rounded to whole points
    for roll in [RollTemplate::six_foot(), RollTemplate::fifteen_foot()] {
        let width = roll.template.width;
        let asset = FooterAsset::synthetic(width, &FooterBranding::default()).unwrap();
        let (fw, fh) = asset.size();
        assert!((footer_height(fw, fh, width) - 100.0).abs() < 1e-9);
    }
}

#[test]
fn test_simple_footer_is_a_one_page_pdf() {
    let bytes = generate_simple_footer(800.0, 100.0, &FooterBranding::default()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_simple_footer_rejects_empty_size() {
    assert!(generate_simple_footer(0.0, 100.0, &FooterBranding::default()).is_err());
}

// =============================================================================
// Compositing
// =============================================================================

#[test]
fn test_compose_with_synthetic_footer() {
    let template = RollTemplate::six_foot().template;
    let mut page = test_page(template);
    let asset = FooterAsset::synthetic(template.width, &FooterBranding::default()).unwrap();

    let report =
        compose_footer(&mut page, &asset, &fields("roses"), &TextStyle::default()).unwrap();

    assert!((report.footer_height - 100.0).abs() < 1e-9);
    assert_eq!(report.text, TextOutcome::Placed(TextScheme::FooterRelative));

    // Baselines sit at the fixed offsets below a 100pt band
    let top = template.height - 100.0;
    assert!((report.fields[0].position.1 - (top + 22.0)).abs() < 1e-9);
    assert!((report.fields[2].position.1 - (top + 55.0)).abs() < 1e-9);
    assert_eq!(report.fields.len(), 3);

    let content = page_content(&page);
    assert!(contains(&content, b"q 1 0 0 1 0 0 cm /Footer Do Q"));
    assert!(contains(&content, b"(roses)"));
    assert!(contains(&content, b"(30')"));
    assert!(contains(&content, b"(6')"));
}

#[test]
fn test_primary_text_positions() {
    let template = Template::new(2171.53, 5285.94);
    let band = 177.0;
    let placed = place_fields(TextScheme::FooterRelative, &fields("roses"), template, band).unwrap();

    let top = template.height - band;
    assert_eq!(placed[0].label, FieldLabel::PatternName);
    assert_eq!(placed[0].position, (template.width - 160.0, top + 22.0));
    assert_eq!(placed[1].label, FieldLabel::RollWidth);
    assert_eq!(placed[1].position, (template.width - 135.0, top + 37.0));
    assert_eq!(placed[2].label, FieldLabel::RollLength);
    assert_eq!(placed[2].position, (template.width - 135.0, top + 55.0));
}

#[test]
fn test_alternate_text_positions() {
    let template = Template::new(600.0, 800.0);
    let placed = place_fields(TextScheme::PageBottom, &fields("roses"), template, 40.0).unwrap();

    assert_eq!(placed[0].position, (440.0, 722.0));
    assert_eq!(placed[1].position, (465.0, 742.0));
    assert_eq!(placed[2].position, (465.0, 762.0));
}

#[test]
fn test_short_footer_uses_alternate_scheme() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Footer.pdf");
    // 600pt template: band = 20 / 600 * 600 = 20pt, too short for the 55pt offset
    write_footer_pdf(&path, 600, 20);

    let mut page = test_page(Template::new(600.0, 800.0));
    let asset = FooterAsset::load(&path).unwrap();
    let report =
        compose_footer(&mut page, &asset, &fields("roses"), &TextStyle::default()).unwrap();

    assert_eq!(report.text, TextOutcome::Placed(TextScheme::PageBottom));
    assert!(contains(&page_content(&page), b"(roses)"));
}

#[test]
fn test_unencodable_text_is_omitted() {
    let mut page = test_page(Template::new(600.0, 800.0));
    let asset = FooterAsset::synthetic(600.0, &FooterBranding::default()).unwrap();

    let report =
        compose_footer(&mut page, &asset, &fields("花柄"), &TextStyle::default()).unwrap();

    assert_eq!(
        report.text,
        TextOutcome::Omitted(TextError::UnsupportedCharacter('花'))
    );
    assert!(report.fields.is_empty());

    let content = page_content(&page);
    assert!(contains(&content, b"/Footer Do"));
    assert!(!contains(&content, b"(30')"));
}

#[test]
fn test_latin1_text_is_accepted() {
    let placed = place_fields(
        TextScheme::FooterRelative,
        &fields("Café Floral"),
        Template::new(600.0, 800.0),
        100.0,
    );
    assert!(placed.is_ok());
}

#[test]
fn test_raster_footer_band_spans_page() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("footer.png");
    image::RgbImage::from_pixel(300, 60, image::Rgb([250, 250, 250]))
        .save(&path)
        .unwrap();

    let mut page = test_page(Template::new(600.0, 800.0));
    let asset = FooterAsset::load(&path).unwrap();
    let report =
        compose_footer(&mut page, &asset, &fields("roses"), &TextStyle::default()).unwrap();

    assert!((report.footer_height - 120.0).abs() < 1e-9);
    assert!(contains(&page_content(&page), b"600 0 0 120 0 0 cm /Footer Do"));
}
