use super::fonts::{FontCatalog, primary_family};
use super::frames::{FrameCatalog, FrameEntry, FrameKind};
use super::palettes::{DEFAULT_PALETTE, Palettes};

#[test]
fn frame_catalog_json_keeps_declaration_order() {
    let json = r#"{
        "zeta": { "type": "svg", "src": "frames/z.svg", "frameStyle": "solid" },
        "alpha": { "type": "raster", "src": "frames/a.png" },
        "mid": { "type": "image", "src": "frames/m.png" }
    }"#;
    let catalog = FrameCatalog::from_reader(json.as_bytes()).unwrap();

    assert_eq!(catalog.ids().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    assert_eq!(catalog.get("alpha").unwrap().kind, FrameKind::Raster);
    assert_eq!(catalog.get("mid").unwrap().kind, FrameKind::Raster);
    assert_eq!(
        catalog.get("zeta").unwrap().frame_style.as_deref(),
        Some("solid")
    );

    let out = serde_json::to_string(&catalog).unwrap();
    let zeta = out.find("zeta").unwrap();
    let alpha = out.find("alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn repeated_frame_id_replaces_in_place() {
    let catalog = FrameCatalog::from_entries([
        ("a", FrameEntry::svg("one.svg")),
        ("b", FrameEntry::svg("two.svg")),
        ("a", FrameEntry::raster("three.png")),
    ]);
    assert_eq!(catalog.ids().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(catalog.get("a").unwrap().src, "three.png");
}

#[test]
fn bad_catalog_json_is_a_serde_error() {
    let err = FrameCatalog::from_reader(r#"{"a": {"type": "gif"}}"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn builtin_catalog_lists_stock_frames() {
    let catalog = FrameCatalog::builtin();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.ids().next(), Some("opentowork2"));
    assert!(catalog.get("hiring").unwrap().keeps_drawn_colors());
    assert!(!catalog.get("opentowork").unwrap().keeps_drawn_colors());
    assert!(!FrameEntry::svg("x.svg").keeps_drawn_colors());
}

#[test]
fn font_imports_resolve_by_primary_family() {
    let fonts = FontCatalog::builtin();
    assert!(fonts.import_url("Inter, sans-serif").unwrap().contains("family=Inter"));
    assert!(fonts.import_url("'Hanken Grotesk', sans-serif").is_some());
    assert!(fonts.import_url("Georgia, serif").is_none());
    assert_eq!(primary_family("  Lato , sans-serif"), "Lato");
    assert_eq!(fonts.families.len(), 5);
}

#[test]
fn palettes_fall_back_to_frame_set() {
    let palettes = Palettes::builtin();
    let frame = palettes.get(DEFAULT_PALETTE).unwrap();
    assert_eq!(palettes.resolve(None), frame);
    assert_eq!(palettes.resolve(Some("nope")), frame);
    assert_eq!(palettes.resolve(Some("text"))[0], "#FFFFFF");

    let custom: Palettes = serde_json::from_str(r##"{"brand": ["#111", "#222"]}"##).unwrap();
    assert_eq!(custom.resolve(Some("brand")).len(), 2);
    assert!(custom.resolve(None).is_empty());
}
