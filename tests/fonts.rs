use std::path::PathBuf;

use icongen::Error;
use icongen::font::outline::OutlineFont;
use icongen::font::{Font, FontChoice, FontSource, load_with_fallback};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("icongen-fonts-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ── Fallback chain ────────────────────────────────────────────────────────────

#[test]
fn missing_named_fonts_fall_back_to_builtin() {
    let sources = [
        FontSource::new("/nonexistent/icongen/ヒラギノ角ゴシック W6.ttc"),
        FontSource::new("/nonexistent/icongen/Hiragino Sans GB.ttc"),
    ];
    let loaded = load_with_fallback(&sources, &[], 60.0);
    assert_eq!(loaded.choice, FontChoice::Builtin);
    assert!(matches!(loaded.font, Font::Bitmap(_)));
}

#[test]
fn empty_chain_uses_builtin() {
    let loaded = load_with_fallback(&[], &[], 20.0);
    assert_eq!(loaded.choice, FontChoice::Builtin);
}

#[test]
fn unparseable_font_file_is_skipped() {
    let dir = scratch_dir("garbage");
    let path = dir.join("broken.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();

    let loaded = load_with_fallback(&[FontSource::new(&path)], &[], 20.0);
    assert_eq!(loaded.choice, FontChoice::Builtin);
}

#[test]
fn builtin_fallback_honours_requested_size() {
    let loaded = load_with_fallback(&[], &[], 60.0);
    // 60 / 8 rounds to scale 8 → 64 px lines
    assert!((loaded.font.line_height() - 64.0).abs() < 1e-5);
    assert!((loaded.font.ascent() - 56.0).abs() < 1e-5);
    assert!((loaded.font.advance(None, 'A') - 48.0).abs() < 1e-5);
}

// ── Single-file loading ───────────────────────────────────────────────────────

#[test]
fn outline_load_reports_missing_path() {
    let path = PathBuf::from("/nonexistent/icongen/font.ttf");
    let err = OutlineFont::load(&path, 0, 12.0).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "{err:?}");
}

#[test]
fn outline_load_reports_parse_failure_with_face_index() {
    let dir = scratch_dir("parse");
    let path = dir.join("broken.ttc");
    std::fs::write(&path, [0u8; 64]).unwrap();

    match OutlineFont::load(&path, 3, 12.0) {
        Err(Error::FontParse { index, .. }) => assert_eq!(index, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}

// ── Font directory search ─────────────────────────────────────────────────────

#[test]
fn relative_source_is_found_under_font_dirs() {
    let dir = scratch_dir("search");
    let nested = dir.join("Supplemental/CJK");
    std::fs::create_dir_all(&nested).unwrap();
    let target = nested.join("Hiragino Sans GB.ttc");
    std::fs::write(&target, b"x").unwrap();

    let source = FontSource::new("Hiragino Sans GB.ttc");
    assert_eq!(source.resolve(&[dir.clone()]), Some(target));
    assert_eq!(source.resolve(&[]), None);
}

#[test]
fn absolute_missing_source_is_not_searched() {
    let dir = scratch_dir("absolute");
    std::fs::write(dir.join("a.ttf"), b"x").unwrap();
    let source = FontSource::new("/nonexistent/icongen/a.ttf");
    assert_eq!(source.resolve(&[dir]), None);
}

#[test]
fn font_source_index_defaults_to_zero() {
    let source: FontSource = serde_json::from_str(r#"{ "path": "a.ttc" }"#).unwrap();
    assert_eq!(source, FontSource::new("a.ttc"));
}
