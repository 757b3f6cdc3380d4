//! Unit tests for rb-persist.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::format::{FORMAT, VERSION, decode, encode};
use crate::{GeometryLayout, GeometryStore, HasGeometry, LoadError, Rect, SaveError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Stand-in for a real window.
#[derive(Debug, PartialEq)]
struct FakeWindow {
    prefix: &'static str,
    rect:   Rect,
}

impl FakeWindow {
    fn new(prefix: &'static str, rect: Rect) -> Self {
        Self { prefix, rect }
    }
}

impl HasGeometry for FakeWindow {
    fn prefix(&self) -> &str {
        self.prefix
    }

    fn geometry(&self) -> Rect {
        self.rect
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn sample_layout() -> GeometryLayout {
    [
        ("log", Rect::new(10, 10, 300, 800)),
        ("coordinate", Rect::new(320, 10, 240, 120)),
    ]
    .into_iter()
    .collect()
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use super::*;

    #[test]
    fn capture_reads_every_window() {
        let windows = [
            FakeWindow::new("log", Rect::new(1, 2, 3, 4)),
            FakeWindow::new("coordinate", Rect::new(5, 6, 7, 8)),
        ];
        let layout = GeometryLayout::capture(&windows);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get("log"), Some(Rect::new(1, 2, 3, 4)));
        assert_eq!(layout.get("coordinate"), Some(Rect::new(5, 6, 7, 8)));
    }

    #[test]
    fn apply_matches_by_prefix() {
        let layout = sample_layout();
        let mut windows = [
            FakeWindow::new("log", Rect::default()),
            FakeWindow::new("game", Rect::new(0, 0, 640, 480)),
        ];

        assert_eq!(layout.apply(&mut windows), 1);
        assert_eq!(windows[0].rect, Rect::new(10, 10, 300, 800));
        assert_eq!(windows[1].rect, Rect::new(0, 0, 640, 480));
    }

    #[test]
    fn update_keeps_records_without_a_live_window() {
        let mut layout = sample_layout();
        layout.update_from(&[FakeWindow::new("log", Rect::new(0, 0, 1, 1))]);
        assert_eq!(layout.get("log"), Some(Rect::new(0, 0, 1, 1)));
        assert_eq!(layout.get("coordinate"), Some(Rect::new(320, 10, 240, 120)));
    }

    #[test]
    fn works_through_trait_objects() {
        let mut windows: Vec<Box<dyn HasGeometry>> =
            vec![Box::new(FakeWindow::new("log", Rect::default()))];
        let applied = sample_layout().apply(windows.iter_mut().map(|w| w.as_mut()));
        assert_eq!(applied, 1);

        let layout = GeometryLayout::capture(windows.iter().map(|w| w.as_ref()));
        assert_eq!(layout.get("log"), Some(Rect::new(10, 10, 300, 800)));
    }

    #[test]
    fn iter_is_in_prefix_order() {
        let prefixes: Vec<_> = sample_layout().iter().map(|(p, _)| p.to_owned()).collect();
        assert_eq!(prefixes, ["coordinate", "log"]);
    }
}

// ── Format ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod format {
    use super::*;

    #[test]
    fn envelope_is_self_describing() {
        let bytes = encode(&sample_layout()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["format"], FORMAT);
        assert_eq!(value["version"], VERSION);
        assert_eq!(value["windows"]["log"]["width"], 300);
    }

    #[test]
    fn missing_windows_is_an_empty_layout() {
        let layout = decode(br#"{"format":"robots.window-geometry","version":1}"#).unwrap();
        assert!(layout.is_empty());
    }

    #[test]
    fn foreign_json_is_rejected() {
        let err = decode(br#"{"name":"some other app","windows":{}}"#).unwrap_err();
        assert!(matches!(err, LoadError::ForeignFormat { found: None }));

        let err = decode(br#"{"format":"something.else","version":1}"#).unwrap_err();
        assert!(matches!(err, LoadError::ForeignFormat { found: Some(f) } if f == "something.else"));
    }

    #[test]
    fn future_version_is_rejected() {
        let err = decode(br#"{"format":"robots.window-geometry","version":2,"windows":{}}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedVersion { found: 2, supported: 1 }));
    }

    #[test]
    fn negative_size_is_rejected() {
        let json = br#"{"format":"robots.window-geometry","version":1,
            "windows":{"log":{"x":0,"y":0,"width":-5,"height":10}}}"#;
        let err = decode(json).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { ref prefix, .. } if prefix == "log"));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(decode(b"\x00\x01binary"), Err(LoadError::Malformed(_))));
        assert!(matches!(decode(b"{\"format\":"), Err(LoadError::Malformed(_))));

        let missing_field = br#"{"format":"robots.window-geometry","version":1,
            "windows":{"log":{"x":0,"y":0}}}"#;
        assert!(matches!(decode(missing_field), Err(LoadError::Malformed(_))));
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tmp();
        let store = GeometryStore::in_home(dir.path());
        let layout = sample_layout();

        store.save(&layout).unwrap();
        assert_eq!(store.load().unwrap(), layout);
    }

    #[test]
    fn save_creates_the_config_directory() {
        let dir = tmp();
        let store = GeometryStore::in_home(dir.path());
        assert_eq!(
            store.path(),
            dir.path().join("Robots").join("config").join("window-geometry.json")
        );

        store.save(&GeometryLayout::new()).unwrap();
        assert!(store.path().is_file());
    }

    #[test]
    fn save_replaces_the_whole_file() {
        let dir = tmp();
        let store = GeometryStore::in_home(dir.path());
        store.save(&sample_layout()).unwrap();

        let smaller: GeometryLayout = [("log", Rect::new(1, 1, 1, 1))].into_iter().collect();
        store.save(&smaller).unwrap();
        assert_eq!(store.load().unwrap(), smaller);
    }

    #[test]
    fn save_leaves_no_temporary_files() {
        let dir = tmp();
        let store = GeometryStore::new(dir.path().join("layout.json"));
        store.save(&sample_layout()).unwrap();
        store.save(&GeometryLayout::new()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["layout.json"]);
    }

    #[test]
    fn failed_save_keeps_the_previous_file() {
        let dir = tmp();
        let store = GeometryStore::new(dir.path().join("layout.json"));
        store.save(&sample_layout()).unwrap();

        // A non-empty directory at the target makes the final rename fail.
        let target = dir.path().join("busy");
        fs::create_dir(&target).unwrap();
        write(&target.join("keep"), "x");
        let err = GeometryStore::new(&target).save(&GeometryLayout::new()).unwrap_err();
        assert!(matches!(err, SaveError::Write { .. }));

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["busy", "layout.json"]);
        assert_eq!(store.load().unwrap(), sample_layout());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tmp();
        let err = GeometryStore::in_home(dir.path()).load().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn corrupt_file_fails_to_load() {
        let dir = tmp();
        let store = GeometryStore::in_home(dir.path());
        write(store.path(), "not json at all");

        let err = store.load().unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn directory_in_place_of_file_fails_to_load() {
        let dir = tmp();
        let store = GeometryStore::new(dir.path());
        assert!(matches!(store.load(), Err(LoadError::Read { .. })));
    }

    #[test]
    fn unwritable_parent_fails_to_save() {
        let dir = tmp();
        let blocker = dir.path().join("Robots");
        fs::write(&blocker, "a file where a directory should be").unwrap();

        let err = GeometryStore::in_home(dir.path()).save(&sample_layout()).unwrap_err();
        assert!(matches!(err, SaveError::CreateDir { .. }));
    }

    #[test]
    fn bare_file_name_saves_in_place() {
        let dir = tmp();
        let store = GeometryStore::new(dir.path().join("layout.json"));
        store.save(&sample_layout()).unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
