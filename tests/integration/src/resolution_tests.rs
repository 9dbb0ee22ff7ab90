//! End-to-end component resolution against the fixture application

use panel_core::{ConfigLoader, Panel, Resolution, TypeCatalog};
use panel_fs::NormalizedPath;
use panel_manifest::RegistrationRequest;
use panel_test_utils::AppFixture;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn fixture_root() -> NormalizedPath {
    NormalizedPath::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../test-fixtures/apps/admin-demo"))
}

fn boot(root: NormalizedPath) -> Panel {
    let global = TempDir::new().unwrap();
    let config = ConfigLoader::with_global_config_dir(root, global.path().to_path_buf())
        .load()
        .unwrap();
    Panel::new(config, Arc::new(TypeCatalog::new())).unwrap()
}

#[test]
fn test_manifest_component_resolves_to_package_url() {
    let panel = boot(fixture_root());

    match panel.resolve_component("Cards/LineChart") {
        Resolution::Manifest {
            asset,
            url,
            package,
            priority,
            ..
        } => {
            assert_eq!(asset, "line-chart.js");
            assert_eq!(url, "/vendor/acme-charts/line-chart.js");
            assert_eq!(package, "acme/charts");
            assert_eq!(priority, 50);
        }
        other => panic!("expected manifest resolution, got {other:?}"),
    }
}

#[test]
fn test_detailed_descriptor_uses_file_key() {
    let panel = boot(fixture_root());

    let value = panel.resolve_component("Pages/Forecast").to_json();
    assert_eq!(value["type"], "manifest");
    assert_eq!(value["url"], "/vendor/acme-charts/forecast.js");
    assert_eq!(value["descriptor"]["preload"], true);
}

#[test]
fn test_deferred_manifest_entry_resolves_to_host_page() {
    let panel = boot(fixture_root());

    let resolution = panel.resolve_component("Pages/Reports");
    assert_eq!(resolution.kind(), "app");
    assert_eq!(resolution.import_path(), Some("@/Pages/Reports.vue"));
}

#[test]
fn test_nested_host_page() {
    let panel = boot(fixture_root());
    assert_eq!(
        panel.component_resolver().import_path("Pages/Admin/Users").as_deref(),
        Some("@/Pages/Admin/Users.vue")
    );
}

#[test]
fn test_bundled_page() {
    let panel = boot(fixture_root());

    let resolution = panel.resolve_component("Pages/Dashboard");
    assert_eq!(resolution.kind(), "package");
    assert!(
        resolution
            .path()
            .unwrap()
            .as_str()
            .ends_with("vendor/panel/resources/js/Pages/Dashboard.vue")
    );
}

#[test]
fn test_missing_custom_page_lists_existing_ones() {
    let panel = boot(fixture_root());

    match panel.resolve_component("Pages/Missing") {
        Resolution::Fallback {
            expected_path,
            suggestions,
            ..
        } => {
            assert!(expected_path.as_str().ends_with("resources/js/Pages/Missing.vue"));
            let listing = suggestions.last().unwrap();
            assert!(listing.contains("Pages/Admin/Users"));
            assert!(listing.contains("Pages/Reports"));
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[test]
fn test_higher_priority_package_overrides_component() {
    let app = AppFixture::new();
    app.write_manifest("public/a/manifest.json", &json!({ "Pages/Chart": "a.js" }));
    app.write_manifest("public/b/manifest.json", &json!({ "Pages/Chart": "b.js" }));
    app.touch_all(&["resources/js/Pages/Chart.vue"]);
    let panel = boot(NormalizedPath::new(app.root()));

    panel
        .register_manifest(RegistrationRequest::new("pkg-a", "/a/manifest.json").with_priority(200))
        .unwrap();
    panel
        .register_manifest(RegistrationRequest::new("pkg-b", "/b/manifest.json").with_priority(10))
        .unwrap();

    match panel.resolve_component("Pages/Chart") {
        Resolution::Manifest { package, asset, .. } => {
            assert_eq!(package, "pkg-b");
            assert_eq!(asset, "b.js");
        }
        other => panic!("expected manifest resolution, got {other:?}"),
    }

    // Both packages remain visible under their own namespace.
    let aggregate = panel.aggregated_manifest();
    assert!(aggregate.get("pkg-a").unwrap().components.contains("Pages/Chart"));

    panel.unregister_manifest("pkg-b");
    panel.unregister_manifest("pkg-a");
    assert_eq!(panel.resolve_component("Pages/Chart").kind(), "app");
}

#[test]
fn test_manifest_edits_visible_after_refresh() {
    let app = AppFixture::new();
    app.write_manifest("vendor/acme/manifest.json", &json!({ "Widgets/Gauge": "gauge.js" }));
    let panel = boot(NormalizedPath::new(app.root()));
    panel
        .register_manifest(RegistrationRequest::new("acme", "vendor/acme/manifest.json"))
        .unwrap();

    assert_eq!(panel.resolve_component("Widgets/Gauge").kind(), "manifest");

    app.write_manifest("vendor/acme/manifest.json", &json!({ "Widgets/Dial": "dial.js" }));
    assert_eq!(panel.resolve_component("Widgets/Dial").kind(), "package");

    panel.manifest_registry().refresh();
    assert_eq!(panel.resolve_component("Widgets/Dial").kind(), "manifest");
    assert_eq!(panel.resolve_component("Widgets/Gauge").kind(), "package");
}
