// Integration tests for Mobidex
use mobidex::prelude::*;
use mobidex::{limit, MatchKind};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

const DATASET: &str = "\
brand ,model,RAM_GB,battery_mAh,primary_camera_MP,weight_g,OS,Chipset,approx_price_EUR, img_url
Acme,One Pro,8,4000,48,180,Android,Snapdragon 8,499,a.png
Acme,One,8,4500,50,190,Android,Snapdragon 8,399,b.png
Zeta,Fold Pro,12,4400,50,250,Android,Dimensity 9000,1299,
Beta,Max,6,3300,12,200,iOS,A17,1099,max.png
Acme,,4,3000,13,170,Android,Helio G85,149,budget.png
";

const MODEL: &str = r#"{
    "feature_names": ["brand", "RAM_GB", "battery_mAh", "primary_camera_MP", "weight_g", "OS", "Chipset"],
    "coefficients": [10.0, 40.0, 0.01, 1.0, 0.5, 100.0, 5.0],
    "intercept": 20.0
}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn open_workspace(dir: &Path, with_model: bool) -> Workspace {
    let dataset = write_file(dir, "devices.csv", DATASET);
    let mut config = WorkspaceConfig::new(dataset);
    if with_model {
        config = config.with_model(write_file(dir, "model.json", MODEL));
    }
    Workspace::open(config).unwrap()
}

#[test]
fn test_workspace_loads_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), false);

    assert_eq!(workspace.catalog().len(), 5);
    assert!(workspace.model().is_none());
    assert_eq!(
        workspace.store().brand_options().unwrap(),
        vec![ALL_BRANDS, "Acme", "Beta", "Zeta"]
    );
}

#[test]
fn test_browse_flow() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), false);
    let store = workspace.store();

    let everything = store.browse(&BrowseQuery::default());
    assert_eq!(everything.total, 5);

    let page = store.browse(&BrowseQuery {
        brand: Some("Acme".to_string()),
        search: "PRO".to_string(),
        limit: None,
    });
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0].display_name(), "Acme One Pro");

    // the nameless Acme row never matches a non-empty search
    let page = store.browse(&BrowseQuery {
        brand: Some("Acme".to_string()),
        search: "o".to_string(),
        limit: Some(1),
    });
    assert_eq!(page.total, 2);
    assert_eq!(page.records.len(), 1);
}

#[test]
fn test_brand_filter_exactness() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), false);
    let store = workspace.store();

    for brand in store.distinct_values("brand").unwrap() {
        let selection = store.filter_by_brand(&brand);
        let expected: Vec<&DeviceRecord> =
            workspace.catalog().iter().filter(|r| r.brand == brand).collect();
        assert_eq!(selection.records(), expected.as_slice());
    }

    assert_eq!(store.filter_by_brand(ALL_BRANDS).len(), workspace.catalog().len());
}

#[test]
fn test_filters_narrow_monotonically() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), false);
    let store = workspace.store();

    for needle in ["", "o", "pro", "max", "nothing"] {
        let by_brand = store.filter_by_brand("Acme");
        let narrowed = by_brand.clone().name_contains(needle);
        assert!(narrowed.len() <= by_brand.len());

        // subsequence check
        let mut rest = by_brand.iter();
        for record in narrowed.iter() {
            assert!(rest.any(|candidate| std::ptr::eq(candidate, record)));
        }
    }

    assert_eq!(limit(store.all(), 2).len(), 2);
}

#[test]
fn test_unknown_field_reported() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), false);

    assert!(matches!(
        workspace.store().distinct_values("display"),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        workspace.encoder().encode("display", "OLED"),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_encoding_stays_independent_of_catalog_listing() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), false);
    let encoder = workspace.encoder();

    let existing: Vec<u32> = ["Acme", "Beta", "Zeta"]
        .iter()
        .map(|b| encoder.encode("brand", b).unwrap())
        .collect();
    assert_eq!(existing, vec![0, 1, 2]);

    let fresh = encoder.encode("brand", "Nokia").unwrap();
    assert!(existing.iter().all(|&code| fresh > code));
    assert_eq!(encoder.encode("brand", "Nokia").unwrap(), fresh);
    assert_eq!(encoder.decode("brand", fresh).unwrap(), "Nokia");
    assert!(matches!(encoder.decode("brand", 99), Err(Error::UnknownCode { .. })));

    assert_eq!(
        workspace.store().distinct_values("brand").unwrap(),
        vec!["Acme", "Beta", "Zeta"]
    );
}

#[test]
fn test_predict_with_model() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), true);

    let input = PredictionInput {
        brand: "Beta".to_string(),
        specs: SpecVector::new(6.0, 3300.0, 12.0, 200.0),
        os: "iOS".to_string(),
        chipset: "A17".to_string(),
    };

    // brand Beta=1, OS iOS=1, chipset A17=0
    let expected = 20.0 + 10.0 * 1.0 + 40.0 * 6.0 + 0.01 * 3300.0 + 12.0 + 0.5 * 200.0 + 100.0 * 1.0;
    let price = workspace.predict(&input).unwrap();
    assert!((price - expected).abs() < 1e-9);

    let outcome = workspace.illustrate(&input).unwrap();
    assert!(matches!(outcome, MatchOutcome::Exact { .. }));
    assert_eq!(outcome.image_or(workspace.placeholder_image()), "max.png");
}

#[test]
fn test_worked_example_from_two_acme_rows() {
    let catalog = Catalog::new(vec![
        DeviceRecord::new("Acme", "A")
            .with_specs(SpecVector::new(8.0, 4000.0, 48.0, 180.0))
            .with_image("a.png"),
        DeviceRecord::new("Acme", "B")
            .with_specs(SpecVector::new(8.0, 4500.0, 50.0, 190.0))
            .with_image("b.png"),
    ]);
    let engine = MatchEngine::new(Arc::new(catalog));

    // battery 4300: row A is 0.3 + 0.1 + 0.1 away, row B 0.2 + 0.1 + 0.1
    let query = MatchQuery::new(SpecVector::new(8.0, 4300.0, 49.0, 185.0)).with_brand("Acme");
    let outcome = engine.find(&query).unwrap();
    assert_eq!(outcome.image_or("none"), "b.png");
    assert!((outcome.distance().unwrap() - 0.4).abs() < 1e-9);

    // battery 4250 puts both rows at 0.45, the first one wins
    let query = MatchQuery::new(SpecVector::new(8.0, 4250.0, 49.0, 185.0)).with_brand("Acme");
    let outcome = engine.find(&query).unwrap();
    assert_eq!(outcome.image_or("none"), "a.png");
}

#[test]
fn test_match_skips_rows_without_images() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = open_workspace(dir.path(), false);

    // exact specs of the Zeta row, which has no image
    let query = MatchQuery::new(SpecVector::new(12.0, 4400.0, 50.0, 250.0)).with_brand("Zeta");
    let outcome = workspace.engine().find(&query).unwrap();
    assert_eq!(outcome, MatchOutcome::NoMatch);

    let explained = ExplainedMatch::from_outcome(&outcome, &query, workspace.placeholder_image());
    assert_eq!(explained.kind, MatchKind::None);
    assert_eq!(explained.image, workspace.placeholder_image());

    // unconstrained, the nearest imaged device is the Acme One (4 + 0.1 + 0 + 1.2)
    let query = MatchQuery::new(SpecVector::new(12.0, 4400.0, 50.0, 250.0));
    let outcome = workspace.engine().find(&query).unwrap();
    assert_eq!(outcome.image_or("none"), "b.png");
}

#[test]
fn test_empty_catalog() {
    let workspace = Workspace::from_parts(Catalog::default(), None, CatalogConfig::default());

    assert!(workspace.store().distinct_values("brand").unwrap().is_empty());
    assert!(workspace.store().filter_by_brand("Acme").is_empty());
    assert!(workspace.store().filter_by_name_contains("one").is_empty());
    assert_eq!(workspace.store().browse(&BrowseQuery::default()).total, 0);

    let query = MatchQuery::new(SpecVector::new(8.0, 4000.0, 48.0, 180.0));
    assert_eq!(workspace.engine().find(&query).unwrap(), MatchOutcome::NoMatch);
}

#[test]
fn test_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = Arc::new(open_workspace(dir.path(), false));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let workspace = workspace.clone();
            std::thread::spawn(move || {
                let code = workspace.encoder().encode("Chipset", "Tensor G3").unwrap();
                let count = workspace.store().filter_by_brand("Acme").len();
                let query = MatchQuery::new(SpecVector::new(8.0, 4000.0 + i as f64, 48.0, 180.0));
                let found = workspace.engine().find(&query).unwrap().is_match();
                (code, count, found)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(|r| *r == results[0]));
    assert_eq!(results[0].1, 3);
    assert!(results[0].2);
}

#[test]
fn test_bad_dataset_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_file(dir.path(), "broken.csv", "brand,model\nAcme,One\n");

    let result = Workspace::open(WorkspaceConfig::new(dataset));
    assert!(matches!(result, Err(Error::Initialization(_))));
}
