use std::fs;

use socialshield::{
    CatalogConfig, CellValue, DatasetCatalog, Inference, LoadError, MissingPolicy,
};

fn dataset_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("scams.csv"),
        "id,type,loss_usd\n0,phishing,120.50\n1,lottery,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("BiNetwork50.json"),
        r#"{"0": {"friends": ["1"]}, "1": {"friends": ["0"]}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("UniNetwork150.json"),
        r#"{"81": {"follows": ["12", "45"]}}"#,
    )
    .unwrap();
    dir
}

#[test]
fn default_layout_loads_every_dataset() {
    let dir = dataset_dir();
    let catalog = DatasetCatalog::new(dir.path());

    let scams = catalog.load_scams().unwrap().expect("scams.csv present");
    assert_eq!(scams.len(), 2);

    let names: Vec<String> = catalog.network_names().map(String::from).collect();
    for name in &names {
        let graph = catalog.load_network(name).unwrap();
        assert!(graph.is_some(), "{name} should load");
    }
    let uni = catalog.load_network("UniNetwork150").unwrap().unwrap();
    assert!(uni.contains("81"));
}

#[test]
fn missing_default_scams_file_returns_absent() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = DatasetCatalog::new(dir.path());
    assert!(catalog.load_scams().unwrap().is_none());
}

#[test]
fn propagate_policy_surfaces_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = DatasetCatalog::from_config(CatalogConfig {
        on_missing: MissingPolicy::Propagate,
        ..CatalogConfig::with_base_dir(dir.path())
    });
    let err = catalog.load_scams().unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), format!("{} not found", dir.path().join("scams.csv").display()));
}

#[test]
fn format_errors_are_never_swallowed() {
    let dir = dataset_dir();
    fs::write(dir.path().join("broken.json"), "{\"1\": ").unwrap();
    let catalog = DatasetCatalog::new(dir.path());
    assert!(matches!(
        catalog.load_network_from("Broken", "broken.json"),
        Err(LoadError::Format { .. })
    ));
}

#[test]
fn explicit_filenames_override_defaults() {
    let dir = dataset_dir();
    fs::write(dir.path().join("extra.csv"), "id\n9\n").unwrap();
    let catalog = DatasetCatalog::new(dir.path());

    let table = catalog.load_scams_from("extra.csv").unwrap().unwrap();
    assert_eq!(table.columns(), ["id"]);

    let graph = catalog
        .load_network_from("Uni", "UniNetwork150.json")
        .unwrap()
        .unwrap();
    assert_eq!(graph.len(), 1);
}

#[test]
fn config_file_drives_the_catalog() {
    let dir = dataset_dir();
    let cfg_path = dir.path().join("catalog.json");
    let cfg = serde_json::json!({
        "base_dir": dir.path(),
        "networks": {"bi": "BiNetwork50.json"},
        "csv_inference": "scalars"
    });
    fs::write(&cfg_path, cfg.to_string()).unwrap();

    let catalog = DatasetCatalog::from_config(CatalogConfig::from_json_file(&cfg_path).unwrap());
    assert_eq!(catalog.network_names().collect::<Vec<_>>(), vec!["bi"]);
    assert!(catalog.load_network("bi").unwrap().is_some());
    assert!(matches!(
        catalog.load_network("BiNetwork50"),
        Err(LoadError::UnknownDataset { .. })
    ));

    let scams = catalog.load_scams().unwrap().unwrap();
    assert_eq!(catalog.config().csv_inference, Inference::Scalars);
    let losses = scams.column("loss_usd").unwrap();
    assert_eq!(losses, vec![&CellValue::Float(120.5), &CellValue::Null]);
}
