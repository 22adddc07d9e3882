//! End-to-end tests for the conversion pipeline

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use twdkit::config::Config;
use twdkit::coordinate::crs;
use twdkit::gpx;
use twdkit::survey::{clean, normalize, transform, NormalizationRule, RecordLoader};
use twdkit::{CoordinateTransformer, TwdError, TwdKit};

fn write_points(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config_for(data: &Path, crs: &str, rule: NormalizationRule) -> Config {
    Config {
        data: Some(data.to_path_buf()),
        crs: crs.to_string(),
        rule,
        ..Config::default()
    }
}

#[test]
fn test_three_rows_become_two_waypoints() {
    let dir = TempDir::new().unwrap();
    let input = write_points(
        &dir,
        "points.csv",
        "123456,1234567,100,A\n123456,1234567,100,B\n654321,7654321,50,C\n",
    );

    let records = RecordLoader::new().load(&input).unwrap();
    assert_eq!(records.len(), 3);

    let records = clean(records);
    assert_eq!(records.len(), 2);

    let records = normalize(records, &NormalizationRule::default()).unwrap();
    let records = transform(
        records,
        &CoordinateTransformer::new(),
        crs::lookup("CRS_TWD97").unwrap(),
        crs::lookup(crs::WGS84).unwrap(),
    )
    .unwrap();

    let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let collection = gpx::build_at(&records, time);
    let names: Vec<&str> = collection.waypoints.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["A,B", "C"]);

    let xml = gpx::to_xml(&collection).unwrap();
    assert_eq!(xml.matches("<wpt ").count(), 2);
    assert!(xml.contains("<name>A,B</name>"));
    assert!(xml.contains("<ele>50</ele>"));
}

#[test]
fn test_convert_writes_gpx_with_expected_position() {
    let dir = TempDir::new().unwrap();
    let input = write_points(&dir, "taipei.csv", "# TWD97 TM2\n06962,69658,508,Taipei 101\n");
    let output = dir.path().join("taipei.gpx");

    let config = config_for(&input, "CRS_TWD97", NormalizationRule::new("3", "", "27", ""));
    let kit = TwdKit::new(&config).unwrap();

    let run = kit.run(&input).unwrap();
    assert_eq!(run.records[0].record.x, "306962");
    assert_eq!(run.records[0].record.y, "2769658");
    assert!((run.records[0].longitude - 121.56446482045838).abs() < 1e-6);
    assert!((run.records[0].latitude - 25.033962001916308).abs() < 1e-6);

    let written = kit.convert(&input, Some(&output)).unwrap();
    assert_eq!(written, output);

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("version=\"1.1\""));
    assert!(xml.contains("<name>Taipei 101</name>"));
    assert!(xml.contains("lat=\"25.0339620"));
    assert!(xml.contains("lon=\"121.5644648"));
}

#[test]
fn test_width_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_points(&dir, "short.csv", "23456,2712345,,ok\n2345,2712345,,short\n");
    let output = dir.path().join("short.gpx");

    let config = config_for(&input, "CRS_TWD97", NormalizationRule::new("3", "", "", ""));
    let kit = TwdKit::new(&config).unwrap();

    match kit.convert(&input, Some(&output)) {
        Err(TwdError::InvalidCoordinateWidth { row, field, value, .. }) => {
            assert_eq!((row, field, value.as_str()), (1, "x", "32345"));
        },
        other => panic!("expected InvalidCoordinateWidth, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_default_output_name_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_points(&dir, "team6.csv", "306962,2769658,,P\n");

    let kit = TwdKit::new(&config_for(&input, "CRS_TWD97", NormalizationRule::default())).unwrap();
    let written = kit.convert(&input, None).unwrap();

    assert_eq!(written.parent(), Some(dir.path()));
    let file_name = written.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("team6_"));
    assert!(file_name.ends_with(".gpx"));
    // team6_ + YYYYmmddHHMMSS + .gpx
    assert_eq!(file_name.len(), "team6_".len() + 14 + ".gpx".len());
    assert!(written.is_file());
}

#[test]
fn test_unknown_reference_fails_before_loading() {
    let config = Config {
        crs: "CRS_TWD98".to_string(),
        ..Config::default()
    };
    assert!(matches!(TwdKit::new(&config), Err(TwdError::UnknownReference(_))));
}

#[test]
fn test_missing_source() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");
    let kit = TwdKit::new(&Config::default()).unwrap();

    assert!(matches!(kit.run(&missing), Err(TwdError::SourceNotFound(_))));
}

#[test]
fn test_config_file_drives_twd67_run() {
    let dir = TempDir::new().unwrap();
    let input = write_points(&dir, "old.csv", "304000,2767000,,old grid\n");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[twd]\ndebug = false\ndata = {:?}\ncrs = \"CRS_TWD67\"\nprefix_x = \"\"\npost_x = \"\"\nprefix_y = \"\"\npost_y = \"\"\n",
            input.to_string_lossy()
        ),
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let kit = TwdKit::new(&config).unwrap();
    let run = kit.run(config.data.as_deref().unwrap()).unwrap();

    assert!((run.records[0].longitude - 121.5432120148394).abs() < 1e-6);
    assert!((run.records[0].latitude - 25.00818266685615).abs() < 1e-6);
}
