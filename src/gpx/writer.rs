//! GPX serialization
//!
//! Writes waypoint collections as GPX 1.0 or 1.1 documents using quick-xml.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use log::{debug, info};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tempfile::NamedTempFile;

use super::waypoint::{Waypoint, WaypointCollection};
use crate::survey::errors::{TwdError, TwdResult};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

fn xml_error<E: std::fmt::Display>(e: E) -> TwdError {
    TwdError::SerializationError(e.to_string())
}

/// Serialize a collection into a GPX document
pub fn serialize(collection: &WaypointCollection) -> TwdResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let version = collection.version;
    let mut root = BytesStart::new("gpx");
    root.push_attribute(("xmlns", version.namespace()));
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xsi:schemaLocation", version.schema_location()));
    root.push_attribute(("version", version.as_str()));
    root.push_attribute(("creator", collection.creator.as_str()));
    writer.write_event(Event::Start(root)).map_err(xml_error)?;

    for waypoint in &collection.waypoints {
        write_waypoint(&mut writer, waypoint)?;
    }

    writer.write_event(Event::End(BytesEnd::new("gpx"))).map_err(xml_error)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize a collection into a GPX string
pub fn to_xml(collection: &WaypointCollection) -> TwdResult<String> {
    String::from_utf8(serialize(collection)?).map_err(xml_error)
}

fn write_waypoint<W: Write>(writer: &mut Writer<W>, waypoint: &Waypoint) -> TwdResult<()> {
    let lat = waypoint.latitude.to_string();
    let lon = waypoint.longitude.to_string();

    let mut wpt = BytesStart::new("wpt");
    wpt.push_attribute(("lat", lat.as_str()));
    wpt.push_attribute(("lon", lon.as_str()));
    writer.write_event(Event::Start(wpt)).map_err(xml_error)?;

    // Child order follows the wptType sequence of both schema versions
    if let Some(ele) = &waypoint.elevation {
        write_text_element(writer, "ele", ele)?;
    }
    write_text_element(writer, "time", &waypoint.time.to_rfc3339_opts(SecondsFormat::Secs, true))?;
    write_text_element(writer, "name", &waypoint.name)?;
    write_text_element(writer, "sym", &waypoint.symbol)?;

    writer.write_event(Event::End(BytesEnd::new("wpt"))).map_err(xml_error)?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> TwdResult<()> {
    writer.write_event(Event::Start(BytesStart::new(tag))).map_err(xml_error)?;
    writer.write_event(Event::Text(BytesText::new(text))).map_err(xml_error)?;
    writer.write_event(Event::End(BytesEnd::new(tag))).map_err(xml_error)?;
    Ok(())
}

/// Write a collection to a file
///
/// The document goes to a temporary file in the destination directory which
/// is renamed over `destination` once fully flushed. On failure the
/// temporary file is removed and `destination` is left untouched.
pub fn write(collection: &WaypointCollection, destination: &Path) -> TwdResult<()> {
    let bytes = serialize(collection)?;
    info!("writing xml to {}", destination.display());

    let write_error = |source| TwdError::WriteError { path: destination.to_path_buf(), source };

    let dir = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    {
        let mut out = BufWriter::new(&mut temp);
        out.write_all(&bytes).map_err(write_error)?;
        out.flush().map_err(write_error)?;
    }
    temp.persist(destination).map_err(|e| write_error(e.error))?;

    debug!("Wrote {} bytes, {} waypoints", bytes.len(), collection.len());
    info!("Gpx generation done");
    Ok(())
}

/// Output path next to the source: `<dir>/<stem>_<YYYYmmddHHMMSS>.gpx`
pub fn default_output_path(source: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "points".to_string());
    let file_name = format!("{}_{}.gpx", stem, now.format("%Y%m%d%H%M%S"));

    match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpx::waypoint::{GpxVersion, DEFAULT_SYMBOL};
    use chrono::{TimeZone, Utc};

    fn sample() -> WaypointCollection {
        let mut collection = WaypointCollection::new(GpxVersion::V1_1);
        collection.waypoints.push(Waypoint {
            longitude: 121.56446482045838,
            latitude: 25.033962001916308,
            elevation: Some("508".to_string()),
            name: "A & B".to_string(),
            time: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            symbol: DEFAULT_SYMBOL.to_string(),
        });
        collection
    }

    #[test]
    fn test_serialize_gpx_1_1() {
        let xml = to_xml(&sample()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns=\"http://www.topografix.com/GPX/1/1\""));
        assert!(xml.contains("version=\"1.1\""));
        assert!(xml.contains("creator=\"twdkit\""));
        assert!(xml.contains("<wpt lat=\"25.033962001916308\" lon=\"121.56446482045838\">"));
        assert!(xml.contains("<ele>508</ele>"));
        assert!(xml.contains("<time>2024-05-01T08:30:00Z</time>"));
        assert!(xml.contains("<name>A &amp; B</name>"));
        assert!(xml.contains("<sym>Waypoint</sym>"));
        assert!(xml.trim_end().ends_with("</gpx>"));
    }

    #[test]
    fn test_child_order_and_missing_elevation() {
        let mut collection = sample();
        collection.waypoints[0].elevation = None;
        let xml = to_xml(&collection).unwrap();

        assert!(!xml.contains("<ele>"));
        let time = xml.find("<time>").unwrap();
        let name = xml.find("<name>").unwrap();
        let sym = xml.find("<sym>").unwrap();
        assert!(time < name && name < sym);
    }

    #[test]
    fn test_serialize_gpx_1_0() {
        let xml = to_xml(&sample().with_version(GpxVersion::V1_0)).unwrap();
        assert!(xml.contains("xmlns=\"http://www.topografix.com/GPX/1/0\""));
        assert!(xml.contains("version=\"1.0\""));
    }

    #[test]
    fn test_empty_collection() {
        let xml = to_xml(&WaypointCollection::new(GpxVersion::V1_1)).unwrap();
        assert!(!xml.contains("<wpt"));
        assert!(xml.contains("<gpx"));
    }

    #[test]
    fn test_default_output_path() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 8, 30, 5).unwrap();
        let path = default_output_path(Path::new("data/team6.csv"), now);
        assert_eq!(path, Path::new("data").join("team6_20240501083005.gpx"));
    }

    #[test]
    fn test_write_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gpx");
        std::fs::write(&path, "stale").unwrap();

        write(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_xml(&sample()).unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be replaced by the finished document
        let blocked = dir.path().join("out.gpx");
        std::fs::create_dir(&blocked).unwrap();

        let result = write(&sample(), &blocked);

        assert!(matches!(result, Err(TwdError::WriteError { .. })));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(blocked.is_dir());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let result = write(&sample(), Path::new("no/such/dir/out.gpx"));
        assert!(matches!(result, Err(TwdError::WriteError { .. })));
    }
}
