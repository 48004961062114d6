//! Reading network definitions and fare/time matrices.
//!
//! The network definition is a JSON document listing stations, lines,
//! interchanges and excluded stations. Fares and durations are CSV
//! matrices: the header row names destinations, the first column of each
//! following row names the origin, and each cell holds the value for that
//! pair. Empty cells and `-` mean "no record".

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use super::error::LoadError;

/// A station entry in the network definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationDef {
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// A line entry in the network definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineDef {
    pub name: String,
    pub stations: Vec<String>,
}

/// Raw network definition, before validation and interning.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NetworkDefinition {
    #[serde(default)]
    pub stations: Vec<StationDef>,
    #[serde(default)]
    pub lines: Vec<LineDef>,
    #[serde(default)]
    pub interchanges: Vec<(String, String)>,
    /// Explicit station pairs joined directly, whatever their lines.
    #[serde(default)]
    pub connections: Vec<(String, String)>,
    /// Stations ignored everywhere, including lines and fare matrices.
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl NetworkDefinition {
    /// Read a definition from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// One non-empty cell of a pairwise matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixCell {
    pub origin: String,
    pub destination: String,
    pub raw: String,
}

/// Parse a pairwise CSV matrix into its non-empty cells.
///
/// Rows with more cells than the header has destinations are truncated
/// with a warning; shorter rows are accepted.
pub fn parse_matrix<R: Read>(reader: R, path: &Path) -> Result<Vec<MatrixCell>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            return Err(LoadError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
    };
    let destinations: Vec<String> = header.iter().skip(1).map(|h| h.trim().to_string()).collect();

    let mut cells = Vec::new();
    for record in records {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let Some(origin) = record.get(0).map(str::trim) else {
            continue;
        };
        if origin.is_empty() {
            continue;
        }
        if record.len() > destinations.len() + 1 {
            warn!(
                file = %path.display(),
                origin,
                extra = record.len() - destinations.len() - 1,
                "row has more cells than header, ignoring extras"
            );
        }
        for (destination, cell) in destinations.iter().zip(record.iter().skip(1)) {
            let raw = cell.trim();
            if raw.is_empty() || raw == "-" {
                continue;
            }
            cells.push(MatrixCell {
                origin: origin.to_string(),
                destination: destination.clone(),
                raw: raw.to_string(),
            });
        }
    }
    Ok(cells)
}

/// Read a pairwise CSV matrix from a file.
pub fn read_matrix(path: &Path) -> Result<Vec<MatrixCell>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_matrix(file, path)
}

/// Where the network definition comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSource {
    /// The compiled-in Klang Valley network.
    Builtin,
    /// A JSON network definition on disk.
    File(PathBuf),
}

/// All inputs needed to build a network, re-read in full on every load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSource {
    pub definition: DefinitionSource,
    pub fares: Option<PathBuf>,
    pub times: Option<PathBuf>,
}

impl NetworkSource {
    /// The built-in network with no fare or time data.
    pub fn builtin() -> Self {
        Self {
            definition: DefinitionSource::Builtin,
            fares: None,
            times: None,
        }
    }

    pub fn with_fares(mut self, path: impl Into<PathBuf>) -> Self {
        self.fares = Some(path.into());
        self
    }

    pub fn with_times(mut self, path: impl Into<PathBuf>) -> Self {
        self.times = Some(path.into());
        self
    }

    /// Read every input. Fails only if a whole file is unreadable.
    pub fn read(&self) -> Result<SourceData, LoadError> {
        let definition = match &self.definition {
            DefinitionSource::Builtin => super::builtin::klang_valley(),
            DefinitionSource::File(path) => NetworkDefinition::from_path(path)?,
        };
        let fares = self.fares.as_deref().map(read_matrix).transpose()?;
        let times = self.times.as_deref().map(read_matrix).transpose()?;
        Ok(SourceData {
            definition,
            fares: fares.unwrap_or_default(),
            times: times.unwrap_or_default(),
        })
    }
}

/// Everything read from a `NetworkSource`, not yet validated.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub definition: NetworkDefinition,
    pub fares: Vec<MatrixCell>,
    pub times: Vec<MatrixCell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn cell(o: &str, d: &str, raw: &str) -> MatrixCell {
        MatrixCell {
            origin: o.to_string(),
            destination: d.to_string(),
            raw: raw.to_string(),
        }
    }

    #[test]
    fn parses_matrix_cells() {
        let csv = "From/To,A,B,C\nA,-,1.20,2.50\nB,1.20,,1.30\n";
        let cells = parse_matrix(csv.as_bytes(), Path::new("fares.csv")).unwrap();
        assert_eq!(
            cells,
            vec![
                cell("A", "B", "1.20"),
                cell("A", "C", "2.50"),
                cell("B", "A", "1.20"),
                cell("B", "C", "1.30"),
            ]
        );
    }

    #[test]
    fn trims_names_and_values() {
        let csv = " , Kajang , Merdeka \n Kajang ,, 3.10 \n";
        let cells = parse_matrix(csv.as_bytes(), Path::new("fares.csv")).unwrap();
        assert_eq!(cells, vec![cell("Kajang", "Merdeka", "3.10")]);
    }

    #[test]
    fn keeps_unparseable_cells_raw() {
        let csv = "x,A,B\nA,,abc\n";
        let cells = parse_matrix(csv.as_bytes(), Path::new("fares.csv")).unwrap();
        assert_eq!(cells, vec![cell("A", "B", "abc")]);
    }

    #[test]
    fn ignores_extra_cells() {
        let csv = "x,A\nB,1.0,9.9,9.9\n";
        let cells = parse_matrix(csv.as_bytes(), Path::new("fares.csv")).unwrap();
        assert_eq!(cells, vec![cell("B", "A", "1.0")]);
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = parse_matrix("".as_bytes(), Path::new("fares.csv")).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_matrix(Path::new("/nonexistent/Fare.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn reads_definition_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "stations": [{{"name": "A", "latitude": 3.1, "longitude": 101.6}}, {{"name": "B"}}],
                "lines": [{{"name": "Red", "stations": ["A", "B"]}}],
                "interchanges": [["B", "C"]],
                "excluded": ["Z"]
            }}"#
        )
        .unwrap();

        let def = NetworkDefinition::from_path(&path).unwrap();
        assert_eq!(def.stations.len(), 2);
        assert_eq!(def.stations[1].latitude, None);
        assert_eq!(def.lines[0].stations, vec!["A", "B"]);
        assert_eq!(def.interchanges, vec![("B".to_string(), "C".to_string())]);
        assert_eq!(def.excluded, vec!["Z"]);
    }

    #[test]
    fn malformed_definition_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = NetworkDefinition::from_path(&path).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn source_reads_all_files() {
        let dir = tempdir().unwrap();
        let fares = dir.path().join("Fare.csv");
        let times = dir.path().join("Time.csv");
        std::fs::write(&fares, "x,Kajang\nStadium Kajang,1.20\n").unwrap();
        std::fs::write(&times, "x,Kajang\nStadium Kajang,3\n").unwrap();

        let data = NetworkSource::builtin()
            .with_fares(&fares)
            .with_times(&times)
            .read()
            .unwrap();
        assert!(!data.definition.lines.is_empty());
        assert_eq!(data.fares, vec![cell("Stadium Kajang", "Kajang", "1.20")]);
        assert_eq!(data.times, vec![cell("Stadium Kajang", "Kajang", "3")]);
    }
}
