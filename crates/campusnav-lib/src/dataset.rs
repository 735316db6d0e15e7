use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::{build_graph, CampusGraph, EdgeRecord, GraphData, NodeRecord};
use crate::location::{LocationData, LocationNode, LocationTree};
use crate::resolver::{to_graph_key, NodeResolver};

/// Environment variable that points at a directory of campus data files.
pub const DATA_DIR_ENV: &str = "CAMPUSNAV_DATA_DIR";

/// Graph file in JSON form (`{"nodes": [...], "edges": [...]}`).
pub const GRAPH_JSON_FILENAME: &str = "campus_graph.json";
/// Node table in CSV form (`id,kind,x,y`).
pub const NODES_CSV_FILENAME: &str = "nodes.csv";
/// Edge table in CSV form (`from,to`).
pub const EDGES_CSV_FILENAME: &str = "edges.csv";
/// Location tree in JSON form.
pub const LOCATIONS_FILENAME: &str = "campus_locations.json";

const BUILTIN_GRAPH: &str = include_str!("../data/campus_graph.json");
const BUILTIN_LOCATIONS: &str = include_str!("../data/campus_locations.json");

/// Where campus data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The campus map compiled into the library.
    Builtin,
    /// A directory holding graph and location files.
    Directory(PathBuf),
}

/// Loaded campus: the walking graph plus the location tree.
#[derive(Debug, Clone)]
pub struct Campus {
    pub graph: CampusGraph,
    pub locations: LocationTree,
}

impl Campus {
    /// Build a campus from already parsed tables.
    pub fn from_data(graph: &GraphData, locations: &LocationData) -> Result<Self> {
        let graph = build_graph(graph)?;
        let locations = LocationTree::from_data(locations)?;
        let campus = Self { graph, locations };
        campus.report_unroutable_buildings();
        Ok(campus)
    }

    /// The campus map shipped with the library.
    pub fn builtin() -> Result<Self> {
        let graph = graph_data_from_json_reader(BUILTIN_GRAPH.as_bytes())?;
        let locations = location_data_from_json_reader(BUILTIN_LOCATIONS.as_bytes())?;
        Self::from_data(&graph, &locations)
    }

    /// Load a campus from a data directory.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !has_campus_files(dir) {
            return Err(Error::DataNotFound {
                path: dir.to_path_buf(),
            });
        }

        let json_path = dir.join(GRAPH_JSON_FILENAME);
        let graph = if json_path.is_file() {
            load_graph_data(&json_path)?
        } else {
            graph_data_from_csv_readers(
                fs::File::open(dir.join(NODES_CSV_FILENAME))?,
                fs::File::open(dir.join(EDGES_CSV_FILENAME))?,
            )?
        };
        let locations =
            location_data_from_json_reader(fs::File::open(dir.join(LOCATIONS_FILENAME))?)?;

        let campus = Self::from_data(&graph, &locations)?;
        info!(
            path = %dir.display(),
            nodes = campus.graph.len(),
            locations = campus.locations.len(),
            "loaded campus data"
        );
        Ok(campus)
    }

    /// Resolver bound to this campus' location tree.
    pub fn resolver(&self) -> NodeResolver<'_> {
        NodeResolver::new(&self.locations)
    }

    /// Top-level locations (buildings and gates) with no routable graph node.
    ///
    /// They can still be looked up; routing to them reports them as
    /// unroutable.
    pub fn unroutable_locations(&self) -> Vec<&LocationNode> {
        self.locations
            .root()
            .children()
            .iter()
            .filter_map(|&child| self.locations.node(child))
            .filter(|node| {
                !to_graph_key(Some(*node))
                    .and_then(|key| self.graph.get_node(&key))
                    .map(|graph_node| graph_node.kind().is_routable())
                    .unwrap_or(false)
            })
            .collect()
    }

    fn report_unroutable_buildings(&self) {
        for node in self.unroutable_locations() {
            warn!(location = node.name(), "building has no routable graph node");
        }
    }
}

/// Pick the campus data source.
///
/// Precedence: explicit override, then [`DATA_DIR_ENV`], then the platform
/// data directory (only when it holds campus files), then the builtin map.
pub fn resolve_data_source(override_dir: Option<&Path>) -> Result<DataSource> {
    if let Some(dir) = override_dir {
        return explicit_directory(dir);
    }

    if let Ok(value) = env::var(DATA_DIR_ENV) {
        if !value.trim().is_empty() {
            return explicit_directory(Path::new(value.trim()));
        }
    }

    match default_data_dir() {
        Ok(dir) if has_campus_files(&dir) => {
            debug!(path = %dir.display(), "using platform campus data directory");
            Ok(DataSource::Directory(dir))
        }
        Ok(dir) => {
            if dir.exists() {
                warn!(
                    path = %dir.display(),
                    "campus data directory is incomplete; using builtin campus"
                );
            }
            Ok(DataSource::Builtin)
        }
        Err(err) => {
            debug!(error = %err, "no platform data directory; using builtin campus");
            Ok(DataSource::Builtin)
        }
    }
}

/// Load the campus described by `source`.
pub fn load_campus(source: &DataSource) -> Result<Campus> {
    match source {
        DataSource::Builtin => Campus::builtin(),
        DataSource::Directory(dir) => Campus::load_dir(dir),
    }
}

/// Platform-specific directory searched for campus data files.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "campusnav", "campusnav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Whether `dir` holds a graph (JSON or CSV pair) and a location file.
pub fn has_campus_files(dir: &Path) -> bool {
    let has_graph = dir.join(GRAPH_JSON_FILENAME).is_file()
        || (dir.join(NODES_CSV_FILENAME).is_file() && dir.join(EDGES_CSV_FILENAME).is_file());
    has_graph && dir.join(LOCATIONS_FILENAME).is_file()
}

/// Load graph tables from a single file. Only `.json` is accepted here; CSV
/// tables come in pairs, see [`graph_data_from_csv_readers`].
pub fn load_graph_data(path: &Path) -> Result<GraphData> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        return Err(Error::UnsupportedDataFormat {
            path: path.to_path_buf(),
        });
    }
    graph_data_from_json_reader(fs::File::open(path)?)
}

pub fn graph_data_from_json_reader<R: Read>(reader: R) -> Result<GraphData> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse the node and edge tables from CSV sources with header rows.
pub fn graph_data_from_csv_readers<N: Read, E: Read>(nodes: N, edges: E) -> Result<GraphData> {
    let mut node_reader = ReaderBuilder::new().trim(Trim::All).from_reader(nodes);
    let nodes = node_reader
        .deserialize::<NodeRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut edge_reader = ReaderBuilder::new().trim(Trim::All).from_reader(edges);
    let edges = edge_reader
        .deserialize::<EdgeRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(GraphData { nodes, edges })
}

pub fn location_data_from_json_reader<R: Read>(reader: R) -> Result<LocationData> {
    Ok(serde_json::from_reader(reader)?)
}

fn explicit_directory(dir: &Path) -> Result<DataSource> {
    if has_campus_files(dir) {
        Ok(DataSource::Directory(dir.to_path_buf()))
    } else {
        Err(Error::DataNotFound {
            path: dir.to_path_buf(),
        })
    }
}
