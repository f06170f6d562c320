//! Reading specifications and graphs from TOML or JSON files.

use crate::error::ModelError;
use crate::graph::ArchitectureGraph;
use crate::spec::ChipSpecification;
use serde::de::DeserializeOwned;
use std::path::Path;

/// On-disk encoding of a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// TOML, selected by the `.toml` extension.
    Toml,
    /// JSON, selected by the `.json` extension.
    Json,
}

impl InputFormat {
    /// Picks the format from a file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(InputFormat::Toml),
            Some("json") => Ok(InputFormat::Json),
            _ => Err(ModelError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Deserializes `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ModelError> {
        match self {
            InputFormat::Toml => Ok(toml::from_str(content)?),
            InputFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let format = InputFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), ?format, "reading model file");
    format.parse(&content)
}

/// Loads a chip specification from a `.toml` or `.json` file.
pub fn load_spec(path: &Path) -> Result<ChipSpecification, ModelError> {
    load(path)
}

/// Loads an architecture graph from a `.json` or `.toml` file.
pub fn load_graph(path: &Path) -> Result<ArchitectureGraph, ModelError> {
    let graph: ArchitectureGraph = load(path)?;
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "loaded architecture graph"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::MemoryType;
    use crate::NodeKind;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("chip.TOML")).unwrap(),
            InputFormat::Toml
        );
        assert_eq!(
            InputFormat::from_path(Path::new("graph.json")).unwrap(),
            InputFormat::Json
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("chip.yaml")),
            Err(ModelError::UnsupportedFormat(_))
        ));
        assert!(InputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn load_toml_spec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chip.toml");
        std::fs::write(
            &path,
            r#"
process_node = "5nm"
frequency = "2.5GHz"
num_npu_clusters = 8
mac_units_per_cluster = 1024
memory_type = "HBM3"
standards = ["PCIe", "USB"]
competition_mode = true
"#,
        )
        .unwrap();
        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.process_node, "5nm");
        assert_eq!(spec.frequency, 2.5);
        assert_eq!(spec.memory_type, MemoryType::Hbm3);
        assert_eq!(spec.standards, vec!["PCIe", "USB"]);
        assert!(spec.competition_mode);
        assert_eq!(spec.axi_width, 128);
    }

    #[test]
    fn load_json_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(
            &path,
            r#"{
                "nodes": [
                    {"id": "cpu", "kind": {"type": "host_cpu"}, "label": "RISC-V Host"},
                    {"id": "gpu", "label": "GPU Core", "position": {"x": 1.0, "y": 2.0}}
                ],
                "edges": [{"id": "e", "source": "cpu", "target": "gpu"}]
            }"#,
        )
        .unwrap();
        let graph = load_graph(&path).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].kind, NodeKind::HostCpu);
        assert_eq!(graph.nodes[1].kind, NodeKind::Unclassified);
        assert_eq!(graph.edges[0].bandwidth_weight, 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_spec(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = InputFormat::Json
            .parse::<ChipSpecification>("{ not json")
            .unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn malformed_toml_is_toml_error() {
        let err = InputFormat::Toml
            .parse::<ChipSpecification>("frequency = = 1")
            .unwrap_err();
        assert!(matches!(err, ModelError::Toml(_)));
    }
}
