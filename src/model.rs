use std::path::Path;

use floodroute_core::prelude::*;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::to_py_err;

/// RoadGraph
///
/// Road network weighted by flood exposure. Every road segment costs its
/// length in meters multiplied by ``1 + alpha * risk``, where ``risk`` falls
/// linearly from 1 at a hazard point to 0 at ``max_risk_dist_km``.
///
/// The graph is immutable once built and can be queried from any thread.
///
/// Example:
///
/// .. code-block:: python
///
///     graph = create_road_graph("roads.json", "flood.kml", alpha=5.0)
///     route = find_route(graph, 13.04, 80.23, 13.08, 80.27)
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyclass)]
#[pyclass(name = "RoadGraph", frozen)]
pub struct PyRoadGraph {
    pub(crate) graph: RoadGraph,
    pub(crate) hazards: HazardSet,
    pub(crate) config: RoadGraphConfig,
}

#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pymethods)]
#[pymethods]
impl PyRoadGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    /// Hazard points as ``(lat, lon)`` tuples, in first-seen order
    pub fn hazard_points(&self) -> Vec<(f64, f64)> {
        self.hazards.points().iter().map(|p| (p.lat, p.lon)).collect()
    }

    /// Summary of edge lengths, weights and flood risk
    pub fn stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let stats = self.graph.stats();
        let dict = PyDict::new(py);
        dict.set_item("node_count", stats.node_count)?;
        dict.set_item("edge_count", stats.edge_count)?;
        dict.set_item("total_length_m", stats.total_length_m)?;
        dict.set_item("total_weight", stats.total_weight)?;
        dict.set_item("hazardous_edges", stats.hazardous_edges)?;
        dict.set_item("max_risk", stats.max_risk)?;
        dict.set_item("mean_risk", stats.mean_risk)?;
        dict.set_item("alpha", self.config.alpha)?;
        dict.set_item("max_risk_dist_km", self.config.max_risk_dist_km)?;
        Ok(dict)
    }

    /// Nearest graph node to a coordinate as ``(node_id, distance_km)``
    pub fn nearest_node(&self, lat: f64, lon: f64) -> PyResult<(i64, f64)> {
        let (node, distance) = self
            .graph
            .nearest_node(Coordinate::new(lat, lon))
            .map_err(to_py_err)?;
        Ok((node.id.0, distance))
    }

    fn __repr__(&self) -> String {
        format!(
            "RoadGraph with {} nodes, {} edges and {} hazard points",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.hazards.len()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Build a flood-weighted road graph from files
///
/// Parameters
/// ----------
/// network_path : str
///     Path to an Overpass API JSON document (``[out:json]``) with highway
///     ways and their nodes
/// hazards_path : str
///     Path to a KML document whose coordinates mark flooded locations
/// alpha : float, default=5.0
///     Risk amplification. 0 yields plain shortest-distance routing
/// max_risk_dist_km : float, default=0.5
///     Distance from a hazard beyond which roads carry no penalty
///
/// Returns
/// -------
/// RoadGraph
///
/// Raises
/// ------
/// ValueError
///     If parameters or input documents are invalid
/// RuntimeError
///     If no hazards were found or the network yields no roads
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyfunction)]
#[pyfunction(name = "create_road_graph")]
#[pyo3(signature = (network_path, hazards_path, alpha = 5.0, max_risk_dist_km = 0.5))]
pub fn py_create_road_graph(
    network_path: &str,
    hazards_path: &str,
    alpha: f64,
    max_risk_dist_km: f64,
) -> PyResult<PyRoadGraph> {
    let config = RoadGraphConfig::new(alpha, max_risk_dist_km).map_err(to_py_err)?;
    let hazards = load_kml_hazards(Path::new(hazards_path)).map_err(to_py_err)?;
    let network = RoadNetwork::load(Path::new(network_path)).map_err(to_py_err)?;
    let graph = build_road_graph(&network, &hazards, &config).map_err(to_py_err)?;

    Ok(PyRoadGraph {
        graph,
        hazards,
        config,
    })
}
