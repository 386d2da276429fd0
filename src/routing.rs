use floodroute_core::prelude::*;
use pyo3::prelude::*;

use crate::model::PyRoadGraph;
use crate::to_py_err;

/// Route computed over a RoadGraph
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyclass)]
#[pyclass(name = "Route", frozen)]
#[derive(Clone)]
pub struct PyRoute {
    pub inner: Route,
}

#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pymethods)]
#[pymethods]
impl PyRoute {
    /// Route vertices as ``(lat, lon)`` tuples from start to destination
    #[getter]
    fn coordinates(&self) -> Vec<(f64, f64)> {
        self.inner
            .coordinates
            .iter()
            .map(|c| (c.lat, c.lon))
            .collect()
    }

    #[getter]
    fn nodes(&self) -> Vec<i64> {
        self.inner.nodes.iter().map(|id| id.0).collect()
    }

    /// Sum of flood-weighted edge costs
    #[getter]
    fn cost(&self) -> f64 {
        self.inner.cost
    }

    #[getter]
    fn length_m(&self) -> f64 {
        self.inner.length_m
    }

    /// GeoJSON FeatureCollection with the path and its endpoints
    fn to_geojson(&self) -> PyResult<String> {
        self.inner.to_geojson_string().map_err(to_py_err)
    }

    /// Write one ``lat,lon`` line per vertex to ``path``
    fn save_coordinates(&self, path: &str) -> PyResult<()> {
        let file = std::fs::File::create(path)?;
        self.inner
            .write_coordinates(std::io::BufWriter::new(file))
            .map_err(to_py_err)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Route({} nodes, length_m={:.1}, cost={:.1})",
            self.inner.len(),
            self.inner.length_m,
            self.inner.cost
        )
    }
}

/// Find the flood-aware route between two coordinates
///
/// Both coordinates are snapped to their nearest graph node first.
///
/// Raises
/// ------
/// ValueError
///     If a coordinate is out of range
/// RuntimeError
///     If the snapped nodes are not connected (``NoPathExists``)
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (graph, start_lat, start_lon, end_lat, end_lon))]
pub fn find_route(
    graph: &PyRoadGraph,
    start_lat: f64,
    start_lon: f64,
    end_lat: f64,
    end_lon: f64,
) -> PyResult<PyRoute> {
    safe_route(
        &graph.graph,
        Coordinate::new(start_lat, start_lon),
        Coordinate::new(end_lat, end_lon),
    )
    .map(|inner| PyRoute { inner })
    .map_err(to_py_err)
}

/// Find routes from one start to many destinations in parallel
///
/// Returns a list aligned with ``ends``; unreachable destinations are ``None``.
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (graph, start, ends))]
pub fn find_routes_one_to_many(
    graph: &PyRoadGraph,
    start: (f64, f64),
    ends: Vec<(f64, f64)>,
) -> PyResult<Vec<Option<PyRoute>>> {
    let ends: Vec<Coordinate> = ends.into_iter().map(Coordinate::from).collect();
    let results = safe_routes_one_to_many(&graph.graph, Coordinate::from(start), &ends);

    results
        .into_iter()
        .map(|result| match result {
            Ok(inner) => Ok(Some(PyRoute { inner })),
            Err(Error::NoPathExists { .. }) => Ok(None),
            Err(e) => Err(to_py_err(e)),
        })
        .collect()
}
