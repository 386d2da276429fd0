use pyo3::prelude::*;

use model::{PyRoadGraph, py_create_road_graph};
use routing::{PyRoute, find_route, find_routes_one_to_many};

pub mod model;
pub mod routing;

/// A Python module implemented in Rust.
#[pymodule]
fn floodroute(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyRoadGraph>()?;
    m.add_class::<PyRoute>()?;
    m.add_function(wrap_pyfunction!(py_create_road_graph, m)?)?;

    m.add_function(wrap_pyfunction!(find_route, m)?)?;
    m.add_function(wrap_pyfunction!(find_routes_one_to_many, m)?)?;
    Ok(())
}

/// Maps engine errors onto Python exceptions
pub(crate) fn to_py_err(error: floodroute_core::Error) -> PyErr {
    use floodroute_core::Error;
    use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};

    match error {
        Error::InvalidData(_) | Error::InvalidNode(_) | Error::JsonError(_) => {
            PyValueError::new_err(error.to_string())
        }
        Error::IoError(_) => PyIOError::new_err(error.to_string()),
        Error::EmptyHazardSet
        | Error::EmptyGraph
        | Error::NoPathExists { .. }
        | Error::GeoJsonError(_) => {
            PyRuntimeError::new_err(format!("{}: {error}", error.kind()))
        }
    }
}

#[cfg(feature = "stubgen")]
pyo3_stub_gen::define_stub_info_gatherer!(stub_info);
