use crate::algorithm::yen::{self, KShortestPaths};
use crate::graph::{parse_graph, DirectedGraph};
use ordered_float::OrderedFloat;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass]
pub struct PyGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

#[pymethods]
impl PyGraph {
    #[new]
    fn new() -> Self {
        PyGraph {
            graph: DirectedGraph::new(),
        }
    }

    /// Parse a graph in edge-list format
    #[staticmethod]
    fn from_text(text: &str) -> PyResult<Self> {
        let graph = parse_graph(text).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyGraph { graph })
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> PyResult<bool> {
        self.graph
            .add_edge(from, to, OrderedFloat(weight))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

#[pyfunction]
fn shortest_path(graph: &PyGraph, source: usize, target: usize) -> PyResult<Option<(f64, Vec<usize>)>> {
    let path = yen::shortest_path(&graph.graph, source, target)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(path.map(|p| (p.weight().into_inner(), p.into_vertices())))
}

#[pyfunction]
fn k_shortest_paths(graph: &PyGraph, source: usize, target: usize, k: usize) -> PyResult<Vec<(f64, Vec<usize>)>> {
    let search = KShortestPaths::new(&graph.graph, source, target)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(search
        .take(k)
        .map(|p| (p.weight().into_inner(), p.into_vertices()))
        .collect())
}

#[pymodule]
fn kpaths_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    m.add_function(wrap_pyfunction!(shortest_path, m)?)?;
    m.add_function(wrap_pyfunction!(k_shortest_paths, m)?)?;
    Ok(())
}
