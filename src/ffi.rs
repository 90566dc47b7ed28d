use crate::algorithm::yen::KShortestPaths;
use crate::graph::directed::DirectedGraph;
use ordered_float::OrderedFloat;

/// Opaque graph handle
pub struct FfiGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

#[no_mangle]
pub extern "C" fn kpaths_graph_new() -> *mut FfiGraph {
    Box::into_raw(Box::new(FfiGraph {
        graph: DirectedGraph::new(),
    }))
}

/// Adds or overwrites an edge. Returns false for a null graph or a negative or non-finite weight.
#[no_mangle]
pub extern "C" fn kpaths_graph_add_edge(
    g: *mut FfiGraph,
    from: usize,
    to: usize,
    weight: f64,
) -> bool {
    if g.is_null() {
        return false;
    }
    unsafe { &mut *g }
        .graph
        .add_edge(from, to, OrderedFloat(weight))
        .is_ok()
}

#[no_mangle]
pub extern "C" fn kpaths_graph_free(g: *mut FfiGraph) {
    if !g.is_null() {
        unsafe {
            drop(Box::from_raw(g));
        }
    }
}

/// Paths flattened into one vertex buffer.
///
/// Path `i` occupies `vertices[offsets[i]..offsets[i + 1]]` and weighs `weights[i]`.
#[repr(C)]
pub struct FfiPaths {
    vertices: *mut usize,
    vertices_len: usize,
    offsets: *mut usize,
    weights: *mut f64,
    count: usize,
}

fn leak<T>(values: Vec<T>) -> (*mut T, usize) {
    let mut values = values.into_boxed_slice();
    let len = values.len();
    let ptr = values.as_mut_ptr();
    std::mem::forget(values);
    (ptr, len)
}

unsafe fn reclaim<T>(ptr: *mut T, len: usize) {
    if !ptr.is_null() {
        drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)));
    }
}

#[no_mangle]
pub extern "C" fn kpaths_paths_free(paths: *mut FfiPaths) {
    if !paths.is_null() {
        unsafe {
            let paths = Box::from_raw(paths);
            reclaim(paths.vertices, paths.vertices_len);
            reclaim(paths.offsets, paths.count + 1);
            reclaim(paths.weights, paths.count);
        }
    }
}

/// Up to `k` loopless paths from `source` to `target`; null on invalid input
#[no_mangle]
pub extern "C" fn kpaths_k_shortest_paths(
    g: *const FfiGraph,
    source: usize,
    target: usize,
    k: usize,
) -> *mut FfiPaths {
    if g.is_null() {
        return std::ptr::null_mut();
    }
    let graph = unsafe { &(*g).graph };

    let search = match KShortestPaths::new(graph, source, target) {
        Ok(search) => search,
        Err(_) => return std::ptr::null_mut(),
    };

    let mut vertices = Vec::new();
    let mut offsets = vec![0];
    let mut weights = Vec::new();
    for path in search.take(k) {
        vertices.extend_from_slice(path.vertices());
        offsets.push(vertices.len());
        weights.push(path.weight().into_inner());
    }

    let count = weights.len();
    let (vertices, vertices_len) = leak(vertices);
    let (offsets, _) = leak(offsets);
    let (weights, _) = leak(weights);

    Box::into_raw(Box::new(FfiPaths {
        vertices,
        vertices_len,
        offsets,
        weights,
        count,
    }))
}
