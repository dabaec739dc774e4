//! PyO3 wrapper for the generator handle
//!
//! This module provides the Python interface to [`Rng`].

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::rng::{InitMode, Rng, RngAlgorithm, RngError};

/// Map crate errors onto Python exceptions
///
/// Bad names and bad input become `ValueError`; everything the caller
/// couldn't have prevented becomes `RuntimeError`.
pub(crate) fn to_py_err(err: RngError) -> PyErr {
    match err {
        RngError::UnsupportedAlgorithm(_)
        | RngError::InvalidInitMode(_)
        | RngError::InvalidSeedLength { .. }
        | RngError::MalformedState(_)
        | RngError::StateIntegrity { .. } => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Python wrapper for Rust Rng
///
/// # Example (from Python)
///
/// ```python
/// from ensemble_rng_core_rs import Rng
///
/// parent = Rng("mzran", "system_random")
/// child = Rng("mzran")
/// child.seed_from(parent)
/// x = child.next_double()
/// saved = child.get_state()
/// ```
#[pyclass(name = "Rng")]
pub struct PyRng {
    inner: Rng,
}

#[pymethods]
impl PyRng {
    /// Create a generator
    ///
    /// Raises ValueError for an unknown algorithm or init mode.
    #[new]
    #[pyo3(signature = (algorithm = "mzran", init_mode = "default"))]
    fn new(algorithm: &str, init_mode: &str) -> PyResult<Self> {
        let algorithm: RngAlgorithm = algorithm.parse().map_err(to_py_err)?;
        let init_mode: InitMode = init_mode.parse().map_err(to_py_err)?;
        let inner = Rng::new(algorithm, init_mode).map_err(to_py_err)?;
        Ok(PyRng { inner })
    }

    fn forward(&mut self) -> u32 {
        self.inner.forward()
    }

    fn next_double(&mut self) -> f64 {
        self.inner.next_uniform_double()
    }

    /// Draw in [0, bound); raises ValueError for bound == 0
    fn next_int(&mut self, bound: u32) -> PyResult<u32> {
        if bound == 0 {
            return Err(PyValueError::new_err("bound must be positive"));
        }
        Ok(self.inner.next_int(bound))
    }

    fn seed(&mut self, init_mode: &str) -> PyResult<()> {
        let mode: InitMode = init_mode.parse().map_err(to_py_err)?;
        self.inner.seed(mode).map_err(to_py_err)
    }

    fn seed_from(&mut self, mut source: PyRefMut<'_, PyRng>) {
        self.inner.seed_from(&mut source.inner);
    }

    /// Current state as a line of integer tokens
    fn get_state(&self) -> PyResult<String> {
        self.inner.state_text().map_err(to_py_err)
    }

    fn set_state_text(&mut self, state: &str) -> PyResult<()> {
        self.inner
            .read_state(&mut state.as_bytes())
            .map_err(to_py_err)
    }

    #[getter]
    fn algorithm(&self) -> &'static str {
        self.inner.algorithm().name()
    }

    #[getter]
    fn max_value(&self) -> u64 {
        self.inner.max_value()
    }
}
