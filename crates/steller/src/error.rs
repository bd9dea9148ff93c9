#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("numerical degeneracy: {0}")]
    NumericalDegeneracy(String),
    #[error(
        "sparse eigensolver did not converge: {converged}/{requested} eigenpairs after {restarts} restarts"
    )]
    SolverNonConvergence {
        converged: usize,
        requested: usize,
        restarts: usize,
    },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
