use thiserror::Error;

/// Failures raised by the numerical core (knots, basis, solver, fitter,
/// evaluator, derivatives, curvature).
///
/// Every variant is recoverable: the core never aborts the process, it hands
/// the specific failure kind back so the caller can report it per group.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    /// Linear system shape mismatch (non-square matrix or wrong rhs length).
    #[error("dimension mismatch: matrix is {rows}x{cols}, right-hand side has {rhs} entries")]
    DimensionMismatch { rows: usize, cols: usize, rhs: usize },

    /// A pivot fell at or below the near-zero threshold during elimination.
    #[error("singular or nearly singular matrix (pivot {pivot:e} in column {column})")]
    SingularMatrix { column: usize, pivot: f64 },

    /// Fewer than 3 samples, or a control point count outside `2..=samples`.
    #[error("insufficient samples: {samples} samples for {control_points} control points (need >= 3 samples and 2 <= control points <= samples)")]
    InsufficientSamples { samples: usize, control_points: usize },

    /// Zero-length first derivative where a hard curvature value was required.
    #[error("degenerate tangent at curve sample {index}: curvature undefined")]
    DegenerateTangent { index: usize },

    /// Degree is not compatible with the control point count or the operation.
    #[error("invalid degree {degree} for {control_points} control points")]
    InvalidDegree { degree: usize, control_points: usize },

    /// Knot vector length is not `control points + degree + 1`.
    #[error("knot vector has {found} entries, expected {expected}")]
    KnotCount { expected: usize, found: usize },

    /// Curve sampling needs at least both endpoints.
    #[error("at least 2 curve samples are required, got {requested}")]
    TooFewEvaluationPoints { requested: usize },

    #[error("control polygon is empty")]
    EmptyControlPolygon,
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SplineError> for AppError {
    fn from(err: SplineError) -> Self {
        let exit_code = match err {
            SplineError::InsufficientSamples { .. } => 3,
            _ => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
