/// All the errors that can occur when building geometry, classifying atoms
/// or deforming cells.
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// The cell matrix has a null (or nearly null) determinant and can not
    /// be inverted
    SingularCell(String),
    /// An atomic symbol is not part of the built-in mass table
    UnknownElement(String),
    /// Arrays that should describe the same set of atoms have inconsistent
    /// sizes
    DimensionMismatch(String),
    /// A computation was given inputs that do not belong together
    Precondition(String),
    /// A spherical selection was given a negative radius
    InvalidRadius(f64),
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SingularCell(e) => write!(f, "singular cell matrix: {}", e),
            Error::UnknownElement(e) => write!(f, "unknown element: {}", e),
            Error::DimensionMismatch(e) => write!(f, "dimension mismatch: {}", e),
            Error::Precondition(e) => write!(f, "precondition not satisfied: {}", e),
            Error::InvalidRadius(r) => write!(f, "invalid radius: {} is negative", r),
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
        }
    }
}

impl std::error::Error for Error {}
