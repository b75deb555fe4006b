//! Error type shared across the crate.
//!
//! Every failure is synchronous and carries a message plus a stable process
//! exit code, so scripts wrapping `arrfit` can distinguish bad inputs from
//! numerical degeneracies.

/// Crate-wide error taxonomy.
#[derive(Clone)]
pub enum AppError {
    /// Non-physical input: zero/negative temperature or diffusion
    /// coefficient, zero uncertainty, non-finite values.
    Domain(String),
    /// Fewer than two distinct points where a line fit is required.
    InsufficientData(String),
    /// Singular or near-singular weighted normal equations.
    IllConditioned(String),
    /// I/O, CSV schema, or configuration problems.
    Input(String),
    /// Plot backend failure.
    Render(String),
}

impl AppError {
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }

    pub fn ill_conditioned(message: impl Into<String>) -> Self {
        Self::IllConditioned(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) | AppError::Render(_) => 2,
            AppError::Domain(_) => 3,
            AppError::InsufficientData(_) => 4,
            AppError::IllConditioned(_) => 5,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Domain(_) => "domain error",
            AppError::InsufficientData(_) => "insufficient data",
            AppError::IllConditioned(_) => "ill-conditioned fit",
            AppError::Input(_) => "input error",
            AppError::Render(_) => "render error",
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Domain(m)
            | AppError::InsufficientData(m)
            | AppError::IllConditioned(m)
            | AppError::Input(m)
            | AppError::Render(m) => m,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind())
            .field("exit_code", &self.exit_code())
            .field("message", &self.message())
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(AppError::input("x").exit_code(), 2);
        assert_eq!(AppError::render("x").exit_code(), 2);
        assert_eq!(AppError::domain("x").exit_code(), 3);
        assert_eq!(AppError::insufficient_data("x").exit_code(), 4);
        assert_eq!(AppError::ill_conditioned("x").exit_code(), 5);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::domain("temperature must be positive");
        assert_eq!(
            err.to_string(),
            "domain error: temperature must be positive"
        );
    }
}
