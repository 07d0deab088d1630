use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotFound,
    Forbidden,
    Unauthenticated,
    /// A business rule rejected the operation in the current state.
    Conflict,
    Validation,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::Forbidden => write!(f, "Operation forbidden"),
            KernelError::Unauthenticated => write!(f, "Authentication required"),
            KernelError::Conflict => write!(f, "Operation conflicts with current state"),
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
