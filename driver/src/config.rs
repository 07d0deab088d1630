use std::env::VarError;
use std::str::FromStr;

use error_stack::Report;

use kernel::KernelError;

/// Reads a required variable from the process environment or `.env`.
pub fn env(key: &'static str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key).map_err(|error| {
        Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("{key} is not set"))
    })
}

/// Reads an optional variable, falling back to `default` when it is absent.
pub fn env_or<T: FromStr>(key: &'static str, default: T) -> error_stack::Result<T, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => value.trim().parse::<T>().map_err(|_| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("{key} has an invalid value: {value}"))
        }),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(default),
        Err(error) => Err(Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Failed to read {key}"))),
    }
}
