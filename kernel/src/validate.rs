use error_stack::Report;

use crate::KernelError;

/// Field-level checks run before a record is handed to storage.
///
/// Failures carry a printable `&'static str` attachment naming the offending field.
pub trait Validate {
    fn validate(&self) -> error_stack::Result<(), KernelError>;
}

pub(crate) fn length_between(
    value: &str,
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
) -> error_stack::Result<(), KernelError> {
    let length = value.chars().count();
    if length < min {
        return Err(Report::new(KernelError::Validation).attach_printable(too_short));
    }
    if length > max {
        return Err(Report::new(KernelError::Validation).attach_printable(too_long));
    }
    Ok(())
}

pub(crate) fn uuid_v4(
    id: &uuid::Uuid,
    message: &'static str,
) -> error_stack::Result<(), KernelError> {
    match id.get_version() {
        Some(uuid::Version::Random) => Ok(()),
        _ => Err(Report::new(KernelError::Validation).attach_printable(message)),
    }
}
