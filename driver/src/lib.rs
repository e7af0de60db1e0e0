use error_stack::{Report, ResultExt};
use kernel::KernelError;

pub mod crypto;
pub mod database;
mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .map_err(Report::from)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to read environment variable `{key}`"))
}

/// Like [`env`], falling back to `default` when the variable is unset.
pub(crate) fn env_or<T>(key: &str, default: T) -> error_stack::Result<T, KernelError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match dotenvy::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(Report::from)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("Malformed environment variable `{key}`")),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default),
        Err(error) => Err(Report::from(error).change_context(KernelError::Internal)),
    }
}
