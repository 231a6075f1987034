//! Opt-in lenient contract for callers of the services. The dashboards
//! settle their reads; `SettleFlag` is offered to library callers that
//! prefer a boolean over a `DataResult` for writes.

use tracing::error;

use shared_models::error::DataResult;

/// Collapses a service result into the portal's lenient contract: failed
/// reads become `None` or an empty list, failed writes become `false`.
/// The error goes to the log along with the operation name and is not
/// returned to the caller.
pub trait Settle<T> {
    fn settle(self, operation: &str) -> T;
}

impl<T: Default> Settle<T> for DataResult<T> {
    fn settle(self, operation: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                error!(operation, error = %err, "Error in {}", operation);
                T::default()
            }
        }
    }
}

/// The mutation half of the lenient contract, for callers that want a plain
/// success flag. The HTTP routes report mutation errors as status codes and
/// do not use it.
pub trait SettleFlag {
    fn succeeded(self, operation: &str) -> bool;
}

impl SettleFlag for DataResult<()> {
    fn succeeded(self, operation: &str) -> bool {
        match self {
            Ok(()) => true,
            Err(err) => {
                error!(operation, error = %err, "Error in {}", operation);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::error::DataError;

    #[test]
    fn failed_point_lookup_settles_to_none() {
        let result: DataResult<Option<String>> = Err(DataError::Transport("timeout".into()));
        assert_eq!(result.settle("getPatient"), None);
    }

    #[test]
    fn failed_list_settles_to_empty() {
        let result: DataResult<Vec<u32>> = Err(DataError::Auth("expired".into()));
        assert!(result.settle("getPatientAppointments").is_empty());
    }

    #[test]
    fn successful_values_pass_through() {
        let result: DataResult<Vec<u32>> = Ok(vec![1, 2]);
        assert_eq!(result.settle("list"), vec![1, 2]);
    }

    #[test]
    fn mutations_settle_to_flags() {
        let ok: DataResult<()> = Ok(());
        let missing: DataResult<()> = Err(DataError::NotFound("a1".into()));
        assert!(ok.succeeded("deleteAppointment"));
        assert!(!missing.succeeded("deleteAppointment"));
    }
}
