use std::fmt;

/// A boxed error type for helper operations.
///
/// Backends convert their native errors into this with `?`. Callers that
/// need to tell a specific failure apart can downcast to one of the error
/// types below.
pub type HelperResult<T> = Result<T, Box<dyn std::error::Error>>;

/// A display device key that is not in the device cache.
///
/// This is the one hard failure of the operation surface: resolving a key
/// that the most recent enumeration did not return never degrades to a
/// `false` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDeviceKey(pub String);

impl fmt::Display for UnknownDeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown display device key: {:?}", self.0)
    }
}

impl std::error::Error for UnknownDeviceKey {}

/// An operation call that could not be decoded from its name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// No operation is registered under this name.
    UnknownOperation(String),
    /// A positional argument is absent.
    Missing { operation: &'static str, index: usize },
    /// A positional argument has the wrong primitive type.
    WrongType {
        operation: &'static str,
        index: usize,
        expected: &'static str,
    },
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "unknown operation: {name}"),
            Self::Missing { operation, index } => {
                write!(f, "{operation}: missing argument {index}")
            }
            Self::WrongType {
                operation,
                index,
                expected,
            } => write!(f, "{operation}: argument {index} must be {expected}"),
        }
    }
}

impl std::error::Error for ArgumentError {}
