use serde::Serialize;
use serde_json::Value;

use crate::{ArgumentError, DisplayDeviceRecord, Modifiers};

/// An operation the host can call by name.
///
/// Parsed once from the host's name and positional arguments, then run by
/// [`Controller::dispatch`](crate::Controller::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Captures the host's main window handle.
    Init,
    FindWindowByTitle {
        substring: String,
    },
    ShowWindow {
        maximize: bool,
    },
    HideWindow,
    SetForegroundWindow,
    GetDisplayDevices,
    SetDisplayResolution {
        key: String,
        width: i32,
        height: i32,
        refresh_rate: i32,
    },
    RestartApp {
        delay_seconds: u32,
    },
    RegisterHotKey {
        key_code: u32,
        modifiers: Modifiers,
    },
    UnregisterHotKey {
        id: i32,
    },
}

impl Operation {
    /// Every operation name, in the order the host registers them.
    pub const NAMES: [&'static str; 10] = [
        "init",
        "findWindowByTitle",
        "showWindow",
        "hideWindow",
        "setForegroundWindow",
        "getDisplayDevices",
        "setDisplayResolution",
        "restartApp",
        "registerHotKey",
        "unregisterHotKey",
    ];

    /// The host-facing name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::FindWindowByTitle { .. } => "findWindowByTitle",
            Self::ShowWindow { .. } => "showWindow",
            Self::HideWindow => "hideWindow",
            Self::SetForegroundWindow => "setForegroundWindow",
            Self::GetDisplayDevices => "getDisplayDevices",
            Self::SetDisplayResolution { .. } => "setDisplayResolution",
            Self::RestartApp { .. } => "restartApp",
            Self::RegisterHotKey { .. } => "registerHotKey",
            Self::UnregisterHotKey { .. } => "unregisterHotKey",
        }
    }

    /// Decodes a host call. Extra trailing arguments are ignored.
    pub fn parse(name: &str, args: &[Value]) -> Result<Self, ArgumentError> {
        let operation = Self::NAMES
            .iter()
            .find(|n| **n == name)
            .ok_or_else(|| ArgumentError::UnknownOperation(name.to_string()))?;
        let args = Args {
            operation,
            values: args,
        };

        Ok(match *operation {
            "init" => Self::Init,
            "findWindowByTitle" => Self::FindWindowByTitle {
                substring: args.string(0)?,
            },
            "showWindow" => Self::ShowWindow {
                maximize: args.bool(0)?,
            },
            "hideWindow" => Self::HideWindow,
            "setForegroundWindow" => Self::SetForegroundWindow,
            "getDisplayDevices" => Self::GetDisplayDevices,
            "setDisplayResolution" => Self::SetDisplayResolution {
                key: args.string(0)?,
                width: args.int(1)?,
                height: args.int(2)?,
                refresh_rate: args.int(3)?,
            },
            "restartApp" => Self::RestartApp {
                delay_seconds: args.uint(0)?,
            },
            "registerHotKey" => Self::RegisterHotKey {
                key_code: args.uint(0)?,
                modifiers: Modifiers(args.uint(1)?),
            },
            "unregisterHotKey" => Self::UnregisterHotKey { id: args.int(0)? },
            _ => return Err(ArgumentError::UnknownOperation(name.to_string())),
        })
    }
}

/// Positional argument reader for one operation.
struct Args<'a> {
    operation: &'static str,
    values: &'a [Value],
}

impl Args<'_> {
    fn get(&self, index: usize) -> Result<&Value, ArgumentError> {
        self.values.get(index).ok_or(ArgumentError::Missing {
            operation: self.operation,
            index,
        })
    }

    fn wrong_type(&self, index: usize, expected: &'static str) -> ArgumentError {
        ArgumentError::WrongType {
            operation: self.operation,
            index,
            expected,
        }
    }

    fn string(&self, index: usize) -> Result<String, ArgumentError> {
        self.get(index)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(index, "a string"))
    }

    fn bool(&self, index: usize) -> Result<bool, ArgumentError> {
        self.get(index)?
            .as_bool()
            .ok_or_else(|| self.wrong_type(index, "a bool"))
    }

    fn int(&self, index: usize) -> Result<i32, ArgumentError> {
        integer(self.get(index)?)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| self.wrong_type(index, "an int"))
    }

    fn uint(&self, index: usize) -> Result<u32, ArgumentError> {
        integer(self.get(index)?)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| self.wrong_type(index, "a uint"))
    }
}

/// Reads a JSON number as an integer.
///
/// Hosts often send every number as a double, so floats without a
/// fractional part are accepted too.
fn integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
}

/// The value an operation hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// No result, or the "not found" sentinel.
    None,
    Bool(bool),
    Int(i32),
    Text(String),
    Devices(Vec<DisplayDeviceRecord>),
}

impl Reply {
    /// Converts the reply to the JSON value passed to the host.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
