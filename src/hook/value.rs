// Tue Jan 20 2026 - Alex

use crate::hook::ObservationError;
use std::fmt;
use std::sync::Arc;

/// Live object handed to a hook. Only named zero-argument accessors are
/// reachable through it.
pub trait Receiver: Send + Sync {
    fn type_name(&self) -> &str;

    fn call_method(&self, name: &str) -> Result<HookValue, ObservationError>;
}

#[derive(Clone)]
pub enum HookValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Object(Arc<dyn Receiver>),
}

impl HookValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Object(_) => "object",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn expect_bool(&self) -> Result<bool, ObservationError> {
        self.as_bool().ok_or(ObservationError::UnexpectedValue {
            expected: "boolean",
            found: self.kind(),
        })
    }
}

impl fmt::Debug for HookValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => write!(f, "Bool({})", b),
            Self::Int(i) => write!(f, "Int({})", i),
            Self::Str(s) => write!(f, "Str({:?})", s),
            Self::Object(o) => write!(f, "Object({})", o.type_name()),
        }
    }
}

impl From<bool> for HookValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for HookValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// What a post-call hook sees once the original call has returned.
#[derive(Clone, Debug)]
pub struct CallFrame {
    pub receiver: Option<Arc<dyn Receiver>>,
    pub args: Vec<HookValue>,
    pub result: HookValue,
}

impl CallFrame {
    pub fn new(result: HookValue) -> Self {
        Self {
            receiver: None,
            args: Vec::new(),
            result,
        }
    }

    pub fn with_receiver(mut self, receiver: Arc<dyn Receiver>) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn call_on_receiver(&self, name: &str) -> Option<Result<HookValue, ObservationError>> {
        self.receiver.as_ref().map(|r| r.call_method(name))
    }
}

impl fmt::Debug for dyn Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Receiver({})", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_bool() {
        assert_eq!(HookValue::Bool(true).expect_bool(), Ok(true));
        assert_eq!(
            HookValue::Null.expect_bool(),
            Err(ObservationError::UnexpectedValue { expected: "boolean", found: "null" })
        );
    }

    #[test]
    fn test_string_access() {
        let value = HookValue::from("12345");
        assert_eq!(value.as_str(), Some("12345"));
        assert_eq!(value.as_bool(), None);
    }
}
