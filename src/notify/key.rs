// Tue Jan 20 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub subject: String,
    pub signal: String,
    pub value: Option<bool>,
}

impl DedupKey {
    pub fn new(subject: &str, signal: &str) -> Self {
        Self {
            subject: subject.to_string(),
            signal: signal.to_string(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: bool) -> Self {
        self.value = Some(value);
        self
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}_{}_{}", self.subject, self.signal, v),
            None => write!(f, "{}_{}", self.subject, self.signal),
        }
    }
}
