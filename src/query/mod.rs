// Mon Jan 19 2026 - Alex

pub mod descriptor;
pub mod error;
pub mod index;
pub mod matcher;
pub mod traits;

pub use descriptor::{is_boolean_like, simple_name, MethodDescriptor, MethodId};
pub use error::QueryError;
pub use index::{ClassDump, InMemoryIndex, IndexDump, MethodDump, MethodSpec};
pub use matcher::MethodMatcher;
pub use traits::QueryService;
