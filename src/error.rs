use crate::handler::ValueType;

/// Errors that can occur when building a reflector
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    /// More than one handler in the set accepts the same value type, so every
    /// handler after the first one for that type can never be reached
    #[error("handler set has more than one handler for value type `{0}`")]
    DuplicateHandler(ValueType),
}
