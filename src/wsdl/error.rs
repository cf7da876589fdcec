use thiserror::Error;

/// Failures raised while resolving a schema graph or building the type
/// catalog. Every variant is fatal for the current generation run; there is
/// no partial catalog and no retry.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A referenced document could not be fetched.
    #[error("failed to load {location}: {reason}")]
    Load { location: String, reason: String },

    /// A fetched document is not well-formed XML.
    #[error("document at {location} is not well-formed XML")]
    Parse {
        location: String,
        #[source]
        source: roxmltree::Error,
    },

    /// A constant, field or function was added under a name that already
    /// exists where overwriting is not the contract. Member overwrite on a
    /// complex type is intentional and does not raise this.
    #[error("a {kind} named {name} already exists on {class}")]
    DuplicateDefinition {
        class: String,
        kind: &'static str,
        name: String,
    },

    /// An enumeration value does not satisfy the declared restriction.
    #[error("enumeration value ({value}) does not satisfy the {restriction} restriction")]
    InvalidValue { value: String, restriction: String },

    /// A base-type or member type reference names a type that is neither a
    /// built-in nor defined anywhere in the resolved graph.
    #[error("type {name} is not defined in any reachable schema document")]
    UnresolvedType { name: String },
}
