use std::collections::HashSet;

use lazy_static::lazy_static;

/// Namespace of the XML Schema vocabulary itself.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
/// Namespace of the WSDL 1.1 vocabulary.
pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";

lazy_static! {
    /// Names of the built-in XSD simple types (primitives plus the ordinary
    /// derived types), as they appear after prefix stripping. Members whose
    /// declared type is listed here never need a catalog record.
    static ref BUILTIN_TYPE_NAMES: HashSet<&'static str> = [
        "anyType",
        "anySimpleType",
        "anyAtomicType",
        // primitives
        "string",
        "boolean",
        "float",
        "double",
        "decimal",
        "dateTime",
        "duration",
        "time",
        "date",
        "gMonth",
        "gMonthDay",
        "gDay",
        "gYear",
        "gYearMonth",
        "hexBinary",
        "base64Binary",
        "anyURI",
        "QName",
        "NOTATION",
        // ordinary derived types
        "normalizedString",
        "token",
        "language",
        "NMTOKEN",
        "NMTOKENS",
        "Name",
        "NCName",
        "ID",
        "IDREF",
        "IDREFS",
        "ENTITY",
        "ENTITIES",
        "integer",
        "nonPositiveInteger",
        "negativeInteger",
        "long",
        "int",
        "short",
        "byte",
        "nonNegativeInteger",
        "unsignedLong",
        "unsignedInt",
        "unsignedShort",
        "unsignedByte",
        "positiveInteger",
    ]
    .into_iter()
    .collect();
}

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPE_NAMES.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_and_derived_types_are_builtin() {
        assert!(is_builtin("string"));
        assert!(is_builtin("int"));
        assert!(is_builtin("anyType"));
        assert!(!is_builtin("CustomerRecord"));
    }
}
