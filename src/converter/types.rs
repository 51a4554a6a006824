use crate::swagger::OutputSchema;

/// Format marking a scalar that may hold either an integer or a string.
pub const INT_OR_STRING_FORMAT: &str = "int-or-string";

/// Format marking a lossy merge of `anyOf` branches.
pub const UNKNOWN_UNION_FORMAT: &str = "unknown-union";

const STRING_FORMATS: &[&str] = &[
    "byte",
    "binary",
    "date",
    "date-time",
    "duration",
    "email",
    "hostname",
    "int-or-string",
    "ipv4",
    "ipv6",
    "password",
    "uri",
    "uuid",
];

/// Whether a type/format pair is one the translator knows how to carry.
///
/// Unknown pairs are still passed through, but reported.
pub fn is_known_primitive(r#type: &str, format: Option<&str>) -> bool {
    match (r#type, format) {
        ("string" | "integer" | "number" | "boolean" | "Any", None) => true,
        ("string", Some(f)) => STRING_FORMATS.contains(&f),
        ("integer", Some("int32" | "int64")) => true,
        ("number", Some("float" | "double")) => true,
        ("", Some(f)) => STRING_FORMATS.contains(&f),
        _ => false,
    }
}

/// A scalar schema carrying the type and format verbatim.
pub fn primitive_schema(r#type: &str, format: Option<&str>) -> OutputSchema {
    OutputSchema {
        r#type: (!r#type.is_empty()).then(|| r#type.to_string()),
        format: format.map(str::to_string),
        ..OutputSchema::default()
    }
}

/// `{type: string, format: int-or-string}`
pub fn int_or_string_schema() -> OutputSchema {
    primitive_schema("string", Some(INT_OR_STRING_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("string", None, true)]
    #[case("string", Some("date-time"), true)]
    #[case("integer", Some("int64"), true)]
    #[case("number", Some("double"), true)]
    #[case("Any", None, true)]
    #[case("integer", Some("date-time"), false)]
    #[case("tuple", None, false)]
    #[case("", None, false)]
    fn known_primitives(#[case] ty: &str, #[case] format: Option<&str>, #[case] known: bool) {
        assert_eq!(is_known_primitive(ty, format), known);
    }
}
