use std::borrow::Cow;

/// Converts a Rust-side keyword into its GraphQL name.
///
/// `client_mutation_id` becomes `clientMutationId`, a leading `_` is dropped.
pub fn to_camel_case(s: &'_ str) -> Cow<'_, str> {
    let mut dest = Cow::Borrowed(s);

    let s_iter = s.strip_prefix('_').unwrap_or(s).split('_').enumerate();

    for (i, part) in s_iter {
        if i == 0 {
            dest = Cow::Borrowed(part);
        } else if let Some(first) = part.chars().next() {
            let rest = &part[first.len_utf8()..];
            dest.to_mut().extend(first.to_uppercase());
            dest.to_mut().push_str(rest);
        }
    }

    dest
}

/// Lower-cases the first character of a type name to obtain a field name.
///
/// `CreateWidget` becomes `createWidget`.
pub fn to_field_name(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Checks whether `name` matches `/[_A-Za-z][_0-9A-Za-z]*/` and isn't reserved
/// for introspection (`__` prefix).
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic());

    starts_well
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !name.starts_with("__")
}

#[cfg(test)]
mod tests {
    use super::{is_valid_name, to_camel_case, to_field_name};

    #[test]
    fn camel_case() {
        assert_eq!(&to_camel_case("test")[..], "test");
        assert_eq!(&to_camel_case("_test")[..], "test");
        assert_eq!(&to_camel_case("first_second")[..], "firstSecond");
        assert_eq!(&to_camel_case("first_")[..], "first");
        assert_eq!(&to_camel_case("a_b_c")[..], "aBC");
        assert_eq!(&to_camel_case("client_mutation_id")[..], "clientMutationId");
        assert_eq!(&to_camel_case("")[..], "");
    }

    #[test]
    fn field_name() {
        assert_eq!(to_field_name("CreateWidget"), "createWidget");
        assert_eq!(to_field_name("renameWidget"), "renameWidget");
        assert_eq!(to_field_name(""), "");
    }

    #[test]
    fn valid_names() {
        assert!(is_valid_name("widgetName"));
        assert!(is_valid_name("_private"));
        assert!(!is_valid_name("__typename"));
        assert!(!is_valid_name("1st"));
        assert!(!is_valid_name("with-dash"));
        assert!(!is_valid_name(""));
    }
}
