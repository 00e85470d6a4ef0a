//! Shared utility functions for code generation.

/// Rust keywords that cannot be used as plain identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Returns true if `name` is a Rust keyword (strict or reserved).
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Split an identifier into words at `_`, `-`, `.`, `$`, spaces and case
/// boundaries (`getObjID2` → `get`, `Obj`, `ID2`).
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '.' | '$' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // `getObj` splits before `O`; `IDName` splits before `N`
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert a string to PascalCase (e.g., "get_obj_id" -> "GetObjId")
///
/// Already-PascalCase input keeps its acronyms (`GetObjID` stays `GetObjID`).
pub fn to_pascal_case(s: &str) -> String {
    words(s)
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "GetObjId" -> "get_obj_id")
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Make `name` usable as a Rust identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, a leading digit gets a `_`
/// prefix, and keywords get a trailing `_`.
pub fn sanitize_ident(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if is_rust_keyword(&out) {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("getObjId"), "GetObjId");
        assert_eq!(to_pascal_case("GetObjId"), "GetObjId");
        assert_eq!(to_pascal_case("GetObjID"), "GetObjID");
        assert_eq!(to_pascal_case("display-message"), "DisplayMessage");
        assert_eq!(to_pascal_case("mod"), "Mod");
        assert_eq!(to_pascal_case("a.b"), "AB");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Hello"), "hello");
        assert_eq!(to_snake_case("HelloWorld"), "hello_world");
        assert_eq!(to_snake_case("GetObjId"), "get_obj_id");
        assert_eq!(to_snake_case("GetHTTPResponse"), "get_http_response");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case("mod"), "mod");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_sanitize_ident() {
        assert_eq!(sanitize_ident("mod"), "mod_");
        assert_eq!(sanitize_ident("Self"), "Self_");
        assert_eq!(sanitize_ident("player"), "player");
        assert_eq!(sanitize_ident("2d"), "_2d");
        assert_eq!(sanitize_ident("a$b"), "a_b");
        assert_eq!(sanitize_ident(""), "_");
    }

    #[test]
    fn test_is_rust_keyword() {
        assert!(is_rust_keyword("fn"));
        assert!(is_rust_keyword("type"));
        assert!(!is_rust_keyword("player"));
    }
}
