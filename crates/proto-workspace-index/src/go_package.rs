//! Fast `go_package` line scan (§4.6c), used by the `Create` filesystem
//! event to classify a new file's native package without a full parse.

/// Scans `text` line by line for an `option ... go_package ...` declaration
/// and returns the quoted import path, with any `;packageName` suffix
/// stripped.
///
/// This deliberately does not parse the file: it is a cheap heuristic used
/// only to classify a newly created file, not a substitute for the linker's
/// own option resolution.
pub fn scan_go_package(text: &str) -> Option<String> {
    for line in text.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with("option") || !trimmed.contains("go_package") {
            continue;
        }
        let after_quote = trimmed.find('"')?;
        let rest = &trimmed[after_quote + 1..];
        let end = rest.find('"')?;
        let value = &rest[..end];
        return Some(match value.find(';') {
            Some(semi) => value[..semi].to_string(),
            None => value.to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_go_package() {
        let text = "syntax = \"proto3\";\noption go_package = \"example.com/foo/bar\";\n";
        assert_eq!(scan_go_package(text), Some("example.com/foo/bar".to_string()));
    }

    #[test]
    fn strips_trailing_package_name_directive() {
        let text = "option go_package = \"example.com/foo/bar;barpb\";\n";
        assert_eq!(scan_go_package(text), Some("example.com/foo/bar".to_string()));
    }

    #[test]
    fn returns_none_when_absent() {
        let text = "syntax = \"proto3\";\nmessage M {}\n";
        assert_eq!(scan_go_package(text), None);
    }

    #[test]
    fn ignores_option_lines_for_other_options() {
        let text = "option java_package = \"com.example\";\n";
        assert_eq!(scan_go_package(text), None);
    }
}
