//! Textual preprocessing (spec.md §6 build-time surface:
//! "preprocess(source, {filename}) -> source'"), run before parsing.
//!
//! A bare `.prompt` file — one whose top level is a single JSX expression
//! with no `import`/`export` — is wrapped into a minimal module so the
//! parser always sees a well-formed `export default <expr>;` regardless of
//! how the caller authored the file. A source that already declares an
//! import or an explicit `export default` is returned unchanged.

/// Preprocesses `source` into a form `transform` can parse as a module.
///
/// `filename` is accepted (spec.md §6 signature) for parity with the
/// render-time surface and future per-extension behavior, but bare-file
/// detection currently depends only on the source text itself.
pub fn preprocess(source: &str, _filename: &str) -> String {
    if has_module_markers(source) {
        return source.to_string();
    }
    format!("export default (\n{}\n);", source.trim())
}

fn has_module_markers(source: &str) -> bool {
    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("import ") || trimmed.starts_with("export ") {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_jsx_gets_wrapped_in_export_default() {
        let out = preprocess("<Prompt><Task>hi</Task></Prompt>", "a.prompt");
        assert!(out.starts_with("export default ("));
        assert!(out.trim_end().ends_with(");"));
    }

    #[test]
    fn source_with_explicit_export_is_left_unchanged() {
        let src = "export default <Prompt><Task>hi</Task></Prompt>;";
        assert_eq!(preprocess(src, "a.prompt"), src);
    }

    #[test]
    fn source_with_import_is_left_unchanged() {
        let src = "import { helper } from \"./helper\";\nexport default helper();";
        assert_eq!(preprocess(src, "a.prompt"), src);
    }
}
