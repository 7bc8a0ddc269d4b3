/// Substitute the given placeholders into a template.
///
/// Placeholders are written `{name}` and only the names passed in are
/// recognized; any other `{...}` occurrence is left verbatim, so templates
/// stay inert with respect to text that merely looks like a placeholder.
pub fn substitute(template: &str, placeholders: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in placeholders {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_substitutes_recognized_placeholders() {
        let out = substitute(
            "{title}: {totalCount} changes",
            &[("title", "Diff"), ("totalCount", "4")],
        );
        assert_eq!(out, "Diff: 4 changes");
    }

    #[test]
    fn test_leaves_unrecognized_placeholders_verbatim() {
        let out = substitute("{title} {mystery}", &[("title", "Diff")]);
        assert_eq!(out, "Diff {mystery}");
    }

    #[test]
    fn test_repeated_placeholder_replaced_everywhere() {
        let out = substitute("{n} and {n}", &[("n", "2")]);
        assert_eq!(out, "2 and 2");
    }

    #[test]
    fn test_empty_value_substitution() {
        let out = substitute("a{subtitle}b", &[("subtitle", "")]);
        assert_eq!(out, "ab");
    }
}
