//! Tests for the compile-time template macros.
//!
//! Every template here is compiled while this crate builds, so a template
//! the compiler rejects shows up as a build failure rather than a test
//! failure.

#[cfg(test)]
mod tests {
    use easley_jet_macros::{jet, jet_file};

    // =============================================================================
    // Helper Functions
    // =============================================================================

    fn ignore_whitespace(code: &str) -> String {
        code.chars().filter(|c| !c.is_whitespace()).collect()
    }

    // =============================================================================
    // jet!
    // =============================================================================

    #[test]
    fn test_self_closing_element() {
        assert_eq!(jet!("<div />"), "Easley.Jet.create(\"div\", null);\n");
    }

    #[test]
    fn test_attributes_and_text() {
        assert_eq!(
            jet!(r#"<div class="foo">Foo</div>"#),
            "Easley.Jet.create(\"div\", { class: \"foo\" }, \"Foo\");\n"
        );
    }

    #[test]
    fn test_namespaced_attributes() {
        let code = jet!(r#"<homepage xlink:type="simple" xlink:href="https://www.w3schools.com" />"#);
        assert_eq!(
            ignore_whitespace(code),
            ignore_whitespace(
                r#"Easley.Jet.create("homepage", {
                    "xlink:type": "simple",
                    "xlink:href": "https://www.w3schools.com"
                });"#
            )
        );
    }

    #[test]
    fn test_member_chain() {
        assert_eq!(
            jet!("<a>{ foo.bar.zardoz }</a>"),
            "Easley.Jet.create(\"a\", null, foo.bar.zardoz);\n"
        );
    }

    #[test]
    fn test_tsx_dialect() {
        assert_eq!(
            jet!("<span>{ item.label }</span>" as tsx),
            "Easley.Jet.create(\"span\", null, item.label);\n"
        );
    }

    #[test]
    fn test_usable_in_const() {
        const BADGE: &str = jet!("<b>new</b>");
        assert_eq!(BADGE, "Easley.Jet.create(\"b\", null, \"new\");\n");
    }

    #[test]
    fn test_matches_runtime_compile() {
        let source = r#"<ul><li>{ a.b }</li><li class="x">c</li></ul>"#;
        assert_eq!(
            jet!(r#"<ul><li>{ a.b }</li><li class="x">c</li></ul>"#),
            easley_jet::compile(source).unwrap()
        );
    }

    // =============================================================================
    // jet_file!
    // =============================================================================

    #[test]
    fn test_template_file() {
        const CARD: &str = jet_file!("templates/card.jsx");
        assert_eq!(
            ignore_whitespace(CARD),
            ignore_whitespace(
                r#"Easley.Jet.create("div", { class: "card" },
                    Easley.Jet.create("h2", null, user.name),
                    Easley.Jet.create("img", { src: user.avatar, alt: "avatar" }));"#
            )
        );
    }

    #[test]
    fn test_template_file_matches_runtime_compile() {
        let source = include_str!("../templates/card.jsx");
        assert_eq!(jet_file!("templates/card.jsx"), easley_jet::compile(source).unwrap());
    }
}
