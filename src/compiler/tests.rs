//! End-to-end tests: template source in, JavaScript source or error out.

use std::io;
use std::sync::{Arc, Mutex};

use super::{CompileConfig, ErrorMode, SourceSyntax, compile_template};
use crate::error::{Construct, JetError};

fn compile(source: &str) -> Result<String, JetError> {
    compile_template(source, &CompileConfig::default())
}

/// Strips all whitespace so layout differences do not matter.
fn ignore_whitespace(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

fn assert_compiles_to(source: &str, expected: &str) {
    let code = compile(source).unwrap_or_else(|err| panic!("{source:?} failed: {err}"));
    assert_eq!(ignore_whitespace(&code), ignore_whitespace(expected), "source: {source}");
}

fn assert_logic_free_error(source: &str) -> JetError {
    let err = compile(source).expect_err(source);
    assert!(err.is_policy(), "{source:?} gave {err:?}");
    assert_eq!(err.to_string(), "Jet templates are logic free");
    err
}

// =============================================================================
// Elements
// =============================================================================

#[test]
fn self_closing_tag_without_attributes() {
    assert_eq!(compile("<div />").unwrap(), "Easley.Jet.create(\"div\", null);\n");
}

#[test]
fn self_closing_tag_with_attributes() {
    assert_compiles_to(
        r#"<div class="foo" onClick="javascript:void(0)" />"#,
        r#"Easley.Jet.create("div", {
            class: "foo",
            onClick: "javascript:void(0)"
        });"#,
    );
}

#[test]
fn open_close_tag_with_text_and_attributes() {
    assert_compiles_to(
        r#"<div class="foo">Foo</div>"#,
        r#"Easley.Jet.create("div", { class: "foo" }, "Foo");"#,
    );
}

#[test]
fn empty_pair_matches_self_closing() {
    assert_eq!(compile("<div></div>").unwrap(), compile("<div />").unwrap());
}

#[test]
fn namespaced_attributes_are_quoted_keys() {
    assert_compiles_to(
        r#"<homepage xlink:type="simple" xlink:href="https://www.w3schools.com" />"#,
        r#"Easley.Jet.create("homepage", {
            "xlink:type": "simple",
            "xlink:href": "https://www.w3schools.com"
        });"#,
    );
}

#[test]
fn namespaced_tag_is_kept_verbatim() {
    assert_compiles_to("<svg:rect />", r#"Easley.Jet.create("svg:rect", null);"#);
}

#[test]
fn attribute_order_is_preserved() {
    assert_compiles_to(
        r#"<div z="1" a="2" m="3" />"#,
        r#"Easley.Jet.create("div", { z: "1", a: "2", m: "3" });"#,
    );
}

#[test]
fn children_become_positional_arguments() {
    assert_compiles_to(
        r#"
        <ul class="list">
            <li>One</li>
            <li>{ item.name }</li>
            <li><b>Three</b></li>
        </ul>
        "#,
        r#"Easley.Jet.create("ul", { class: "list" },
            Easley.Jet.create("li", null, "One"),
            Easley.Jet.create("li", null, item.name),
            Easley.Jet.create("li", null, Easley.Jet.create("b", null, "Three")));"#,
    );
}

#[test]
fn valueless_attribute_is_true() {
    assert_compiles_to(
        "<input disabled />",
        r#"Easley.Jet.create("input", { disabled: true });"#,
    );
}

#[test]
fn attribute_values_may_be_references_and_literals() {
    assert_compiles_to(
        r#"<img src={ user.avatar } width={64} alt={"avatar"} />"#,
        r#"Easley.Jet.create("img", { src: user.avatar, width: 64, alt: "avatar" });"#,
    );
}

#[test]
fn nested_element_in_expression_container() {
    assert_compiles_to(
        "<p>{<br />}</p>",
        r#"Easley.Jet.create("p", null, Easley.Jet.create("br", null));"#,
    );
}

#[test]
fn empty_expression_container_is_dropped() {
    assert_compiles_to(
        "<p>{/* comment */}</p>",
        r#"Easley.Jet.create("p", null);"#,
    );
}

#[test]
fn text_with_content_keeps_its_spacing() {
    let code = compile("<p> Hello world </p>").unwrap();
    assert_eq!(code, "Easley.Jet.create(\"p\", null, \" Hello world \");\n");
}

#[test]
fn text_is_escaped_in_output() {
    let code = compile(r#"<p>say "hi"</p>"#).unwrap();
    assert_eq!(code, "Easley.Jet.create(\"p\", null, \"say \\\"hi\\\"\");\n");
}

#[test]
fn character_references_are_decoded_in_text_and_attributes() {
    assert_compiles_to(
        r#"<p title="a &amp; b">x &lt;y&gt;</p>"#,
        r#"Easley.Jet.create("p", { title: "a & b" }, "x <y>");"#,
    );
}

#[test]
fn file_without_template_passes_through() {
    assert_eq!(compile("").unwrap(), "");
    assert_eq!(compile("title;").unwrap(), "title;\n");
}

#[test]
fn plain_variable_declarations_are_kept() {
    assert_compiles_to(
        r#"const title = "Home";
        <h1>{ title }</h1>"#,
        r#"const title = "Home";
        Easley.Jet.create("h1", null, title);"#,
    );
}

#[test]
fn element_in_variable_initializer_is_transformed() {
    assert_compiles_to(
        "const page = <main />",
        r#"const page = Easley.Jet.create("main", null);"#,
    );
}

// =============================================================================
// Member chains
// =============================================================================

#[test]
fn nested_member_expression_interpolation() {
    assert_compiles_to(
        "\n  <a>{ foo.bar.zardoz }</a>\n",
        r#"Easley.Jet.create("a", null, foo.bar.zardoz);"#,
    );
}

#[test]
fn parenthesized_reference_is_unwrapped() {
    assert_compiles_to("<a>{ (foo) }</a>", r#"Easley.Jet.create("a", null, foo);"#);
}

// =============================================================================
// Syntax errors
// =============================================================================

#[test]
fn missing_closing_tag_is_a_syntax_error() {
    let err = compile("<div>").unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
    assert!(err.to_string().contains("Unexpected token"));
}

#[test]
fn mismatched_closing_tag_is_a_syntax_error() {
    let err = compile("<div></span>").unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
}

// =============================================================================
// Policy: module declarations
// =============================================================================

#[test]
fn prevents_import_statements() {
    let err = assert_logic_free_error("\n  import Foo from \"foo\"\n");
    assert_eq!(err.violations()[0].construct, Construct::ImportDeclaration);
}

#[test]
fn prevents_export_default_statements() {
    let err = assert_logic_free_error("\n  export default \"foo\"\n");
    assert_eq!(err.violations()[0].construct, Construct::ExportDefault);
}

#[test]
fn prevents_export_all_statements() {
    let err = assert_logic_free_error("\n  export * from \"foo\"\n");
    assert_eq!(err.violations()[0].construct, Construct::ExportAll);
}

#[test]
fn prevents_named_export_statements() {
    let err = assert_logic_free_error(
        r#"
        const a = "a"
        const b = "b"
        export { a, b as c }
        "#,
    );
    assert_eq!(err.violations()[0].construct, Construct::NamedExport);
}

#[test]
fn prevents_export_specifier_statements() {
    let err = assert_logic_free_error("\n  export { transform } from \"@babel/core\"\n");
    assert_eq!(err.violations()[0].construct, Construct::ExportSpecifier);
}

#[test]
fn module_declaration_after_template_still_fails() {
    let err = assert_logic_free_error("<div />\nexport default \"foo\"");
    assert_eq!(err.violations()[0].construct, Construct::ExportDefault);
}

// =============================================================================
// Policy: expressions and statements
// =============================================================================

#[test]
fn does_not_allow_assignment() {
    let err = assert_logic_free_error("\n  a = \"a\"\n");
    assert_eq!(err.violations()[0].construct, Construct::Assignment);
}

#[test]
fn does_not_allow_arrow_functions() {
    let err = assert_logic_free_error("\n  (foo) => { return foo + 2 }\n");
    assert_eq!(err.violations()[0].construct, Construct::ArrowFunction);
}

#[test]
fn does_not_allow_member_calls() {
    let err = assert_logic_free_error("<a>{ foo.bar.zardoz() }</a>");
    assert_eq!(err.violations()[0].construct, Construct::Call);
}

#[test]
fn does_not_allow_arithmetic() {
    let err = assert_logic_free_error("<a>{ 1 + 1 }</a>");
    assert_eq!(err.violations()[0].construct, Construct::Binary("+"));
}

#[test]
fn does_not_allow_ternaries() {
    let err = assert_logic_free_error(r#"<a>{ foo ? "foo" : "bar" }</a>"#);
    assert_eq!(err.violations()[0].construct, Construct::Conditional);
}

#[test]
fn does_not_allow_logical_and() {
    let err = assert_logic_free_error(r#"<a>{ isTwo && "2" }</a>"#);
    assert_eq!(err.violations()[0].construct, Construct::Logical("&&"));
}

#[test]
fn does_not_allow_template_literals() {
    let err = assert_logic_free_error("<a>{ `1-${way}` }</a>");
    assert_eq!(err.violations()[0].construct, Construct::TemplateLiteral);
}

#[test]
fn does_not_allow_computed_members() {
    let err = assert_logic_free_error("<a>{ items[0] }</a>");
    assert_eq!(err.violations()[0].construct, Construct::ComputedMember);
}

#[test]
fn does_not_allow_negation() {
    let err = assert_logic_free_error("<a>{ !ready }</a>");
    assert_eq!(err.violations()[0].construct, Construct::Unary("!"));
}

#[test]
fn does_not_allow_logic_in_attributes() {
    assert_logic_free_error(r#"<a href={ base + "/home" } />"#);
    assert_logic_free_error("<a onClick={ () => go() } />");
}

#[test]
fn does_not_allow_spread_attributes() {
    let err = assert_logic_free_error("<a {...props} />");
    assert_eq!(err.violations()[0].construct, Construct::SpreadAttribute);
}

#[test]
fn does_not_allow_control_flow() {
    let err = assert_logic_free_error("if (ready) { <a /> }");
    assert_eq!(err.violations()[0].construct, Construct::Statement("if"));
    assert_logic_free_error("function page() { return <a /> }");
}

#[test]
fn does_not_allow_destructuring() {
    let err = assert_logic_free_error("const { title } = page");
    assert_eq!(err.violations()[0].construct, Construct::DestructuringBinding);
}

#[test]
fn does_not_allow_fragments_or_null() {
    assert_logic_free_error("<a><>x</></a>");
    assert_logic_free_error("<a>{ null }</a>");
}

#[test]
fn violation_span_points_at_the_construct() {
    let source = "<a>{ foo() }</a>";
    let err = assert_logic_free_error(source);
    let span = err.violations()[0].span;
    assert_eq!(&source[span.start..span.end], "foo()");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn first_violation_mode_stops_at_the_first() {
    let err = assert_logic_free_error("<a>{ a() }{ b && c }</a>");
    assert_eq!(err.violations().len(), 1);
}

#[test]
fn collect_mode_reports_all_violations_in_source_order() {
    let config = CompileConfig::default().error_mode(ErrorMode::Collect);
    let err = compile_template("<a>{ a() }{ b && c }{ `x` }</a>\nexport * from \"x\"", &config)
        .unwrap_err();
    let constructs: Vec<_> = err.violations().iter().map(|v| v.construct).collect();
    assert_eq!(
        constructs,
        vec![
            Construct::Call,
            Construct::Logical("&&"),
            Construct::TemplateLiteral,
            Construct::ExportAll,
        ]
    );
    assert_eq!(err.to_string(), "Jet templates are logic free");
}

#[test]
fn collect_mode_compiles_clean_templates() {
    let config = CompileConfig::default().error_mode(ErrorMode::Collect);
    let code = compile_template("<a>{ foo.bar }</a>", &config).unwrap();
    assert_eq!(code, "Easley.Jet.create(\"a\", null, foo.bar);\n");
}

#[test]
fn tsx_syntax_is_accepted() {
    let config = CompileConfig::default().syntax(SourceSyntax::Tsx);
    let code = compile_template("<div class=\"foo\" />", &config).unwrap();
    assert_eq!(code, "Easley.Jet.create(\"div\", { class: \"foo\" });\n");
}

#[test]
fn render_points_at_the_violation() {
    let source = "<ul>\n  <li>{ item() }</li>\n</ul>";
    let err = assert_logic_free_error(source);
    let rendered = err.render(source, "list.jsx");
    assert!(rendered.contains("error: Jet templates are logic free"));
    assert!(rendered.contains("--> list.jsx:2:9"));
    assert!(rendered.contains("call expression"));
}

// =============================================================================
// Logging
// =============================================================================

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn compiled_source_is_traced() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        compile_template("<div />", &CompileConfig::default().filename("page.jsx")).unwrap();
    });

    let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("compiled template"), "{output}");
    assert!(output.contains("page.jsx"), "{output}");
    assert!(output.contains("Easley.Jet.create(\"div\", null);"), "{output}");
}
