//! Renders the statement model as Rust source.
//!
//! Output is indented but not canonical; the assembler runs the whole unit
//! through the formatter afterwards.

use crate::assertion::{Assertion, Literal};
use crate::config::ParserTarget;
use std::time::Duration;

// =============================================================================
// SOURCE BUFFER
// =============================================================================

/// Append-only line buffer with indentation tracking.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buffer: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.buffer.push_str("    ");
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    pub fn close(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

// =============================================================================
// RUST RENDERER
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct RustRenderer<'a> {
    target: &'a ParserTarget,
}

impl<'a> RustRenderer<'a> {
    pub fn new(target: &'a ParserTarget) -> Self {
        Self { target }
    }

    /// Writes one `#[test]` function named `name` holding `assertions`.
    pub fn render_test(&self, out: &mut SourceWriter, name: &str, assertions: &[Assertion]) {
        out.line("#[test]");
        out.open(&format!("fn {name}() {{"));
        for assertion in assertions {
            self.render_assertion(out, assertion);
        }
        out.close("}");
    }

    pub fn render_assertion(&self, out: &mut SourceWriter, assertion: &Assertion) {
        let parse = self.target.function_name();
        let uri = &self.target.binding;
        match assertion {
            Assertion::ParseFails { uri: input } => {
                out.line(&format!(
                    "assert!({parse}({input}).is_err(), \"expected an error but didn't get one\");"
                ));
            }
            Assertion::ParseSucceeds { uri: input } => {
                out.open(&format!("let {uri} = match {parse}({input}) {{"));
                out.line(&format!("Ok({uri}) => {uri},"));
                out.line(&format!(
                    "Err(err) => panic!(\"error parsing {{:?}}: {{}}\", {input}, err),"
                ));
                out.close("};");
            }
            Assertion::HostCount { expected } => {
                out.line(&format!(
                    "assert_eq!({uri}.hosts.len(), {expected}, \"expected {expected} hosts, but had {{}}: {{:?}}\", {uri}.hosts.len(), {uri}.hosts);"
                ));
            }
            Assertion::HostEquals { index, expected } => {
                let observed = format!("{uri}.hosts[{index}].to_string()");
                let label = format!("{uri}.hosts[{index}]");
                self.equality(out, &label, &observed, &expected.to_string());
            }
            Assertion::FieldEquals { field, expected } => {
                let observed = format!("{uri}.{}", field.accessor());
                self.equality(out, &observed, &observed, &expected.to_string());
            }
            Assertion::PasswordUnset => {
                out.line(&format!(
                    "assert!(!{uri}.password_set, \"expected password to not be set\");"
                ));
            }
            Assertion::PropertyEquals { key, expected } => {
                let observed = format!("{uri}.auth_mechanism_properties.get({key}).map(String::as_str)");
                let label = format!("{uri}.auth_mechanism_properties[{key}]");
                self.equality(out, &label, &observed, &format!("Some({expected})"));
            }
            Assertion::WriteTimeout { expected } => {
                let observed = format!("{uri}.w_timeout");
                self.equality(out, &observed, &observed, &duration_expr(*expected));
            }
        }
    }

    /// `assert_eq!` naming the field, the expected value and the observed value.
    fn equality(&self, out: &mut SourceWriter, label: &str, observed: &str, expected: &str) {
        let label = Literal::new(label);
        out.line(&format!(
            "assert_eq!({observed}, {expected}, \"expected {{}} to be {{:?}}, but got {{:?}}\", {label}, {expected}, {observed});"
        ));
    }
}

/// Shortest exact `Duration` constructor for `duration`.
pub fn duration_expr(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos % 1_000_000_000 == 0 {
        format!("Duration::from_secs({})", duration.as_secs())
    } else if nanos % 1_000_000 == 0 {
        format!("Duration::from_millis({})", duration.as_millis())
    } else {
        format!("Duration::from_nanos({nanos})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::Field;

    fn render(assertion: Assertion) -> String {
        let target = ParserTarget::default();
        let mut out = SourceWriter::new();
        RustRenderer::new(&target).render_assertion(&mut out, &assertion);
        out.into_string()
    }

    #[test]
    fn failure_assertion() {
        let text = render(Assertion::ParseFails {
            uri: Literal::new("mongodb://localhost:27017:abc"),
        });
        assert_eq!(
            text,
            "assert!(parse_uri(\"mongodb://localhost:27017:abc\").is_err(), \"expected an error but didn't get one\");\n"
        );
    }

    #[test]
    fn success_binds_result_and_reports_input() {
        let text = render(Assertion::ParseSucceeds {
            uri: Literal::new("mongodb://example.com"),
        });
        assert!(text.starts_with("let uri = match parse_uri(\"mongodb://example.com\") {\n"));
        assert!(text.contains("    Ok(uri) => uri,\n"));
        assert!(text.contains("panic!(\"error parsing {:?}: {}\", \"mongodb://example.com\", err)"));
        assert!(text.ends_with("};\n"));
    }

    #[test]
    fn host_equality_uses_index_and_rendering() {
        let text = render(Assertion::HostEquals {
            index: 1,
            expected: Literal::new("[::1]:27017"),
        });
        assert!(text.starts_with("assert_eq!(uri.hosts[1].to_string(), \"[::1]:27017\","));
        assert!(text.contains("\"uri.hosts[1]\""));
    }

    #[test]
    fn field_equality_keeps_escapes() {
        let text = render(Assertion::field(Field::Username, "a\0b"));
        assert!(text.starts_with(r#"assert_eq!(uri.username, "a\x00b", "#));
    }

    #[test]
    fn property_equality_compares_options() {
        let text = render(Assertion::PropertyEquals {
            key: Literal::new("SERVICE_NAME"),
            expected: Literal::new("other"),
        });
        assert!(text.starts_with(
            "assert_eq!(uri.auth_mechanism_properties.get(\"SERVICE_NAME\").map(String::as_str), Some(\"other\"),"
        ));
        assert!(text.contains(r#""uri.auth_mechanism_properties[\"SERVICE_NAME\"]""#));
    }

    #[test]
    fn password_unset_checks_flag() {
        assert_eq!(
            render(Assertion::PasswordUnset),
            "assert!(!uri.password_set, \"expected password to not be set\");\n"
        );
    }

    #[test]
    fn durations_use_the_coarsest_exact_unit() {
        assert_eq!(duration_expr(Duration::from_millis(1000)), "Duration::from_secs(1)");
        assert_eq!(duration_expr(Duration::from_millis(5000)), "Duration::from_secs(5)");
        assert_eq!(duration_expr(Duration::from_millis(10)), "Duration::from_millis(10)");
        assert_eq!(duration_expr(Duration::ZERO), "Duration::from_secs(0)");
        assert_eq!(duration_expr(Duration::from_nanos(1500)), "Duration::from_nanos(1500)");
    }

    #[test]
    fn test_function_wraps_body() {
        let target = ParserTarget::default();
        let mut out = SourceWriter::new();
        RustRenderer::new(&target).render_test(
            &mut out,
            "parse_uri_Empty_string",
            &[Assertion::ParseFails { uri: Literal::empty() }],
        );
        assert_eq!(
            out.as_str(),
            "#[test]\nfn parse_uri_Empty_string() {\n    assert!(parse_uri(\"\").is_err(), \"expected an error but didn't get one\");\n}\n"
        );
    }
}
