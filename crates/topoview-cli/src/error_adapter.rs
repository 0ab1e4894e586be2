//! Error adapter for converting TopoviewError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! JSON errors carry the input text and a line/column position, so they are
//! rendered with a labeled snippet of the offending input. Every other error
//! becomes a plain diagnostic with a `topoview::<kind>` code.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceOffset, SourceSpan,
};

use topoview::TopoviewError;

/// Which stage rejected the schema text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonErrorKind {
    /// Not well-formed JSON.
    Syntax,
    /// Well-formed JSON with the wrong shape.
    Schema,
}

/// Adapter for JSON errors that point into the schema source.
pub struct JsonDiagnosticAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
    kind: JsonErrorKind,
}

impl<'a> JsonDiagnosticAdapter<'a> {
    /// Create a new adapter for a JSON error found in `src`.
    pub fn new(err: &'a serde_json::Error, src: &'a str, kind: JsonErrorKind) -> Self {
        Self { err, src, kind }
    }

    /// The span of the error position, or `None` when the error has no location.
    fn span(&self) -> Option<SourceSpan> {
        if self.err.line() == 0 {
            return None;
        }

        let offset = SourceOffset::from_location(self.src, self.err.line(), self.err.column());
        let offset = offset.offset().min(self.src.len());
        let len = usize::from(offset < self.src.len());
        Some(SourceSpan::new(offset.into(), len))
    }
}

impl fmt::Debug for JsonDiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDiagnosticAdapter")
            .field("err", &self.err)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for JsonDiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            JsonErrorKind::Syntax => write!(f, "Invalid JSON: {}", self.err),
            JsonErrorKind::Schema => write!(f, "Invalid schema: {}", self.err),
        }
    }
}

impl std::error::Error for JsonDiagnosticAdapter<'_> {}

impl MietteDiagnostic for JsonDiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind {
            JsonErrorKind::Syntax => "topoview::invalid_json",
            JsonErrorKind::Schema => "topoview::invalid_schema",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.kind {
            JsonErrorKind::Syntax => "the schema file must be a single well-formed JSON object",
            JsonErrorKind::Schema => {
                "every node needs `id`, `x`, `y` and `element_id`; every edge needs `source`, `target` and `type`"
            }
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`TopoviewError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a TopoviewError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TopoviewError::NotFound { .. } => "topoview::not_found",
            TopoviewError::Io(_) => "topoview::io",
            TopoviewError::InvalidJson { .. } => "topoview::invalid_json",
            TopoviewError::InvalidSchema { .. } => "topoview::invalid_schema",
            TopoviewError::NoNodes => "topoview::no_nodes",
            TopoviewError::Config(_) => "topoview::config",
            TopoviewError::Export(_) => "topoview::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TopoviewError::NotFound { .. } => "pass the schema path as the first argument",
            TopoviewError::NoNodes => "add at least one entry to the `nodes` list",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A JSON error with a location in the schema source.
    Json(JsonDiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Json(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Json(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Json(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Json(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Json(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`TopoviewError`] into a list of reportable errors.
///
/// JSON errors become a [`Reportable::Json`] with the source attached; every
/// other variant becomes a single [`Reportable::Error`].
pub fn to_reportables(err: &TopoviewError) -> Vec<Reportable<'_>> {
    match err {
        TopoviewError::InvalidJson { err: json_err, src } => vec![Reportable::Json(
            JsonDiagnosticAdapter::new(json_err, src, JsonErrorKind::Syntax),
        )],
        TopoviewError::InvalidSchema { err: json_err, src } => vec![Reportable::Json(
            JsonDiagnosticAdapter::new(json_err, src, JsonErrorKind::Schema),
        )],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render every reportable of `err` with `reporter`.
///
/// A report the handler fails to render falls back to its plain message.
pub fn render_reports(err: &TopoviewError, reporter: &GraphicalReportHandler) -> Vec<String> {
    to_reportables(err)
        .iter()
        .map(|reportable| {
            let mut writer = String::new();
            match reporter.render_report(&mut writer, reportable) {
                Ok(()) => writer,
                Err(_) => reportable.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use miette::GraphicalTheme;

    use topoview::schema;

    use super::*;

    fn schema_error(src: &str) -> TopoviewError {
        schema::parse(src).unwrap_err()
    }

    #[test]
    fn test_invalid_json_has_label() {
        let err = schema_error("{\n  \"nodes\": [\n    {\"id\": 1,,}\n  ]\n}");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let reportable = &reportables[0];
        assert!(matches!(reportable, Reportable::Json(_)));
        assert_eq!(
            reportable.code().map(|code| code.to_string()),
            Some("topoview::invalid_json".to_string())
        );
        assert!(reportable.to_string().starts_with("Invalid JSON"));

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        // The label sits on the third line, where the stray comma is
        let line_start = "{\n  \"nodes\": [\n".len();
        assert!(labels[0].offset() >= line_start);
    }

    #[test]
    fn test_invalid_schema_code() {
        let err = schema_error(r#"{"nodes": [{"id": 1, "x": 0, "element_id": "A"}]}"#);

        let reportables = to_reportables(&err);
        assert_eq!(
            reportables[0].code().map(|code| code.to_string()),
            Some("topoview::invalid_schema".to_string())
        );
        assert!(reportables[0].to_string().contains("missing field `y`"));
        assert!(reportables[0].help().is_some());
    }

    #[test]
    fn test_truncated_input_label_stays_in_bounds() {
        let src = r#"{"nodes": ["#;
        let err = schema_error(src);

        let reportables = to_reportables(&err);
        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert!(labels[0].offset() + labels[0].len() <= src.len());
    }

    #[test]
    fn test_plain_errors() {
        let err = TopoviewError::NotFound {
            path: PathBuf::from("schema.json"),
        };

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Schema file not found: schema.json");
                assert_eq!(
                    e.code().map(|code| code.to_string()),
                    Some("topoview::not_found".to_string())
                );
                assert!(e.labels().is_none());
            }
            Reportable::Json(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_render_reports_not_found() {
        let err = TopoviewError::NotFound {
            path: PathBuf::from("absent.json"),
        };
        let reporter = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());

        let reports = render_reports(&err, &reporter);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("not found"), "{}", reports[0]);
        assert!(reports[0].contains("topoview::not_found"));
        assert!(reports[0].contains("absent.json"));
    }

    #[test]
    fn test_render_reports_json_snippet() {
        let src = "{\n  \"nodes\": [\n    {\"id\": 1,,}\n  ]\n}";
        let err = schema_error(src);
        let reporter = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());

        let reports = render_reports(&err, &reporter);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("Invalid JSON"));
        assert!(reports[0].contains("{\"id\": 1,,}"));
    }

    #[test]
    fn test_no_nodes_has_help() {
        let err = TopoviewError::NoNodes;
        let reportables = to_reportables(&err);

        assert_eq!(
            reportables[0].code().map(|code| code.to_string()),
            Some("topoview::no_nodes".to_string())
        );
        assert!(reportables[0].help().is_some());
    }
}
