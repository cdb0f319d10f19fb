use crate::span::Span;

/// A compiler diagnostic (error or warning) tied to a source span.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic to stderr using ariadne.
    pub fn render(&self, filename: &str, source: &str) {
        use ariadne::{Color, Label, Report, ReportKind, Source};

        let start = self.span.start as usize;
        let end = (self.span.end as usize).max(start);

        let mut report = Report::build(ReportKind::Error, filename, start)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            );

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        let _ = report
            .finish()
            .eprint((filename, Source::from(source)));
    }
}

/// Render every diagnostic in `diags` against `source`, in order.
pub fn render_diagnostics(diags: &[Diagnostic], filename: &str, source: &str) {
    for d in diags {
        d.render(filename, source);
    }
}
