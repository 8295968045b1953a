//! Markdown report builder.
//!
//! Collects an ordered list of sections and renders them exactly once.
//! Empty bullet sections are dropped at render time, so composers never
//! have to track whether an earlier section was conditionally skipped.

/// Ordered, render-once Markdown builder.
#[derive(Debug)]
pub struct ReportBuilder {
    title: String,
    sections: Vec<Section>,
}

#[derive(Debug)]
struct Section {
    heading: Option<String>,
    lines: Vec<String>,
}

impl ReportBuilder {
    /// Start a report with a top-level heading.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a free-standing paragraph.
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.sections.push(Section {
            heading: None,
            lines: vec![text.into()],
        });
        self
    }

    /// Append a heading followed by a bullet list.
    ///
    /// Omitted entirely when `items` is empty.
    pub fn bullets<S: AsRef<str>>(mut self, heading: impl Into<String>, items: &[S]) -> Self {
        if items.is_empty() {
            return self;
        }
        self.sections.push(Section {
            heading: Some(heading.into()),
            lines: items
                .iter()
                .map(|item| format!("- {}", item.as_ref()))
                .collect(),
        });
        self
    }

    /// Render the report to its final Markdown form.
    pub fn render(self) -> String {
        let mut blocks = vec![format!("## {}", self.title)];
        for section in self.sections {
            if let Some(heading) = section.heading {
                blocks.push(format!("### {}", heading));
            }
            if !section.lines.is_empty() {
                blocks.push(section.lines.join("\n"));
            }
        }
        blocks.join("\n\n")
    }
}
