//! Rustc-style rendering of compile errors with source context.

/// One-based line and column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    /// Resolves a byte offset. Offsets past the end clamp to the last position,
    /// and offsets inside a multi-byte character resolve to that character.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (idx, ch) in source.char_indices() {
            if idx >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

/// Configuration for formatting an error with source context.
pub struct ErrorFormat<'a> {
    message: &'a str,
    source: &'a str,
    position: usize,
    filename: &'a str,
    annotation: Option<String>,
    help: Option<&'a str>,
}

impl<'a> ErrorFormat<'a> {
    pub fn new(message: &'a str, source: &'a str, position: usize) -> Self {
        Self {
            message,
            source,
            position: position.min(source.len()),
            filename: "template.jsx",
            annotation: None,
            help: None,
        }
    }

    pub fn filename(mut self, filename: &'a str) -> Self {
        self.filename = filename;
        self
    }

    pub fn annotation(mut self, annotation: String) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }

    /// Formats the error.
    ///
    /// ```text
    /// error: Jet templates are logic free
    ///  --> page.jsx:1:5
    ///   |
    /// 1 | <a>{ foo() }</a>
    ///   |      ^ call expression
    /// help: templates may only read data
    /// ```
    pub fn format(&self) -> String {
        let loc = SourceLocation::from_offset(self.source, self.position);
        let mut msg = format!("error: {}\n", self.message);
        msg.push_str(&format!(" --> {}:{}:{}\n", self.filename, loc.line, loc.column));

        if let Some(line_content) = self.source.lines().nth(loc.line - 1) {
            let gutter = loc.line.to_string().len();
            let expanded = line_content.replace('\t', "    ");
            // Columns are counted in chars; tabs widen to four.
            let caret_col: usize = line_content
                .chars()
                .take(loc.column - 1)
                .map(|c| if c == '\t' { 4 } else { 1 })
                .sum();
            let annotation = self.annotation.as_deref().unwrap_or("");

            msg.push_str(&format!("{:>gutter$} |\n", ""));
            msg.push_str(&format!("{} | {}\n", loc.line, expanded.trim_end()));
            msg.push_str(
                format!("{:>gutter$} | {:>caret_col$}^ {}", "", "", annotation)
                    .trim_end(),
            );
            msg.push('\n');
        }

        if let Some(help) = self.help {
            msg.push_str(&format!("help: {help}\n"));
        }

        msg
    }
}
