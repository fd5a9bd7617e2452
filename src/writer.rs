//! Append-only, indent-aware text sink.
//!
//! Indentation is applied lazily: a line gets its indent when the first
//! non-empty text lands on it, so blank lines stay blank and a value written
//! inline after `name = ` keeps the cursor where it is. [`CodeWriter::scope`]
//! hands out a guard that dedents when dropped, which also covers `?` exits.

use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

use crate::naming::Symbol;

#[derive(Debug, Clone)]
pub struct CodeWriter {
    buf: String,
    indent: usize,
    indent_width: usize,
    at_line_start: bool,
    references: BTreeSet<Symbol>,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::with_indent(4)
    }

    pub fn with_indent(indent_width: usize) -> Self {
        Self {
            buf: String::new(),
            indent: 0,
            indent_width,
            at_line_start: true,
            references: BTreeSet::new(),
        }
    }

    /// Append inline text. Embedded newlines start new (indented) lines.
    pub fn write(&mut self, text: &str) -> &mut Self {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.push_fragment(first);
        }
        for line in lines {
            self.newline();
            self.push_fragment(line);
        }
        self
    }

    pub fn write_line(&mut self, text: &str) -> &mut Self {
        self.write(text);
        self.newline();
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self.at_line_start = true;
        self
    }

    /// Indent until the returned guard is dropped.
    pub fn scope(&mut self) -> Scope<'_> {
        self.indent += 1;
        Scope { writer: self }
    }

    pub fn register_reference(&mut self, symbol: Symbol) {
        self.references.insert(symbol);
    }

    pub fn references(&self) -> impl Iterator<Item = &Symbol> {
        self.references.iter()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Body text and collected references, sorted by fully qualified name.
    pub fn into_parts(self) -> (String, Vec<Symbol>) {
        (self.buf, self.references.into_iter().collect())
    }

    /// Body prefixed with one `import` line per distinct reference.
    pub fn into_source(self) -> String {
        let imports = self
            .references
            .iter()
            .map(Symbol::fully_qualified)
            .collect::<BTreeSet<_>>();
        if imports.is_empty() {
            return self.buf;
        }
        let mut out = String::new();
        for import in imports {
            out.push_str("import ");
            out.push_str(&import);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.buf);
        out
    }

    fn push_fragment(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            let width = self.indent * self.indent_width;
            self.buf.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
        self.buf.push_str(text);
    }
}

/// Indentation guard returned by [`CodeWriter::scope`].
pub struct Scope<'w> {
    writer: &'w mut CodeWriter,
}

impl Deref for Scope<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.writer.indent -= 1;
    }
}

/// Kotlin string literal, quotes included.
pub fn kotlin_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_applies_at_line_start_only() {
        let mut w = CodeWriter::with_indent(2);
        w.write("Outer {").newline();
        {
            let mut inner = w.scope();
            inner.write("a = ").write("1").newline();
            inner.write_line("b = 2");
        }
        w.write("}");
        assert_eq!(w.as_str(), "Outer {\n  a = 1\n  b = 2\n}");
    }

    #[test]
    fn scope_closes_on_early_return() {
        fn fails(w: &mut CodeWriter) -> Result<(), ()> {
            let mut inner = w.scope();
            inner.write("partial");
            Err(())
        }
        let mut w = CodeWriter::new();
        assert!(fails(&mut w).is_err());
        w.write("\nafter");
        assert_eq!(w.as_str(), "    partial\nafter");
    }

    #[test]
    fn blank_lines_carry_no_indent() {
        let mut w = CodeWriter::new();
        let mut inner = w.scope();
        inner.write("x\n\ny");
        drop(inner);
        assert_eq!(w.as_str(), "    x\n\n    y");
    }

    #[test]
    fn references_become_sorted_unique_imports() {
        let mut w = CodeWriter::new();
        w.register_reference(Symbol::new("b.pkg", "Zed"));
        w.register_reference(Symbol::new("a.pkg", "Alpha"));
        w.register_reference(Symbol::new("b.pkg", "Zed"));
        w.write("Alpha()");
        assert_eq!(w.references().count(), 2);
        assert_eq!(w.into_source(), "import a.pkg.Alpha\nimport b.pkg.Zed\n\nAlpha()");
    }

    #[test]
    fn kotlin_strings_escape_templates_and_controls() {
        assert_eq!(kotlin_string("plain"), "\"plain\"");
        assert_eq!(kotlin_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(kotlin_string("${x}"), "\"\\${x}\"");
        assert_eq!(kotlin_string("a\\b"), "\"a\\\\b\"");
        assert_eq!(kotlin_string("\u{1}"), "\"\\u0001\"");
    }
}
