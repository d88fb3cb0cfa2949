use smol_str::SmolStr;

/// Payload kind of a session variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Number,
    String,
}

/// A named session variable with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct SexpVariable {
    pub name: SmolStr,
    pub value: SmolStr,
    pub kind: VariableKind,
}

/// Read-only (during codec and resolver runs) table of session variables.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    entries: Vec<SexpVariable>,
}

impl VariableTable {
    pub fn new(entries: Vec<SexpVariable>) -> Self {
        Self { entries }
    }

    pub fn add(&mut self, name: &str, value: &str, kind: VariableKind) {
        self.entries.push(SexpVariable {
            name: SmolStr::from(name),
            value: SmolStr::from(value),
            kind,
        });
    }

    pub fn lookup(&self, name: &str) -> Option<&SexpVariable> {
        self.entries.iter().find(|v| v.name == name)
    }

    pub fn entries(&self) -> &[SexpVariable] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Joins a variable name and its current value into display text.
pub fn variable_display(name: &str, value: &str) -> SmolStr {
    SmolStr::from(format!("{name}({value})"))
}

/// Splits `name(value)` display text back into name and value.
///
/// Returns `None` when the text is not in display form.
pub fn split_variable_display(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let rest = &text[open + 1..];
    let value = rest.strip_suffix(')')?;
    if text[..open].is_empty() {
        return None;
    }
    Some((&text[..open], value))
}
