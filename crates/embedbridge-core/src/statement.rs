//! Script statement rendering and parsing.
//!
//! Every accessor of the bridge goes through [`StatementBuilder`], which owns
//! the root path, the optional content scope key and the argument encoding.
//!
//! ```text
//! <root><namespace segment><member>[(<'arg'>,...) | ='<value>'];
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Sub-object grouping under the embedded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Members of the object itself.
    Direct,
    /// `content.`
    Content,
    /// `content.<scope key>.`, or `content.` when no scope key is configured.
    ScopedContent,
    /// `settings.`
    Settings,
}

/// What a statement does with its member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Bare property read.
    Read,
    /// Method call with quoted arguments.
    Call(Vec<String>),
    /// Property assignment of a quoted value.
    Assign(String),
}

/// How argument values are embedded between single quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentEncoding {
    /// Values are embedded as-is. A value holding `'` breaks the statement.
    #[default]
    Verbatim,
    /// Backslash, single quote, CR and LF are backslash-escaped.
    Escaped,
}

impl ArgumentEncoding {
    fn quote_into(self, value: &str, out: &mut String) {
        out.push('\'');
        match self {
            ArgumentEncoding::Verbatim => out.push_str(value),
            ArgumentEncoding::Escaped => {
                for c in value.chars() {
                    match c {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        _ => out.push(c),
                    }
                }
            }
        }
        out.push('\'');
    }

    fn unquote_list(self, text: &str) -> Option<Vec<String>> {
        if text.is_empty() {
            return Some(Vec::new());
        }
        match self {
            ArgumentEncoding::Verbatim => {
                let inner = strip_quotes(text)?;
                Some(inner.split("','").map(str::to_string).collect())
            }
            ArgumentEncoding::Escaped => unescape_list(text),
        }
    }

    fn unquote(self, text: &str) -> Option<String> {
        match self {
            ArgumentEncoding::Verbatim => strip_quotes(text).map(str::to_string),
            ArgumentEncoding::Escaped => {
                let mut values = unescape_list(text)?;
                if values.len() == 1 { values.pop() } else { None }
            }
        }
    }
}

fn strip_quotes(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    text.strip_prefix('\'')?.strip_suffix('\'')
}

fn unescape_list(text: &str) -> Option<Vec<String>> {
    let mut values = Vec::new();
    let mut chars = text.chars();
    loop {
        if chars.next()? != '\'' {
            return None;
        }
        let mut value = String::new();
        loop {
            match chars.next()? {
                '\\' => match chars.next()? {
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    c => value.push(c),
                },
                '\'' => break,
                c => value.push(c),
            }
        }
        values.push(value);
        match chars.next() {
            None => return Some(values),
            Some(',') => continue,
            Some(_) => return None,
        }
    }
}

/// A rendered statement, ready to be submitted to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStatement {
    namespace: Namespace,
    member: String,
    invocation: Invocation,
    text: String,
}

impl ScriptStatement {
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// The statement text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for ScriptStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders statements against a fixed root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementBuilder {
    root: String,
    scope_key: Option<String>,
    encoding: ArgumentEncoding,
}

impl StatementBuilder {
    /// Create a builder for a root path such as `document['panel1'].`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            scope_key: None,
            encoding: ArgumentEncoding::default(),
        }
    }

    /// Set the content scope key. Empty keys are ignored.
    pub fn with_scope_key(mut self, scope_key: Option<&str>) -> Self {
        self.scope_key = scope_key.filter(|k| !k.is_empty()).map(str::to_string);
        self
    }

    pub fn with_encoding(mut self, encoding: ArgumentEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn scope_key(&self) -> Option<&str> {
        self.scope_key.as_deref()
    }

    pub fn encoding(&self) -> ArgumentEncoding {
        self.encoding
    }

    /// `<root><ns><member>;`
    pub fn read(&self, namespace: Namespace, member: &str) -> ScriptStatement {
        self.build(namespace, member, Invocation::Read)
    }

    /// `<root><ns><member>('a','b');`
    pub fn call<S: AsRef<str>>(&self, namespace: Namespace, member: &str, args: &[S]) -> ScriptStatement {
        let args = args.iter().map(|a| a.as_ref().to_string()).collect();
        self.build(namespace, member, Invocation::Call(args))
    }

    /// `<root><ns><member>='value';`
    pub fn assign(&self, namespace: Namespace, member: &str, value: &str) -> ScriptStatement {
        self.build(namespace, member, Invocation::Assign(value.to_string()))
    }

    fn build(&self, namespace: Namespace, member: &str, invocation: Invocation) -> ScriptStatement {
        let namespace = match (namespace, &self.scope_key) {
            (Namespace::ScopedContent, None) => Namespace::Content,
            (ns, _) => ns,
        };

        let mut text = String::with_capacity(self.root.len() + member.len() + 16);
        text.push_str(&self.root);
        match namespace {
            Namespace::Direct => {}
            Namespace::Content => text.push_str("content."),
            Namespace::ScopedContent => {
                text.push_str("content.");
                if let Some(key) = &self.scope_key {
                    text.push_str(key);
                    text.push('.');
                }
            }
            Namespace::Settings => text.push_str("settings."),
        }
        text.push_str(member);

        match &invocation {
            Invocation::Read => {}
            Invocation::Call(args) => {
                text.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        text.push(',');
                    }
                    self.encoding.quote_into(arg, &mut text);
                }
                text.push(')');
            }
            Invocation::Assign(value) => {
                text.push('=');
                self.encoding.quote_into(value, &mut text);
            }
        }
        text.push(';');

        ScriptStatement {
            namespace,
            member: member.to_string(),
            invocation,
            text,
        }
    }

    /// Parse statement text rendered by this builder back into its parts.
    pub fn parse(&self, text: &str) -> Result<ScriptStatement> {
        let malformed = || BridgeError::MalformedStatement(text.to_string());

        let body = text
            .strip_prefix(self.root.as_str())
            .and_then(|s| s.strip_suffix(';'))
            .ok_or_else(malformed)?;
        let (namespace, rest) = self.split_namespace(body);

        let (member, invocation) = match rest.find(['(', '=']) {
            Some(pos) if rest[pos..].starts_with('(') => {
                let args = rest[pos + 1..].strip_suffix(')').ok_or_else(malformed)?;
                let args = self.encoding.unquote_list(args).ok_or_else(malformed)?;
                (&rest[..pos], Invocation::Call(args))
            }
            Some(pos) => {
                let value = self.encoding.unquote(&rest[pos + 1..]).ok_or_else(malformed)?;
                (&rest[..pos], Invocation::Assign(value))
            }
            None => (rest, Invocation::Read),
        };

        if member.is_empty() {
            return Err(malformed());
        }
        Ok(self.build(namespace, member, invocation))
    }

    fn split_namespace<'a>(&self, body: &'a str) -> (Namespace, &'a str) {
        if let Some(rest) = body.strip_prefix("content.") {
            let scoped = self
                .scope_key
                .as_deref()
                .and_then(|key| rest.strip_prefix(key))
                .and_then(|r| r.strip_prefix('.'));
            return match scoped {
                Some(r) => (Namespace::ScopedContent, r),
                None => (Namespace::Content, rest),
            };
        }
        if let Some(rest) = body.strip_prefix("settings.") {
            return (Namespace::Settings, rest);
        }
        (Namespace::Direct, body)
    }
}

#[cfg(test)]
#[path = "statement_tests.rs"]
mod tests;
