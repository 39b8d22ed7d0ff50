use std::fmt;

/// Separator between namespace segments in source-level names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Namespace-qualified name of a function or class.
///
/// Used as the primary key for symbol lookup. Comparison is exact; the
/// case-insensitive checks the host language requires live in the validator.
///
/// # Examples
///
/// ```
/// use zendgen_core::QualifiedName;
///
/// let foo = QualifiedName::new("Foo", vec!["Complex".into()]);
/// assert_eq!(foo.to_string(), "Complex\\Foo");
///
/// let global = QualifiedName::global("strlen");
/// assert_eq!(global.to_string(), "strlen");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Simple name (e.g., "Foo", "say_hello")
    pub name: String,
    /// Namespace path (e.g., ["Complex", "Sub"])
    /// Empty for global namespace
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a qualified string (e.g., `Complex\Foo`).
    ///
    /// Splits on `\` - the last segment is the name, rest is namespace.
    /// A leading `\` (fully qualified form) is normalized away.
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts: Vec<&str> = s
            .split(NAMESPACE_SEPARATOR)
            .filter(|p| !p.is_empty())
            .collect();
        match parts.pop() {
            None => Self::global(""),
            Some(name) => Self {
                name: name.to_string(),
                namespace: parts.into_iter().map(str::to_string).collect(),
            },
        }
    }

    /// Check if this is in the global namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Get the namespace as a joined string (`Complex\Sub`).
    pub fn namespace_string(&self) -> String {
        self.namespace.join("\\")
    }

    /// Create a child name within this namespace.
    ///
    /// Example: `Complex\Sub` + `Foo` = `Complex\Sub\Foo`
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut child_ns = self.namespace.clone();
        child_ns.push(self.name.clone());
        Self {
            name: name.into(),
            namespace: child_ns,
        }
    }

    /// Place `name` inside the namespace given as a path.
    pub fn in_namespace(namespace: &[String], name: impl Into<String>) -> Self {
        Self::new(name, namespace.to_vec())
    }

    /// Lowercased form used for case-insensitive identity checks.
    pub fn folded(&self) -> String {
        self.to_string().to_ascii_lowercase()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}\\{}", self.namespace.join("\\"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
