/// Extension-based language classification and ignore rules.
///
/// A [`Classifier`] answers three questions about a directory entry:
/// which language a file belongs to (by its extension), whether a
/// directory should be pruned from traversal, and whether a file should
/// be skipped outright regardless of its extension (lockfiles).
///
/// Classification is purely functional: unknown input yields "not
/// classified" / "not ignored", never an error.
use compact_str::CompactString;
use std::collections::{HashMap, HashSet};

/// Default per-file size ceiling: files larger than this are skipped
/// uncounted to bound memory use (5 MiB).
pub const DEFAULT_SIZE_LIMIT_BYTES: u64 = 5_242_880;

/// Built-in extension → display-name table (lowercase keys).
///
/// Covers the common source, markup, and config extensions. Extend a
/// `Classifier` instance with [`Classifier::add_language`] rather than
/// editing this table at runtime.
pub const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    // Systems
    ("rs", "Rust"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("cxx", "C++"),
    ("hpp", "C++"),
    ("hh", "C++"),
    ("zig", "Zig"),
    ("nim", "Nim"),
    ("go", "Go"),
    // Managed / scripting
    ("py", "Python"),
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("cs", "C#"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("kts", "Kotlin"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("m", "Objective-C"),
    ("scala", "Scala"),
    ("pl", "Perl"),
    ("lua", "Lua"),
    ("r", "R"),
    ("dart", "Dart"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("erl", "Erlang"),
    ("hs", "Haskell"),
    ("clj", "Clojure"),
    ("elm", "Elm"),
    // Shells
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("ps1", "PowerShell"),
    ("bat", "Batch"),
    ("cmd", "Batch"),
    // Web / markup
    ("html", "HTML"),
    ("htm", "HTML"),
    ("css", "CSS"),
    ("scss", "SCSS"),
    ("sass", "Sass"),
    ("less", "Less"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("md", "Markdown"),
    ("xml", "XML"),
    // Data / config
    ("sql", "SQL"),
    ("json", "JSON"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("toml", "TOML"),
    ("ini", "INI"),
    ("proto", "Protocol Buffers"),
    ("graphql", "GraphQL"),
    ("tf", "Terraform"),
];

/// Directory basenames never descended into. Exact, case-sensitive.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    "dist",
    "build",
    "out",
    "target",
    "bin",
    "obj",
    ".next",
    ".nuxt",
    ".cache",
    "coverage",
    "vendor",
    "__pycache__",
    "venv",
    "env",
    ".idea",
    ".vscode",
];

/// File basenames never counted, even when their extension is
/// recognised (lockfiles are machine-generated noise). Exact,
/// case-sensitive, checked before extension classification.
pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
];

/// Maps file names to languages and holds the ignore rules.
///
/// `Default` loads the built-in tables; instances can be extended for
/// callers that need extra languages or ignore rules. Cheap to clone,
/// immutable once handed to a scan.
#[derive(Debug, Clone)]
pub struct Classifier {
    languages: HashMap<CompactString, CompactString>,
    ignored_dirs: HashSet<CompactString>,
    ignored_files: HashSet<CompactString>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES
                .iter()
                .map(|&(ext, name)| (CompactString::new(ext), CompactString::new(name)))
                .collect(),
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().copied().map(CompactString::new).collect(),
            ignored_files: DEFAULT_IGNORED_FILES.iter().copied().map(CompactString::new).collect(),
        }
    }
}

impl Classifier {
    /// Classify a file name by the substring after its last `.`.
    ///
    /// Returns the language display name, or `None` when the file has no
    /// extension or the extension is unrecognised — such files are
    /// skipped by the scanner, uncounted; this is not an error.
    ///
    /// Zero-heap-allocation hot path: the extension is lowercased into a
    /// fixed-size stack buffer. Extensions longer than 16 bytes are
    /// never in the table, so they short-circuit to `None`.
    pub fn language_for(&self, file_name: &str) -> Option<&str> {
        let ext = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext,
            // No '.' at all — unclassified.
            None => return None,
        };

        let bytes = ext.as_bytes();
        if bytes.is_empty() || bytes.len() > 16 {
            return None;
        }

        let mut lower = [0u8; 16];
        for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
            *dest = src.to_ascii_lowercase();
        }
        let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
            Ok(s) => s,
            Err(_) => return None,
        };

        self.languages.get(lower_str).map(|name| name.as_str())
    }

    /// Exact, case-sensitive test against the ignored-directory set.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.contains(name)
    }

    /// Exact, case-sensitive test against the ignored-file set.
    ///
    /// Applied before extension classification, so a recognised-extension
    /// file with an ignored exact name (e.g. `package-lock.json`) is
    /// still skipped.
    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignored_files.contains(name)
    }

    /// Register an additional extension → display-name mapping.
    /// The extension is stored lowercased.
    pub fn add_language(&mut self, extension: &str, display_name: &str) -> &mut Self {
        self.languages.insert(
            CompactString::new(extension.to_ascii_lowercase()),
            CompactString::new(display_name),
        );
        self
    }

    /// Add a directory basename to the ignored-directory set.
    pub fn ignore_dir(&mut self, name: &str) -> &mut Self {
        self.ignored_dirs.insert(CompactString::new(name));
        self
    }

    /// Add a file basename to the ignored-file set.
    pub fn ignore_file(&mut self, name: &str) -> &mut Self {
        self.ignored_files.insert(CompactString::new(name));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── language_for ─────────────────────────────────────────────────────

    #[test]
    fn classify_common_source_extensions() {
        let c = Classifier::default();
        assert_eq!(c.language_for("main.rs"), Some("Rust"));
        assert_eq!(c.language_for("app.py"), Some("Python"));
        assert_eq!(c.language_for("index.js"), Some("JavaScript"));
        assert_eq!(c.language_for("component.tsx"), Some("TypeScript"));
        assert_eq!(c.language_for("Makefile.toml"), Some("TOML"));
    }

    /// Extension matching must be case-insensitive so "PY" == "py".
    #[test]
    fn classify_case_insensitive() {
        let c = Classifier::default();
        assert_eq!(c.language_for("LEGACY.PY"), Some("Python"));
        assert_eq!(c.language_for("Main.RS"), Some("Rust"));
    }

    /// Only the substring after the *last* dot is the extension.
    #[test]
    fn classify_uses_last_dot() {
        let c = Classifier::default();
        assert_eq!(c.language_for("archive.tar.py"), Some("Python"));
        assert_eq!(c.language_for("jquery.min.js"), Some("JavaScript"));
    }

    #[test]
    fn classify_unknown_or_missing_extension() {
        let c = Classifier::default();
        assert_eq!(c.language_for("payload.bin"), None);
        assert_eq!(c.language_for("setup.exe"), None);
        assert_eq!(c.language_for("README"), None);
        assert_eq!(c.language_for("trailing."), None);
        // Dotfiles: "gitignore" is the extension and is unrecognised.
        assert_eq!(c.language_for(".gitignore"), None);
    }

    /// Extensions longer than the stack buffer can never match.
    #[test]
    fn classify_overlong_extension() {
        let c = Classifier::default();
        assert_eq!(c.language_for("x.averylongextensionname"), None);
    }

    #[test]
    fn classify_added_language() {
        let mut c = Classifier::default();
        c.add_language("Vala", "Vala");
        assert_eq!(c.language_for("widget.vala"), Some("Vala"));
    }

    // ── ignore rules ─────────────────────────────────────────────────────

    #[test]
    fn ignored_dirs_exact_case_sensitive() {
        let c = Classifier::default();
        assert!(c.is_ignored_dir("node_modules"));
        assert!(c.is_ignored_dir(".git"));
        assert!(c.is_ignored_dir("__pycache__"));
        assert!(!c.is_ignored_dir("Node_Modules"));
        assert!(!c.is_ignored_dir("node_modules_backup"));
    }

    #[test]
    fn ignored_files_exact_case_sensitive() {
        let c = Classifier::default();
        assert!(c.is_ignored_file("package-lock.json"));
        assert!(c.is_ignored_file("yarn.lock"));
        assert!(!c.is_ignored_file("Package-Lock.json"));
        assert!(!c.is_ignored_file("package.json"));
    }

    /// A lockfile keeps a recognised extension but must still be ignored;
    /// the scanner checks the ignore rule first.
    #[test]
    fn lockfile_classifies_but_is_ignored() {
        let c = Classifier::default();
        assert_eq!(c.language_for("package-lock.json"), Some("JSON"));
        assert!(c.is_ignored_file("package-lock.json"));
    }

    #[test]
    fn custom_ignore_rules() {
        let mut c = Classifier::default();
        c.ignore_dir("generated").ignore_file("schema.sql");
        assert!(c.is_ignored_dir("generated"));
        assert!(c.is_ignored_file("schema.sql"));
    }
}
