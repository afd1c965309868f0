/// Bash command prefixes that never need the gate chain.
///
/// Matching is a plain prefix test on the trimmed, lower-cased command, so
/// `ls` also admits `lsof` and `cat` admits `cat > file`.
pub const READ_ONLY_PREFIXES: &[&str] = &[
    "ls",
    "cat",
    "head",
    "tail",
    "grep",
    "find",
    "pwd",
    "echo",
    "git status",
    "git log",
    "git diff",
    "git show",
    "git branch",
    "node --version",
    "npm --version",
    "python --version",
    "which",
    "where",
    "type",
];

#[derive(Debug, Clone)]
pub struct ReadOnlyCommands {
    prefixes: Vec<String>,
}

impl Default for ReadOnlyCommands {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReadOnlyCommands {
    pub fn builtin() -> Self {
        Self {
            prefixes: READ_ONLY_PREFIXES.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Built-in prefixes followed by `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut this = Self::builtin();
        this.prefixes.extend(
            extra
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty()),
        );
        this
    }

    pub fn matches(&self, command: &str) -> bool {
        let cmd = command.trim().to_lowercase();
        self.prefixes.iter().any(|p| cmd.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_prefixes_match_case_insensitively() {
        let m = ReadOnlyCommands::builtin();
        assert!(m.matches("ls -la"));
        assert!(m.matches("   GIT STATUS --short"));
        assert!(m.matches("Python --version"));
        assert!(m.matches("git log --oneline -5"));
        assert!(m.matches("type cargo"));
    }

    #[test]
    fn mutating_commands_do_not_match() {
        let m = ReadOnlyCommands::builtin();
        assert!(!m.matches("git commit -m wip"));
        assert!(!m.matches("cargo test"));
        assert!(!m.matches("rm -rf target"));
        assert!(!m.matches(""));
        assert!(!m.matches("  npm install"));
    }

    #[test]
    fn prefix_matching_is_literal() {
        let m = ReadOnlyCommands::builtin();
        assert!(m.matches("lsof -i :8080"));
        assert!(m.matches("cat > notes.txt"));
        assert!(m.matches("typescript-build"));
    }

    #[test]
    fn extra_prefixes_extend_the_list() {
        let m = ReadOnlyCommands::with_extra(["Cargo Tree", " "]);
        assert!(m.matches("cargo tree -d"));
        assert!(m.matches("pwd"));
        assert_eq!(m.prefixes.len(), READ_ONLY_PREFIXES.len() + 1);
    }
}
