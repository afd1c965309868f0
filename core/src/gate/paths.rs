/// `\` separators become `/`.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Classifies write targets relative to the agent tool's own directory.
#[derive(Debug, Clone)]
pub struct PathRules {
    nested_marker: String,
    leading_marker: String,
    workflow_suffix: String,
}

impl PathRules {
    pub fn new(config_dir_name: &str, workflow_suffix: &str) -> Self {
        Self {
            nested_marker: format!("/{config_dir_name}/"),
            leading_marker: format!("{config_dir_name}/"),
            workflow_suffix: workflow_suffix.to_string(),
        }
    }

    /// True when `path` has the config directory as one of its segments.
    pub fn is_config_path(&self, path: &str) -> bool {
        let p = normalize_separators(path);
        p.contains(&self.nested_marker) || p.starts_with(&self.leading_marker)
    }

    pub fn is_workflow_document(&self, path: &str) -> bool {
        normalize_separators(path).contains(&self.workflow_suffix)
    }
}

impl Default for PathRules {
    fn default() -> Self {
        Self::new(".claude", "_workflow.json")
    }
}
