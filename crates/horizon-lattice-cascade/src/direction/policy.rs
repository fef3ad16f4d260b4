//! Which elements take part in directionality resolution, and how.

/// Element kinds and attribute names used by the direction resolver.
///
/// The defaults follow HTML: `dir` is the direction attribute, `<bdi>`
/// auto-detects, sniffing skips nested `<bdi>`, `<script>` and `<style>`,
/// and `<input>`/`<textarea>` contribute their value rather than their
/// markup. Element names are compared ASCII case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionalityPolicy {
    /// Attribute carrying `ltr`, `rtl` or `auto`.
    pub dir_attribute: String,
    /// Elements that sniff their content when no valid `dir` is present.
    pub auto_elements: Vec<String>,
    /// Elements whose subtrees are skipped while sniffing.
    pub skipped_elements: Vec<String>,
    /// Elements whose value, not their children, is sniffed.
    pub form_controls: Vec<String>,
    /// Also skip nested elements that carry their own valid `dir` value.
    pub skip_elements_with_dir: bool,
}

impl Default for DirectionalityPolicy {
    fn default() -> Self {
        Self {
            dir_attribute: "dir".to_string(),
            auto_elements: vec!["bdi".to_string()],
            skipped_elements: vec!["bdi".to_string(), "script".to_string(), "style".to_string()],
            form_controls: vec!["input".to_string(), "textarea".to_string()],
            skip_elements_with_dir: false,
        }
    }
}

impl DirectionalityPolicy {
    /// Create a policy with HTML defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direction attribute name.
    pub fn dir_attribute(mut self, name: impl Into<String>) -> Self {
        self.dir_attribute = name.into();
        self
    }

    /// Add an element kind that auto-detects its direction.
    pub fn auto_element(mut self, name: impl Into<String>) -> Self {
        self.auto_elements.push(name.into());
        self
    }

    /// Add an element kind whose subtree is skipped while sniffing.
    pub fn skip_element(mut self, name: impl Into<String>) -> Self {
        self.skipped_elements.push(name.into());
        self
    }

    /// Add a form-control element kind.
    pub fn form_control(mut self, name: impl Into<String>) -> Self {
        self.form_controls.push(name.into());
        self
    }

    /// Skip nested elements with their own valid `dir` while sniffing.
    pub fn skip_elements_with_dir(mut self, enabled: bool) -> Self {
        self.skip_elements_with_dir = enabled;
        self
    }

    /// Whether `name` auto-detects its direction.
    pub fn is_auto_element(&self, name: &str) -> bool {
        contains_ignore_case(&self.auto_elements, name)
    }

    /// Whether `name`'s subtree is skipped while sniffing.
    pub fn is_skipped(&self, name: &str) -> bool {
        contains_ignore_case(&self.skipped_elements, name)
    }

    /// Whether `name` is a form control.
    pub fn is_form_control(&self, name: &str) -> bool {
        contains_ignore_case(&self.form_controls, name)
    }
}

fn contains_ignore_case(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}
