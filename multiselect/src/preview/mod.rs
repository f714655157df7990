//! Markup preview for the diff/version viewer.

use serde_json::Value;
use std::collections::HashSet;

use crate::coerce;
use crate::descriptor::MultiselectDescriptor;
use crate::models::DiffPreview;

impl MultiselectDescriptor {
    /// Render the selected options as a markup list.
    ///
    /// Items follow the option list order, not the selection order, and show
    /// option labels. Selected tokens without a matching option are left out.
    /// Empty or non-sequence input yields [`DiffPreview::Empty`].
    pub fn get_diff_version_preview(&self, data: &Value) -> DiffPreview {
        let selected: HashSet<String> = match coerce::tokens(data) {
            Some(tokens) if !tokens.is_empty() => tokens.into_iter().collect(),
            Some(_) => return DiffPreview::Empty,
            None => {
                if !coerce::is_empty(data) {
                    log::debug!("'{}': no diff preview for non-sequence value", self.name());
                }
                return DiffPreview::Empty;
            }
        };

        let items: String = self
            .options()
            .iter()
            .filter(|option| selected.contains(&option.value))
            .map(|option| format!("<li>{}</li>", option.key))
            .collect();

        DiffPreview::markup(format!("<ul>{items}</ul>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectOption;
    use serde_json::json;

    fn colors() -> MultiselectDescriptor {
        let mut d = MultiselectDescriptor::new("colors");
        d.set_options(vec![
            SelectOption::new("Red", "r"),
            SelectOption::new("Green", "g"),
            SelectOption::new("Blue", "b"),
        ]);
        d
    }

    #[test]
    fn test_single_selected_label() {
        let mut d = MultiselectDescriptor::new("colors");
        d.set_options(vec![SelectOption::new("Red", "r"), SelectOption::new("Blue", "b")]);
        assert_eq!(d.get_diff_version_preview(&json!(["r"])), DiffPreview::markup("<ul><li>Red</li></ul>"));
    }

    #[test]
    fn test_items_follow_option_order() {
        let preview = colors().get_diff_version_preview(&json!(["b", "r"]));
        assert_eq!(preview.content(), Some("<ul><li>Red</li><li>Blue</li></ul>"));
    }

    #[test]
    fn test_unknown_tokens_skipped() {
        let preview = colors().get_diff_version_preview(&json!(["x", "g"]));
        assert_eq!(preview.content(), Some("<ul><li>Green</li></ul>"));

        let none_known = colors().get_diff_version_preview(&json!(["x"]));
        assert_eq!(none_known.content(), Some("<ul></ul>"));
    }

    #[test]
    fn test_empty_input_marker() {
        let d = colors();
        assert_eq!(d.get_diff_version_preview(&Value::Null), DiffPreview::Empty);
        assert_eq!(d.get_diff_version_preview(&json!([])), DiffPreview::Empty);
        assert_eq!(d.get_diff_version_preview(&json!("r")), DiffPreview::Empty);
    }
}
