use std::collections::HashMap;

use anyhow::Context;
use log::{debug, warn};
use scraper::Html;

use crate::{
    error::{ReservationError, ReservationResult},
    text_manipulators::selector,
};

const GROUP_SIZE_FIELD_PREFIX: &str = "select_number_";

/// The form field that selects one group size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSizeOption {
    pub field_name: String,
    pub field_value: String,
}

impl GroupSizeOption {
    pub fn as_form(&self) -> [(&str, &str); 1] {
        [(self.field_name.as_str(), self.field_value.as_str())]
    }
}

#[derive(Debug, Default)]
pub struct GroupSizeOptions(HashMap<u32, GroupSizeOption>);

impl GroupSizeOptions {
    /// Collects every `select_number_<N>` input on the page.
    pub fn extract(html: &str) -> anyhow::Result<Self> {
        let document = Html::parse_document(html);
        let input_selector = selector(&format!("input[name^=\"{GROUP_SIZE_FIELD_PREFIX}\"]"))?;

        let mut options = HashMap::new();
        for input in document.select(&input_selector) {
            let field_name = input.value().attr("name").unwrap_or_default();
            let size = field_name[GROUP_SIZE_FIELD_PREFIX.len()..]
                .parse::<u32>()
                .with_context(|| format!("group size field {field_name:?} has no number"))?;
            let option = GroupSizeOption {
                field_name: field_name.to_string(),
                field_value: input.value().attr("value").unwrap_or_default().to_string(),
            };
            debug!("Group size {size} offered as {option:?}");
            if options.insert(size, option).is_some() {
                warn!("Group size {size} is offered more than once, using the last one");
            }
        }

        Ok(Self(options))
    }

    pub fn sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<_> = self.0.keys().copied().collect();
        sizes.sort_unstable();
        sizes
    }

    pub fn get(&self, size: u32) -> ReservationResult<&GroupSizeOption> {
        self.0
            .get(&size)
            .ok_or(ReservationError::GroupAmountNotAvailable(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP_PAGE: &str = r#"
        <form method="post">
            <input type="hidden" name="csrf" value="abc">
            <input type="submit" name="select_number_2" value="2 personen">
            <input type="submit" name="select_number_4" value="4 personen">
        </form>
    "#;

    #[test]
    fn test_extract_group_sizes() {
        let options = GroupSizeOptions::extract(GROUP_PAGE).unwrap();
        assert_eq!(options.sizes(), vec![2, 4]);
        assert_eq!(
            options.get(2).unwrap(),
            &GroupSizeOption {
                field_name: "select_number_2".into(),
                field_value: "2 personen".into(),
            }
        );
        assert_eq!(options.get(4).unwrap().field_name, "select_number_4");
    }

    #[test]
    fn test_missing_group_size() {
        let options = GroupSizeOptions::extract(GROUP_PAGE).unwrap();
        assert!(matches!(
            options.get(3),
            Err(ReservationError::GroupAmountNotAvailable(3))
        ));
    }

    #[test]
    fn test_page_without_options() {
        let options = GroupSizeOptions::extract("<form></form>").unwrap();
        assert!(options.sizes().is_empty());
        assert!(matches!(
            options.get(1),
            Err(ReservationError::GroupAmountNotAvailable(1))
        ));
    }

    #[test]
    fn test_non_numeric_suffix_is_an_error() {
        let page = r#"<input name="select_number_many" value="x">"#;
        assert!(GroupSizeOptions::extract(page).is_err());
    }
}
