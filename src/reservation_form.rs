use log::debug;
use scraper::Html;

use crate::text_manipulators::selector;

/// The pre-filled inputs of a slot's reservation page, in document order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReservationForm {
    fields: Vec<(String, String)>,
}

impl ReservationForm {
    /// Scrapes the inputs a browser would submit: disabled inputs and
    /// unchecked checkboxes are left out.
    pub fn extract(html: &str) -> anyhow::Result<Self> {
        let document = Html::parse_document(html);
        let input_selector = selector("input")?;

        let mut form = Self::default();
        for input in document.select(&input_selector) {
            let element = input.value();
            if element.attr("disabled").is_some() {
                continue;
            }
            let is_checkbox = element
                .attr("type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"));
            if is_checkbox && element.attr("checked").is_none() {
                continue;
            }
            let Some(name) = element.attr("name") else {
                debug!("Skipping unnamed input {:?}", element);
                continue;
            };
            form.set(name, element.attr("value").unwrap_or_default());
        }

        Ok(form)
    }

    /// Later values for a name replace earlier ones, keeping the first position.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
