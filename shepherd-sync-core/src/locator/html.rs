//! HTML snapshots parsed with `scraper`.

use scraper::{ElementRef, Html, Selector};

use super::FieldLocator;
use crate::error::{SyncError, SyncResult};

/// A parsed page (or page fragment) saved from the browser.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        HtmlDocument {
            html: Html::parse_document(source),
        }
    }

    /// The whole document as a locator scope.
    pub fn root(&self) -> HtmlFragment<'_> {
        HtmlFragment {
            element: self.html.root_element(),
        }
    }

    /// The first element matching `selector`, i.e. the appointment form.
    pub fn fragment(&self, selector: &str) -> SyncResult<HtmlFragment<'_>> {
        let selector_parsed = parse_selector(selector)?;
        self.html
            .select(&selector_parsed)
            .next()
            .map(|element| HtmlFragment { element })
            .ok_or_else(|| {
                SyncError::Extraction(format!("appointment form '{}' not found", selector))
            })
    }
}

/// One element of an [`HtmlDocument`] and everything below it.
#[derive(Debug, Clone, Copy)]
pub struct HtmlFragment<'a> {
    element: ElementRef<'a>,
}

impl FieldLocator for HtmlFragment<'_> {
    fn find_one(&self, selector: &str) -> SyncResult<Option<String>> {
        let selector = parse_selector(selector)?;
        Ok(self.element.select(&selector).next().map(element_text))
    }

    fn find_all(&self, selector: &str) -> SyncResult<Vec<Self>> {
        let selector = parse_selector(selector)?;
        Ok(self
            .element
            .select(&selector)
            .map(|element| HtmlFragment { element })
            .collect())
    }
}

fn parse_selector(selector: &str) -> SyncResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| SyncError::Locator(format!("invalid selector '{}': {:?}", selector, e)))
}

/// Form controls carry their state in `value`; everything else in its text.
fn element_text(element: ElementRef<'_>) -> String {
    match element.value().name() {
        "input" => element.value().attr("value").unwrap_or_default().to_string(),
        _ => element.text().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="ReactModal__Content">
            <input data-test-id="date" value="2024-06-01T14:00:00Z">
            <textarea data-test-id="reason">Limping
  on left leg</textarea>
            <div class="card" data-test-id="card-1"><a class="name">Rex</a></div>
            <div class="card" data-test-id="card-2"><a class="name">Milo</a></div>
          </div>
        </body></html>
    "#;

    #[test]
    fn input_yields_value_attribute() {
        let doc = HtmlDocument::parse(PAGE);
        let form = doc.fragment(".ReactModal__Content").unwrap();
        assert_eq!(
            form.find_one(r#"[data-test-id="date"]"#).unwrap().as_deref(),
            Some("2024-06-01T14:00:00Z")
        );
    }

    #[test]
    fn other_elements_yield_text() {
        let doc = HtmlDocument::parse(PAGE);
        let form = doc.fragment(".ReactModal__Content").unwrap();
        assert_eq!(
            form.find_one(r#"[data-test-id="reason"]"#).unwrap().as_deref(),
            Some("Limping\n  on left leg")
        );
    }

    #[test]
    fn find_all_keeps_document_order_and_scopes() {
        let doc = HtmlDocument::parse(PAGE);
        let form = doc.fragment(".ReactModal__Content").unwrap();
        let cards = form.find_all(r#"[data-test-id^="card-"]"#).unwrap();

        let names: Vec<_> = cards
            .iter()
            .map(|card| card.find_one(".name").unwrap().unwrap())
            .collect();
        assert_eq!(names, vec!["Rex", "Milo"]);
    }

    #[test]
    fn missing_element_is_none() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.root().find_one(".nothing-here").unwrap(), None);
    }

    #[test]
    fn invalid_selector_is_locator_error() {
        let doc = HtmlDocument::parse(PAGE);
        let err = doc.root().find_one("[[[").unwrap_err();
        assert!(matches!(err, SyncError::Locator(_)));
    }

    #[test]
    fn missing_form_is_extraction_error() {
        let doc = HtmlDocument::parse("<p>no modal</p>");
        let err = doc.fragment(".ReactModal__Content").unwrap_err();
        assert!(matches!(err, SyncError::Extraction(_)));
    }
}
