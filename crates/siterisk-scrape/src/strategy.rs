//! Extraction strategies over parsed HTML.
//!
//! A [`Strategy`] is one attempt to locate a field's text in a page: an
//! ordered CSS selector list, an optional hop relative to the matched
//! element, and an optional custom text extractor. Strategies are data, not
//! closures-with-behavior — one execution function interprets them all.
//!
//! `scraper::Html` is not `Send`; parsing and strategy execution stay
//! synchronous and never cross an await point.

use scraper::{ElementRef, Html, Selector};

/// Custom text extraction from a matched element, used when plain text
/// collection is not enough (e.g. pulling an attribute or a prefix).
pub type TextExtractor = fn(&ElementRef<'_>) -> Option<String>;

/// Where to read text from, relative to the element a selector matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingHop {
    /// The next element sibling — the classic label-cell → value-cell walk.
    NextElement,
    /// The parent element, when the selector can only anchor on a child.
    Parent,
}

pub struct Strategy {
    /// CSS selectors tried in order; the first that matches an element with
    /// non-empty extracted text wins this strategy.
    pub selectors: Vec<&'static str>,
    pub sibling: Option<SiblingHop>,
    pub extractor: Option<TextExtractor>,
}

impl Strategy {
    /// Plain text at the first match of any of `selectors`.
    #[must_use]
    pub fn select(selectors: Vec<&'static str>) -> Self {
        Self {
            selectors,
            sibling: None,
            extractor: None,
        }
    }

    /// Text of the element `hop` away from the first match.
    #[must_use]
    pub fn select_then(selectors: Vec<&'static str>, hop: SiblingHop) -> Self {
        Self {
            selectors,
            sibling: Some(hop),
            extractor: None,
        }
    }

    /// Custom extraction at the first match.
    #[must_use]
    pub fn select_with(selectors: Vec<&'static str>, extractor: TextExtractor) -> Self {
        Self {
            selectors,
            sibling: None,
            extractor: Some(extractor),
        }
    }
}

/// Run one strategy against a parsed document.
///
/// Iterates the selector list in declared order; within a selector, takes
/// the first element whose (hopped, extracted) text is non-empty. Invalid
/// selectors are skipped with a warning rather than failing the field.
#[must_use]
pub fn run_strategy(doc: &Html, strategy: &Strategy) -> Option<String> {
    for raw_selector in &strategy.selectors {
        let Ok(selector) = Selector::parse(raw_selector) else {
            tracing::warn!(selector = raw_selector, "skipping unparseable selector");
            continue;
        };

        for element in doc.select(&selector) {
            let Some(target) = apply_hop(element, strategy.sibling) else {
                continue;
            };
            let text = match strategy.extractor {
                Some(extract) => extract(&target),
                None => Some(collect_text(&target)),
            };
            if let Some(text) = text {
                let text = text.trim().to_owned();
                if !text.is_empty() {
                    tracing::debug!(selector = raw_selector, "strategy selector matched");
                    return Some(text);
                }
            }
        }
    }
    None
}

fn apply_hop<'a>(element: ElementRef<'a>, hop: Option<SiblingHop>) -> Option<ElementRef<'a>> {
    match hop {
        None => Some(element),
        Some(SiblingHop::NextElement) => {
            // Text nodes sit between element siblings; walk until the next
            // actual element.
            let mut node = element.next_sibling();
            while let Some(candidate) = node {
                if let Some(sibling) = ElementRef::wrap(candidate) {
                    return Some(sibling);
                }
                node = candidate.next_sibling();
            }
            None
        }
        Some(SiblingHop::Parent) => element.parent().and_then(ElementRef::wrap),
    }
}

/// Element text with whitespace runs collapsed.
#[must_use]
pub fn collect_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <div id="summary">
                <h2 class="title">Property Summary</h2>
                <table>
                    <tr><th class="label">Land size</th><td>650 m&#178;</td></tr>
                    <tr><th class="label">Year built</th><td> 1968 </td></tr>
                </table>
                <span class="empty"></span>
                <a class="link" href="/zones/fire">Fire zone map</a>
            </div>
        </body></html>
    "#;

    fn doc() -> Html {
        Html::parse_document(PAGE)
    }

    #[test]
    fn plain_select_takes_first_match_text() {
        let strategy = Strategy::select(vec!["h2.title"]);
        assert_eq!(
            run_strategy(&doc(), &strategy),
            Some("Property Summary".to_owned())
        );
    }

    #[test]
    fn selector_order_decides_within_a_strategy() {
        let strategy = Strategy::select(vec!["h2.missing", "h2.title"]);
        assert_eq!(
            run_strategy(&doc(), &strategy),
            Some("Property Summary".to_owned())
        );
    }

    #[test]
    fn next_element_hop_reads_the_value_cell() {
        let strategy = Strategy::select_then(vec!["th.label"], SiblingHop::NextElement);
        // First label row is "Land size"; its next element is the td.
        assert_eq!(run_strategy(&doc(), &strategy), Some("650 m²".to_owned()));
    }

    #[test]
    fn parent_hop_reads_the_enclosing_element() {
        let strategy = Strategy::select_then(vec!["a.link"], SiblingHop::Parent);
        let text = run_strategy(&doc(), &strategy).unwrap();
        assert!(text.contains("Fire zone map"));
        assert!(text.contains("Property Summary"));
    }

    #[test]
    fn empty_text_does_not_win() {
        let strategy = Strategy::select(vec!["span.empty", "h2.title"]);
        assert_eq!(
            run_strategy(&doc(), &strategy),
            Some("Property Summary".to_owned())
        );
    }

    #[test]
    fn custom_extractor_overrides_text_collection() {
        fn href(element: &ElementRef<'_>) -> Option<String> {
            element.value().attr("href").map(str::to_owned)
        }
        let strategy = Strategy::select_with(vec!["a.link"], href);
        assert_eq!(run_strategy(&doc(), &strategy), Some("/zones/fire".to_owned()));
    }

    #[test]
    fn custom_extractor_none_falls_through_to_next_selector() {
        fn never(_: &ElementRef<'_>) -> Option<String> {
            None
        }
        let strategy = Strategy {
            selectors: vec!["h2.title"],
            sibling: None,
            extractor: Some(never),
        };
        assert_eq!(run_strategy(&doc(), &strategy), None);
    }

    #[test]
    fn invalid_selector_is_skipped() {
        let strategy = Strategy::select(vec![":::nonsense:::", "h2.title"]);
        assert_eq!(
            run_strategy(&doc(), &strategy),
            Some("Property Summary".to_owned())
        );
    }

    #[test]
    fn no_match_returns_none() {
        let strategy = Strategy::select(vec!["div.absent"]);
        assert_eq!(run_strategy(&doc(), &strategy), None);
    }

    #[test]
    fn collect_text_collapses_whitespace() {
        let strategy = Strategy::select(vec!["table"]);
        let text = run_strategy(&doc(), &strategy).unwrap();
        assert!(text.contains("Year built 1968"));
    }
}
