//! Named selector queries over a parsed document tree

use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// A page parsed once into a queryable tree
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// The root element, the scope for top-level queries
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

/// Compiles a CSS selector, reporting a bad selector as an error
fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Returns the first element under `scope` matching `css`
pub fn select_first<'a>(
    scope: ElementRef<'a>,
    css: &str,
) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let selector = compile(css)?;
    let found = scope.select(&selector).next();
    Ok(found)
}

/// Returns every element under `scope` matching `css`, in document order
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let selector = compile(css)?;
    let found = scope.select(&selector).collect();
    Ok(found)
}

/// Like [`select_first`], but a missing element is a malformed page
///
/// `what` names the element in the error message.
pub fn require_first<'a>(
    scope: ElementRef<'a>,
    css: &str,
    what: &str,
) -> Result<ElementRef<'a>, ScrapeError> {
    select_first(scope, css)?
        .ok_or_else(|| ScrapeError::malformed(format!("missing {} ({})", what, css)))
}

/// Concatenated text of an element and its descendants, trimmed
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
