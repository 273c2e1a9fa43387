use async_trait::async_trait;

use crate::domain::product::ProductText;

/// Supplies product text for a reference such as a listing URL. Implementations
/// report trouble through [`ProductText::error`] rather than failing, so the
/// caller can still classify whatever free text was recovered.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn fetch(&self, reference: &str) -> ProductText;
}

/// Provider for callers that already hold the text, e.g. the CLI.
#[derive(Clone, Debug, Default)]
pub struct StaticTextProvider {
    text: ProductText,
}

impl StaticTextProvider {
    pub fn new(text: ProductText) -> Self {
        Self { text }
    }
}

#[async_trait]
impl TextProvider for StaticTextProvider {
    async fn fetch(&self, _reference: &str) -> ProductText {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{StaticTextProvider, TextProvider};
    use crate::domain::product::ProductText;

    #[tokio::test]
    async fn static_provider_returns_its_text() {
        let provider = StaticTextProvider::new(ProductText {
            title: "Seiko Presage".to_owned(),
            ..ProductText::default()
        });
        let text = provider.fetch("https://example.invalid/item/1").await;
        assert_eq!(text.title, "Seiko Presage");
        assert!(text.error.is_none());
    }
}
