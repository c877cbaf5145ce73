use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct Envelope {
    data: PageData,
}

#[derive(Deserialize)]
struct PageData {
    #[serde(default)]
    items: Option<Vec<Value>>,
    #[serde(default, rename = "lockedItems")]
    locked_items: Option<Vec<Value>>,
}

/// One page of search results as replayed from the store
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage {
    /// 1-based page number
    pub number: u32,

    /// Fully visible institutions, in page order
    pub items: Vec<Value>,

    /// Partially gated institutions, present only on some pages
    pub locked_items: Option<Vec<Value>>,
}

impl RawPage {
    /// Decodes a stored `{ "data": { "items": [...], "lockedItems": [...] } }` document
    pub fn from_value(number: u32, document: Value) -> Result<Self, serde_json::Error> {
        let envelope: Envelope = serde_json::from_value(document)?;
        Ok(Self {
            number,
            items: envelope.data.items.unwrap_or_default(),
            locked_items: envelope.data.locked_items,
        })
    }

    /// Returns the locked items if the page carries any
    pub fn locked(&self) -> Option<&[Value]> {
        self.locked_items
            .as_deref()
            .filter(|items| !items.is_empty())
    }
}
