//! Generic list projection.
//!
//! Renderers project a state slice into `RenderedList`; the host UI
//! turns that into widgets. Keeping the projection pure (no network, no
//! state writes) is what makes the list testable without a DOM.

/// One row in a rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub active: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// An empty collection renders a literal placeholder, never an empty
/// container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedList {
    Placeholder(&'static str),
    Items(Vec<ListItem>),
}

impl RenderedList {
    pub fn items(&self) -> &[ListItem] {
        match self {
            RenderedList::Placeholder(_) => &[],
            RenderedList::Items(items) => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedList::Placeholder(_))
    }
}
