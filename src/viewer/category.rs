//! Selector jerárquico de categorías.
//!
//! A lo sumo un nodo de nivel 1 expandido. Elegir una hoja resuelve las
//! etiquetas y publica la selección por un canal `watch`; quien consume
//! (la vista de datos) la traduce a filtros de alcance.
use tokio::sync::watch;

use extract_domain::{CategorySelection, CategoryTree};

#[derive(Debug)]
pub struct CategorySelector {
    tree: CategoryTree,
    expanded: Option<String>,
    selected_level1: Option<String>,
    selected_level2: Option<String>,
    publisher: watch::Sender<Option<CategorySelection>>,
}

impl CategorySelector {
    pub fn new(tree: CategoryTree) -> Self {
        let (publisher, _) = watch::channel(None);
        Self { tree,
               expanded: None,
               selected_level1: None,
               selected_level2: None,
               publisher }
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    /// Receptor de selecciones; arranca con la vigente.
    pub fn subscribe(&self) -> watch::Receiver<Option<CategorySelection>> {
        self.publisher.subscribe()
    }

    /// Click sobre un nodo de nivel 1: expande o colapsa y lo marca.
    pub fn toggle_level1(&mut self, level1_id: &str) {
        self.expanded = match self.expanded.take() {
            Some(current) if current == level1_id => None,
            _ => Some(level1_id.to_string()),
        };
        self.selected_level1 = Some(level1_id.to_string());
    }

    /// Click sobre una hoja: fija la selección y la publica.
    pub fn select_level2(&mut self, level1_id: &str, level2_id: &str) -> CategorySelection {
        self.selected_level1 = Some(level1_id.to_string());
        self.selected_level2 = Some(level2_id.to_string());
        let selection = self.tree.resolve(level1_id, level2_id);
        self.publisher.send_replace(Some(selection.clone()));
        selection
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Ids seleccionados (nivel 1, nivel 2).
    pub fn selected_ids(&self) -> (Option<&str>, Option<&str>) {
        (self.selected_level1.as_deref(), self.selected_level2.as_deref())
    }

    pub fn current(&self) -> Option<CategorySelection> {
        self.publisher.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract_adapters::standard_category_tree;

    #[test]
    fn only_one_level1_node_is_expanded() {
        let mut s = CategorySelector::new(standard_category_tree());
        s.toggle_level1("sales");
        assert_eq!(s.expanded(), Some("sales"));
        s.toggle_level1("customers");
        assert_eq!(s.expanded(), Some("customers"));
        s.toggle_level1("customers");
        assert_eq!(s.expanded(), None);
        assert_eq!(s.selected_ids(), (Some("customers"), None));
    }

    #[test]
    fn leaf_selection_is_published_with_labels() {
        let mut s = CategorySelector::new(standard_category_tree());
        let rx = s.subscribe();
        assert_eq!(*rx.borrow(), None);
        let sel = s.select_level2("products", "lifecycle");
        assert_eq!(sel, CategorySelection::new("Product Data", "Product Lifecycle"));
        assert_eq!(*rx.borrow(), Some(sel));
        assert_eq!(s.selected_ids(), (Some("products"), Some("lifecycle")));
    }
}
