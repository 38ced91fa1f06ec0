//! Árbol de categorías de dos niveles (dominio → subdominio).
//!
//! Una selección completa se traduce en dos filtros sintéticos
//! (`level1 == L1`, `level2 == L2`) que la capa de consulta reconoce y retira
//! antes del filtrado genérico.
use serde::{Deserialize, Serialize};

use crate::filter::DataFilter;

pub const LEVEL1_FIELD: &str = "level1";
pub const LEVEL2_FIELD: &str = "level2";

/// Indica si `field` está reservado para el alcance jerárquico.
pub fn is_scope_field(field: &str) -> bool {
    field == LEVEL1_FIELD || field == LEVEL2_FIELD
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(),
               label: label.into(),
               children: Vec::new() }
    }

    pub fn branch(id: impl Into<String>, label: impl Into<String>, children: Vec<CategoryNode>) -> Self {
        Self { id: id.into(),
               label: label.into(),
               children }
    }

    pub fn child(&self, id: &str) -> Option<&CategoryNode> {
        self.children.iter().find(|c| c.id == id)
    }
}

/// Taxonomía estática.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    pub roots: Vec<CategoryNode>,
}

impl CategoryTree {
    pub fn new(roots: Vec<CategoryNode>) -> Self {
        Self { roots }
    }

    pub fn level1(&self, id: &str) -> Option<&CategoryNode> {
        self.roots.iter().find(|n| n.id == id)
    }

    /// Resuelve ids a etiquetas. Si un id no existe se usa el propio id como
    /// etiqueta.
    pub fn resolve(&self, level1_id: &str, level2_id: &str) -> CategorySelection {
        let level1 = self.level1(level1_id);
        let level2 = level1.and_then(|n| n.child(level2_id));
        CategorySelection::new(level1.map(|n| n.label.as_str()).unwrap_or(level1_id),
                               level2.map(|n| n.label.as_str()).unwrap_or(level2_id))
    }
}

/// Camino completo (etiquetas) dentro del árbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategorySelection {
    pub level1: String,
    pub level2: String,
}

impl CategorySelection {
    pub fn new(level1: impl Into<String>, level2: impl Into<String>) -> Self {
        Self { level1: level1.into(),
               level2: level2.into() }
    }

    /// Filtros sintéticos que codifican esta selección.
    pub fn to_filters(&self) -> Vec<DataFilter> {
        vec![DataFilter::equals(LEVEL1_FIELD, self.level1.as_str()),
             DataFilter::equals(LEVEL2_FIELD, self.level2.as_str())]
    }

    /// Extrae la selección de una lista de filtros, si ambos niveles están
    /// presentes y no vacíos. El operador no se mira.
    pub fn from_filters(filters: &[DataFilter]) -> Option<Self> {
        let find = |field: &str| {
            filters.iter()
                   .find(|f| f.field == field)
                   .map(|f| f.value.to_string())
                   .filter(|v| !v.is_empty())
        };
        Some(Self::new(find(LEVEL1_FIELD)?, find(LEVEL2_FIELD)?))
    }
}
