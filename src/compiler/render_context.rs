use indexmap::IndexMap;

use crate::{config::CompilerConfig, model::{Cte, ViewSpec}};

/// Read-only state shared by one compilation of a view.
pub struct RenderContext<'a> {
    pub config: &'a CompilerConfig,
    /// CTE name -> definition, in declaration order.
    pub ctes: IndexMap<&'a str, &'a Cte>,
}

impl<'a> RenderContext<'a> {
    pub fn new(view: &'a ViewSpec, config: &'a CompilerConfig) -> Self {
        Self { config, ctes: Self::cte_map(view) }
    }

    /// First definition wins when a name repeats; validation reports the duplicate.
    pub fn cte_map(view: &'a ViewSpec) -> IndexMap<&'a str, &'a Cte> {
        let mut ctes = IndexMap::new();
        for cte in &view.ctes {
            ctes.entry(cte.name.as_str()).or_insert(cte);
        }
        ctes
    }
}
