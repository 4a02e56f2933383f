use indexmap::IndexSet;

use crate::{
    compiler::{ConsumedTables, CteResolver, JoinResolver, RenderContext},
    model::{SelectBody, Table, ViewSpec},
    validation::ValidationError,
};

pub struct Validator;

impl Validator {
    /// Collect every structural problem of the view and its CTEs.
    pub fn validate(view: &ViewSpec) -> Vec<ValidationError> {
        let mut errors = vec![];

        let mut names: IndexSet<&str> = IndexSet::new();
        for cte in &view.ctes {
            if !names.insert(cte.name.as_str()) {
                errors.push(ValidationError::DuplicateCte { name: cte.name.clone() });
            }
            Self::check_body(cte, &cte.name, &mut errors);
        }
        Self::check_body(view, &view.name, &mut errors);
        Self::check_search_columns(view, &mut errors);

        errors
    }

    pub fn messages(view: &ViewSpec) -> Vec<String> {
        Self::validate(view).iter().map(|e| e.to_string()).collect()
    }

    fn check_body<B: SelectBody>(body: &B, owner: &str, errors: &mut Vec<ValidationError>) {
        let tables = body.tables();
        if tables.is_empty() {
            errors.push(ValidationError::NoTables { owner: owner.to_string() });
        }

        let mut consumed = ConsumedTables::with_from_target(tables);
        for join in body.joins() {
            if !join.has_matching_column_count() {
                errors.push(ValidationError::ColumnCountMismatch {
                    left: join.left_alias.clone(),
                    right: join.right_alias.clone(),
                });
            }
            if JoinResolver::claim_target(tables, join, &mut consumed).is_none() {
                errors.push(ValidationError::UnresolvedJoinTarget {
                    left: join.left_alias.clone(),
                    right: join.right_alias.clone(),
                });
            }
        }

        for table in tables {
            Self::check_functions(table, errors);
        }
    }

    fn check_functions(table: &Table, errors: &mut Vec<ValidationError>) {
        for function in &table.functions {
            match (function.name.requires_parameter(), function.parameter.is_some()) {
                (true, false) => errors.push(ValidationError::ParameterRequired { function: function.name }),
                (false, true) => errors.push(ValidationError::ParameterNotAllowed { function: function.name }),
                _ => {}
            }
            if function.name.is_row_numbering() && !function.is_windowed() {
                errors.push(ValidationError::MissingWindow { function: function.name });
            }
        }
    }

    /// Every search-typed column must resolve through the CTE chain, whether
    /// or not indexes are requested.
    fn check_search_columns(view: &ViewSpec, errors: &mut Vec<ValidationError>) {
        let search_columns = view.search_columns();
        if view.indexing_enabled && search_columns.is_empty() {
            errors.push(ValidationError::NoSearchColumns { view: view.name.clone() });
        }

        let ctes = RenderContext::cte_map(view);
        for (table, column) in search_columns {
            let resolved = match CteResolver::resolve(&ctes, &table.qualified_name(), &column.name) {
                Ok(resolved) => resolved,
                Err(err) => {
                    errors.push(err.into());
                    continue;
                }
            };

            if view.indexing_enabled && column.data_type.is_none() && resolved.data_type.is_none() {
                if let Some(search_type) = column.search_type {
                    errors.push(ValidationError::MissingColumnType {
                        table: table.alias_or_name().to_string(),
                        column: column.name.clone(),
                        search_type,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        compiler::ResolveError,
        model::{Column, Cte, Function, FunctionName, Join, JoinKind, SearchType, Table, ViewSpec},
        validation::{ValidationError, Validator},
    };

    fn two_tables() -> Vec<Table> {
        vec![
            Table::new("a").with_columns(vec![Column::new("id")]),
            Table::new("b").with_columns(vec![Column::new("a_id")]),
        ]
    }

    #[test]
    fn test_valid_view_has_no_errors() {
        let view = ViewSpec::new("v", two_tables())
            .with_joins(vec![Join::new(JoinKind::Inner, "a", &["id"], "b", &["a_id"])]);
        assert!(Validator::validate(&view).is_empty());
    }

    #[test]
    fn test_one_error_per_mismatched_join() {
        let view = ViewSpec::new("v", two_tables())
            .with_joins(vec![Join::new(JoinKind::Inner, "a", &["id", "tenant"], "b", &["a_id"])]);

        let errors = Validator::validate(&view);
        assert_eq!(errors, vec![ValidationError::ColumnCountMismatch { left: "a".into(), right: "b".into() }]);
        assert_eq!(errors[0].to_string(), "join a -> b has different amount of columns");
    }

    #[test]
    fn test_function_parameter_rules() {
        let view = ViewSpec::new("v", vec![Table::new("t").with_columns(vec![Column::new("k")]).with_functions(vec![
            Function::new(FunctionName::Count, "id", "cnt").with_parameter("1"),
            Function::new(FunctionName::StringAgg, "name", "names"),
            Function::new(FunctionName::RowNumber, "id", "rn"),
        ])]);

        let messages = Validator::messages(&view);
        assert_eq!(messages, vec![
            "function COUNT doesn't required additional parameter!",
            "function STRING_AGG requires additional parameter!",
            "function ROW_NUMBER requires a window clause!",
        ]);
    }

    #[test]
    fn test_indexing_without_search_columns() {
        let view = ViewSpec::new("v", two_tables()).with_indexing(true);
        assert_eq!(Validator::validate(&view), vec![ValidationError::NoSearchColumns { view: "v".into() }]);
    }

    #[test]
    fn test_search_column_without_type_only_matters_when_indexing() {
        let tables = vec![Table::new("t").with_columns(vec![Column::new("c").with_search(SearchType::Equal)])];

        let view = ViewSpec::new("v", tables.clone());
        assert!(Validator::validate(&view).is_empty());

        let view = ViewSpec::new("v", tables).with_indexing(true);
        let errors = Validator::validate(&view);
        assert_eq!(errors, vec![ValidationError::MissingColumnType {
            table: "t".into(),
            column: "c".into(),
            search_type: SearchType::Equal,
        }]);
        assert_eq!(errors[0].to_string(), "column t.c declares search type equal but has no type");
    }

    #[test]
    fn test_cte_resolution_is_checked_up_front() {
        let view = ViewSpec::new("v", vec![
            Table::new("src").with_columns(vec![Column::new("missing").with_search(SearchType::Contains).with_type("text")]),
        ])
        .with_ctes(vec![Cte::new("src", vec![Table::new("person").with_columns(vec![Column::new("name")])])]);

        assert_eq!(Validator::validate(&view), vec![ValidationError::Resolve(ResolveError::ColumnNotFound {
            table: "src".into(),
            column: "missing".into(),
        })]);
    }

    #[test]
    fn test_errors_are_collected_across_ctes() {
        let view = ViewSpec::new("v", vec![])
            .with_ctes(vec![
                Cte::new("x", vec![]),
                Cte::new("x", two_tables()).with_joins(vec![Join::new(JoinKind::Left, "a", &["id"], "zzz", &["id"])]),
            ]);

        let errors = Validator::validate(&view);
        assert_eq!(errors, vec![
            ValidationError::NoTables { owner: "x".into() },
            ValidationError::DuplicateCte { name: "x".into() },
            ValidationError::UnresolvedJoinTarget { left: "a".into(), right: "zzz".into() },
            ValidationError::NoTables { owner: "v".into() },
        ]);
    }
}
