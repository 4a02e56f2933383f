#[cfg(test)]
pub mod fixtures {
    use serde_json::json;

    use crate::model::ViewSpec;

    /// Registry entries with their latest status taken from a chain of CTEs.
    pub fn registry_view() -> ViewSpec {
        serde_json::from_value(json!({
            "name": "registry_entry",
            "indexingEnabled": true,
            "limit": 100,
            "pagination": true,
            "ctes": [
                {
                    "name": "entry_status",
                    "tables": [{
                        "schema": "registry", "name": "status_history", "alias": "h",
                        "columns": [
                            { "name": "entry_id" },
                            { "name": "status", "alias": "status_code", "type": "varchar(32)" }
                        ],
                        "functions": [
                            { "name": "row_number", "alias": "rn", "window": "PARTITION BY h.entry_id ORDER BY h.changed_at DESC" }
                        ]
                    }]
                },
                {
                    "name": "latest_status",
                    "tables": [{
                        "name": "entry_status", "alias": "s",
                        "columns": [ { "name": "entry_id" }, { "name": "status_code", "alias": "current_status" } ]
                    }],
                    "conditions": [ { "tableAlias": "s", "column": "rn", "operator": "=", "value": "1" } ]
                }
            ],
            "tables": [
                {
                    "schema": "registry", "name": "entry", "alias": "e",
                    "columns": [
                        { "name": "id", "sort": "asc" },
                        { "name": "code", "type": "char(8)", "searchType": "startsWith" },
                        { "name": "title", "type": "text", "searchType": "contains", "sort": "desc" },
                        { "name": "created_at", "type": "timestamp", "searchType": "equal" }
                    ]
                },
                {
                    "name": "latest_status", "alias": "ls",
                    "columns": [ { "name": "current_status", "alias": "status", "searchType": "equal" } ]
                }
            ],
            "joins": [
                {
                    "kind": "left", "leftAlias": "e", "leftColumns": ["id"], "rightAlias": "ls", "rightColumns": ["entry_id"]
                }
            ],
            "conditions": [
                { "tableAlias": "e", "column": "deleted_at", "operator": "IS NULL" },
                {
                    "logicOp": "AND", "tableAlias": "e", "column": "kind", "operator": "IN", "value": "'person','company'",
                    "conditions": [ { "logicOp": "OR", "tableAlias": "e", "column": "public", "operator": "=", "value": "true" } ]
                }
            ]
        })).expect("registry view fixture")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::registry_view;
    use crate::{
        compiler::{CompileError, ViewCompiler},
        model::{Column, Condition, Function, FunctionName, Join, JoinKind, Operator, SearchType, Table, ViewSpec},
        validation::ValidationError,
    };

    #[test]
    fn scenario_simple_view() {
        let view = ViewSpec::new("person_view", vec![
            Table::new("person").with_alias("p").with_columns(vec![Column::new("id"), Column::new("name").with_alias("full_name")]),
        ]);

        let compiled = ViewCompiler::default().compile(&view).unwrap();
        assert_eq!(compiled.view_name, "person_view_v");
        assert_eq!(compiled.statements, vec!["CREATE OR REPLACE VIEW person_view_v AS SELECT p.id, p.name AS full_name FROM person AS p;"]);
        assert!(compiled.index_statements().is_empty());
    }

    #[test]
    fn scenario_join_and_where() {
        let view = ViewSpec::new("ab", vec![
            Table::new("a").with_alias("a").with_columns(vec![Column::new("id")]),
            Table::new("b").with_alias("b").with_columns(vec![Column::new("amount")]),
        ])
        .with_joins(vec![Join::new(JoinKind::Inner, "a", &["id"], "b", &["a_id"])])
        .with_conditions(vec![
            Condition::leaf("status", Operator::Equal("'done'".into())),
            Condition::leaf("amount", Operator::Greater("100".into())).and(),
        ]);

        let compiled = ViewCompiler::default().compile(&view).unwrap();
        assert_eq!(
            compiled.view_statement(),
            "CREATE OR REPLACE VIEW ab_v AS SELECT a.id, b.amount FROM a AS a INNER JOIN b AS b ON (a.id = b.a_id) WHERE (status = 'done') AND (amount > 100);"
        );
    }

    #[test]
    fn scenario_contains_index() {
        let view = ViewSpec::new("doc", vec![
            Table::new("document").with_alias("d").with_columns(vec![Column::new("body").with_type("text").with_search(SearchType::Contains)]),
        ])
        .with_indexing(true);

        let compiled = ViewCompiler::default().compile(&view).unwrap();
        assert_eq!(compiled.index_statements(), &[
            "CREATE INDEX IF NOT EXISTS idx_document_body_ct ON document USING GIN (body gin_trgm_ops);".to_string(),
        ]);
    }

    #[test]
    fn scenario_forbidden_parameter() {
        let view = ViewSpec::new("counted", vec![
            Table::new("t").with_columns(vec![Column::new("k")])
                .with_functions(vec![Function::new(FunctionName::Count, "id", "cnt").with_parameter("';'")]),
        ]);

        let compiler = ViewCompiler::default();
        let err = compiler.compile(&view).unwrap_err();
        assert_eq!(err, CompileError::Validation(vec![ValidationError::ParameterNotAllowed { function: FunctionName::Count }]));
        assert_eq!(err.to_string(), "view validation failed: function COUNT doesn't required additional parameter!");
    }

    #[test]
    fn full_registry_view() {
        let compiled = ViewCompiler::default().compile(&registry_view()).unwrap();

        assert_eq!(compiled.view_statement(), concat!(
            "CREATE OR REPLACE VIEW registry_entry_v AS WITH ",
            "entry_status AS (SELECT h.entry_id, h.status AS status_code, ROW_NUMBER() OVER (PARTITION BY h.entry_id ORDER BY h.changed_at DESC) AS rn FROM registry.status_history AS h), ",
            "latest_status AS (SELECT s.entry_id, s.status_code AS current_status FROM entry_status AS s WHERE (s.rn = 1)) ",
            "SELECT e.id, e.code, e.title, e.created_at, ls.current_status AS status ",
            "FROM registry.entry AS e LEFT JOIN latest_status AS ls ON (e.id = ls.entry_id) ",
            "WHERE (e.deleted_at IS NULL) AND ((e.kind IN ('person', 'company')) OR (e.public = true)) ",
            "ORDER BY e.id, e.title DESC;",
        ));

        assert_eq!(compiled.index_statements(), &[
            "CREATE INDEX IF NOT EXISTS idx_registry_entry_code_sw ON registry.entry (code bpchar_pattern_ops);".to_string(),
            "CREATE INDEX IF NOT EXISTS idx_registry_entry_title_ct ON registry.entry USING GIN (title gin_trgm_ops);".to_string(),
            "CREATE INDEX IF NOT EXISTS idx_registry_entry_created_at_eq ON registry.entry (lower(cast(created_at as varchar)));".to_string(),
            "CREATE INDEX IF NOT EXISTS idx_registry_status_history_status_eq ON registry.status_history (status);".to_string(),
        ]);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let view = registry_view();
        let compiler = ViewCompiler::default();
        let first = compiler.compile(&view).unwrap().into_script();
        let second = compiler.compile(&view).unwrap().into_script();
        assert_eq!(first, second);
    }

    #[test]
    fn compiles_from_several_threads() {
        let view = std::sync::Arc::new(registry_view());
        let expected = ViewCompiler::default().compile(&view).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let view = std::sync::Arc::clone(&view);
                std::thread::spawn(move || ViewCompiler::default().compile(&view).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn aggregated_view_groups_remaining_columns() {
        let view = ViewSpec::new("totals", vec![
            Table::new("orders").with_alias("o")
                .with_columns(vec![Column::new("customer_id"), Column::new("amount")])
                .with_functions(vec![Function::new(FunctionName::Sum, "amount", "total")]),
            Table::new("customer").with_alias("c").with_columns(vec![Column::new("name")]),
        ])
        .with_joins(vec![Join::new(JoinKind::Inner, "o", &["customer_id"], "c", &["id"])]);

        let compiled = ViewCompiler::default().compile(&view).unwrap();
        assert_eq!(
            compiled.view_statement(),
            "CREATE OR REPLACE VIEW totals_v AS SELECT o.customer_id, c.name, SUM(o.amount) AS total FROM orders AS o INNER JOIN customer AS c ON (o.customer_id = c.id) GROUP BY o.customer_id, c.name;"
        );
    }

    #[test]
    fn metadata_comes_from_the_same_view() {
        let compiler = ViewCompiler::default();
        let metadata = compiler.metadata(&registry_view());

        assert_eq!(metadata.view_name, "registry_entry_v");
        assert_eq!(metadata.row_limit, Some(100));
        assert_eq!(metadata.searchable_columns().count(), 4);
        assert_eq!(metadata.insert_statements(compiler.config()).len(), 5);
    }
}
