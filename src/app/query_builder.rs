//! Derives the SQL a panel runs from its configuration.
//!
//! Pure and deterministic: the same panel configuration always yields the
//! same statement, which is what makes result caching and history dedup work.

use duckboard_domain::{ChartKind, FilterSelection, Panel};

const TABLES_QUERY: &str =
    "SELECT table_name, estimated_size FROM duckdb_tables() ORDER BY table_name";

struct ChartTemplate {
    source: &'static str,
    x_column: &'static str,
    value: &'static str,
}

fn template(kind: ChartKind) -> Option<ChartTemplate> {
    let (source, x_column, value) = match kind {
        ChartKind::Default | ChartKind::Sql => return None,
        ChartKind::Capacity => ("asset_both", "milestone_year", "SUM(initial_units)"),
        ChartKind::SystemCosts => ("asset_commission", "commission_year", "SUM(fixed_cost)"),
        ChartKind::ProductionPrices => (
            "cons_balance_consumer",
            "year",
            "AVG(dual_balance_consumer)",
        ),
        ChartKind::StoragePrices => (
            "cons_balance_storage_rep_period",
            "year",
            "AVG(dual_balance_storage_rep_period)",
        ),
        ChartKind::TransportPrices => (
            "cons_transport_flow_limit_simple_method",
            "year",
            "AVG(dual_max_transport_flow_limit_simple_method)",
        ),
        ChartKind::ResidualLoad => ("var_flow", "year", "SUM(solution)"),
        ChartKind::ImportExport => ("var_flow", "to_asset", "SUM(solution)"),
    };
    Some(ChartTemplate {
        source,
        x_column,
        value,
    })
}

/// SQL for `panel`, or `None` when there is nothing to run (SQL explorer
/// with no text).
pub fn build_query(panel: &Panel) -> Option<String> {
    match panel.kind {
        ChartKind::Default => Some(TABLES_QUERY.to_string()),
        ChartKind::Sql => panel
            .sql
            .as_deref()
            .map(str::trim)
            .filter(|sql| !sql.is_empty())
            .map(str::to_string),
        kind => template(kind).map(|t| chart_query(&t, &panel.filters, &panel.breakdown)),
    }
}

fn chart_query(t: &ChartTemplate, filters: &FilterSelection, breakdown: &[String]) -> String {
    let breakdown: Vec<String> = breakdown.iter().map(|c| quote_ident(c)).collect();

    let mut select = vec![format!("{} AS x", t.x_column)];
    select.extend(breakdown.iter().cloned());
    select.push(format!("{} AS value", t.value));

    let mut group_by = breakdown.clone();
    group_by.push(t.x_column.to_string());

    let mut order_by = vec![t.x_column.to_string()];
    order_by.extend(breakdown);

    let mut sql = format!("SELECT {} FROM {}", select.join(", "), t.source);
    if let Some(predicate) = where_clause(filters) {
        sql.push_str(" WHERE ");
        sql.push_str(&predicate);
    }
    sql.push_str(" GROUP BY ");
    sql.push_str(&group_by.join(", "));
    sql.push_str(" ORDER BY ");
    sql.push_str(&order_by.join(", "));
    sql
}

fn where_clause(filters: &FilterSelection) -> Option<String> {
    let predicates: Vec<String> = filters
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(category, values)| {
            let literals: Vec<String> = values.iter().map(|v| quote_literal(v)).collect();
            format!("{} IN ({})", quote_ident(category), literals.join(", "))
        })
        .collect();
    (!predicates.is_empty()).then(|| predicates.join(" AND "))
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use duckboard_domain::{PanelId, PanelPatch};
    use insta::assert_snapshot;
    use rstest::rstest;

    use super::*;

    fn panel(kind: ChartKind) -> Panel {
        Panel::new(PanelId::from_string("p1"), kind)
    }

    fn filters(entries: &[(&str, &[&str])]) -> FilterSelection {
        entries
            .iter()
            .map(|(category, values)| {
                (
                    category.to_string(),
                    values.iter().map(|v| v.to_string()).collect::<BTreeSet<_>>(),
                )
            })
            .collect()
    }

    #[test]
    fn default_kind_lists_tables() {
        let sql = build_query(&panel(ChartKind::Default)).unwrap();

        assert_snapshot!(sql, @"SELECT table_name, estimated_size FROM duckdb_tables() ORDER BY table_name");
    }

    #[test]
    fn capacity_without_filters() {
        let sql = build_query(&panel(ChartKind::Capacity)).unwrap();

        assert_snapshot!(sql, @"SELECT milestone_year AS x, SUM(initial_units) AS value FROM asset_both GROUP BY milestone_year ORDER BY milestone_year");
    }

    #[test]
    fn filters_and_breakdown_are_quoted() {
        let mut p = panel(ChartKind::Capacity);
        p.apply_patch(PanelPatch::filters(filters(&[
            ("asset", &["wind", "o'brien"]),
            ("region", &["NL"]),
        ])));
        p.apply_patch(PanelPatch::breakdown(vec!["asset".to_string()]));

        let sql = build_query(&p).unwrap();

        assert_snapshot!(sql, @r#"SELECT milestone_year AS x, "asset", SUM(initial_units) AS value FROM asset_both WHERE "asset" IN ('o''brien', 'wind') AND "region" IN ('NL') GROUP BY "asset", milestone_year ORDER BY milestone_year, "asset""#);
    }

    #[test]
    fn import_export_groups_by_destination() {
        let sql = build_query(&panel(ChartKind::ImportExport)).unwrap();

        assert_snapshot!(sql, @"SELECT to_asset AS x, SUM(solution) AS value FROM var_flow GROUP BY to_asset ORDER BY to_asset");
    }

    #[rstest]
    #[case::unset(None)]
    #[case::blank(Some("   "))]
    fn sql_explorer_without_text_yields_nothing(#[case] text: Option<&str>) {
        let mut p = panel(ChartKind::Sql);
        p.sql = text.map(str::to_string);

        assert_eq!(build_query(&p), None);
    }

    #[test]
    fn sql_explorer_runs_its_own_text() {
        let mut p = panel(ChartKind::Sql);
        p.apply_patch(PanelPatch::sql("  SELECT 42  "));

        assert_eq!(build_query(&p).as_deref(), Some("SELECT 42"));
    }

    #[rstest]
    #[case(ChartKind::Default)]
    #[case(ChartKind::Capacity)]
    #[case(ChartKind::SystemCosts)]
    #[case(ChartKind::ProductionPrices)]
    #[case(ChartKind::StoragePrices)]
    #[case(ChartKind::TransportPrices)]
    #[case(ChartKind::ResidualLoad)]
    #[case(ChartKind::ImportExport)]
    fn identical_configuration_yields_identical_sql(#[case] kind: ChartKind) {
        let mut a = panel(kind);
        let mut b = Panel::new(PanelId::from_string("p2"), kind);
        for p in [&mut a, &mut b] {
            p.apply_patch(PanelPatch::filters(filters(&[("asset", &["solar", "wind"])])));
        }

        assert_eq!(build_query(&a), build_query(&b));
        assert!(build_query(&a).is_some());
    }

    #[test]
    fn quote_ident_escapes_double_quotes() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }
}
