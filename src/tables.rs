use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    core::calculator::CostRow,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// One line per session plus the grand total.
#[must_use]
pub fn build_summary_table(rows: &[CostRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Session", "From", "Until", "Energy", "Cost", "With VAT", "Currency"]);

    for (session_id, session_rows) in &rows.iter().chunk_by(|row| row.session_id.clone()) {
        let session_rows = session_rows.collect_vec();
        let (Some(first), Some(last)) = (session_rows.first(), session_rows.last()) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(session_id),
            Cell::new(first.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(last.timestamp.format("%Y-%m-%d %H:%M")).add_attribute(Attribute::Dim),
            Cell::new(session_rows.iter().map(|row| row.energy).sum::<KilowattHours>())
                .set_alignment(CellAlignment::Right),
            Cell::new(session_rows.iter().map(|row| row.total_cost_no_vat).sum::<Cost>())
                .set_alignment(CellAlignment::Right),
            Cell::new(session_rows.iter().map(|row| row.total_cost_with_vat).sum::<Cost>())
                .set_alignment(CellAlignment::Right),
            Cell::new(first.currency),
        ]);
    }

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(rows.iter().map(|row| row.energy).sum::<KilowattHours>())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(rows.iter().map(|row| row.total_cost_no_vat).sum::<Cost>())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(rows.iter().map(|row| row.total_cost_with_vat).sum::<Cost>())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(rows.first().map(|row| row.currency.to_string()).unwrap_or_default()),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{core::prices::Currency, quantity::rate::KilowattHourRate};

    fn row(session_id: &str, hour: u32, energy: f64) -> CostRow {
        CostRow {
            session_id: session_id.to_owned(),
            timestamp: Utc.with_ymd_and_hms(2023, 10, 14, hour, 0, 0).unwrap(),
            energy: KilowattHours::from(energy),
            energy_usage_fee: KilowattHourRate::from(1.0),
            net_usage_fee: Cost::from(0.0),
            energy_cost: Cost::from(energy),
            net_usage_cost: Cost::from(0.0),
            total_cost_no_vat: Cost::from(energy),
            total_cost_with_vat: Cost::from(energy * 1.25),
            currency: Currency::Nok,
        }
    }

    #[test]
    fn test_build_summary_table() {
        let rows = [row("a", 20, 1.0), row("a", 21, 2.0), row("b", 22, 4.0)];
        let table = build_summary_table(&rows);
        assert_eq!(table.row_iter().count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("3.000 kWh"));
        assert!(rendered.contains("7.000 kWh"));
        assert!(rendered.contains("8.75"));
    }

    #[test]
    fn test_build_empty_summary_table() {
        assert_eq!(build_summary_table(&[]).row_iter().count(), 1);
    }
}
