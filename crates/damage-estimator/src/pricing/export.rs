use super::domain::DamageReport;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct LineItemRow<'a> {
    part_name: &'a str,
    damage_description: &'a str,
    repair_type: &'static str,
    cost: u32,
    currency: &'a str,
}

/// Writes one CSV row per line item followed by labor and total rows.
pub fn write_report_csv<W: Write>(report: &DamageReport, writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for item in &report.line_items {
        csv.serialize(LineItemRow {
            part_name: &item.part_name,
            damage_description: &item.damage_description,
            repair_type: item.repair_type.label(),
            cost: item.cost,
            currency: &report.currency,
        })?;
    }
    let labor = report.labor_cost.to_string();
    let total = report.total_cost.to_string();
    csv.write_record(["Labor", "", "", labor.as_str(), report.currency.as_str()])?;
    csv.write_record(["Total", "", "", total.as_str(), report.currency.as_str()])?;
    csv.flush()?;
    Ok(())
}
