//! Plain-text bill preview, laid out like the printed bill.

use std::fmt::Write;

use crate::config::{format_sqft, layout, BillConfig};
use crate::model::BillSummary;

/// Render the bill as tab-separated text.
pub fn render_preview(summary: &BillSummary, config: &BillConfig) -> String {
    let mut output = String::new();

    writeln!(output, "{}", layout::TITLE).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Glass Name: {}", summary.glass_name).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "{}", layout::HEADERS.join("\t")).unwrap();

    for line in &summary.lines {
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}",
            line.serial,
            line.length,
            line.width,
            line.quantity,
            format_sqft(line.pricing.billed_area_sqft),
            config.format_price(line.pricing.line_price)
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    write!(
        output,
        "Total Price: {}",
        config.format_price(summary.total_price)
    )
    .unwrap();

    output
}
