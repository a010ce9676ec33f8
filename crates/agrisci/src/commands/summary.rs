//! Dashboard summary counters.

use serde::Serialize;
use tabled::Tabled;

use agrisci_core::{DashboardController, Summary};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Collection")]
    collection: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryView {
    #[serde(flatten)]
    counts: Summary,
    refreshed_at: Option<String>,
}

pub async fn handle(controller: &mut DashboardController, global: &GlobalOpts) -> Result<(), CliError> {
    util::load(controller, global).await?;

    let view = SummaryView {
        counts: controller.summary(),
        refreshed_at: controller
            .store()
            .last_full_refresh()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    };

    let out = output::render_single(
        global.output,
        &view,
        |v| {
            let rows = [
                CountRow {
                    collection: "Products",
                    count: v.counts.products,
                },
                CountRow {
                    collection: "Orders",
                    count: v.counts.orders,
                },
                CountRow {
                    collection: "Shipping",
                    count: v.counts.shipping,
                },
            ];
            let mut table = output::render_table(&rows);
            if let Some(ref at) = v.refreshed_at {
                table.push_str(&format!("\nRefreshed {at}"));
            }
            table
        },
        |v| {
            format!(
                "{}\t{}\t{}",
                v.counts.products, v.counts.orders, v.counts.shipping
            )
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
