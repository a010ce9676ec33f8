//! Product, order and shipping handlers.
//!
//! All three kinds share list/fields/add/edit/delete; only the table rows
//! differ.

use std::io::IsTerminal;

use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use agrisci_core::{
    DashboardController, DeleteOutcome, EntityKind, FieldKind, FieldSpec, OrderRow, ProductRow,
    Rows, ShippingRow, Tab,
};

use crate::cli::{EditArgs, EntityArgs, EntityCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ProductRow> for ProductTableRow {
    fn from(p: &ProductRow) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            price: p.price.to_string(),
            description: truncate(&p.description, 48),
        }
    }
}

#[derive(Tabled)]
struct OrderTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Order")]
    order_id: String,
    #[tabled(rename = "Item")]
    item_name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
}

impl From<&OrderRow> for OrderTableRow {
    fn from(o: &OrderRow) -> Self {
        Self {
            id: o.id.clone(),
            order_id: o.order_id.clone(),
            item_name: o.item_name.clone(),
            price: o.price.to_string(),
            quantity: o.quantity,
        }
    }
}

#[derive(Tabled)]
struct ShippingTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Order")]
    order_id: String,
    #[tabled(rename = "Name")]
    full_name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ShippingRow> for ShippingTableRow {
    fn from(s: &ShippingRow) -> Self {
        Self {
            id: s.id.clone(),
            order_id: s.order_id.clone(),
            full_name: s.full_name.clone(),
            email: s.email.clone(),
            city: s.city.clone(),
            country: s.country.clone(),
            status: s.status.to_string(),
        }
    }
}

/// Editable field description for `fields`.
#[derive(Debug, Clone, Serialize, Tabled)]
struct FieldView {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Required")]
    required: bool,
    #[tabled(rename = "Fixed on edit")]
    identity: bool,
    #[tabled(rename = "Default")]
    default: &'static str,
}

impl From<&FieldSpec> for FieldView {
    fn from(f: &FieldSpec) -> Self {
        let kind = match f.kind {
            FieldKind::Text => "text".to_owned(),
            FieldKind::Decimal => "decimal".to_owned(),
            FieldKind::Integer => "integer".to_owned(),
            FieldKind::UrlList => "comma-separated URLs".to_owned(),
            FieldKind::Choice(options) => format!("one of {}", options.join("|")),
        };
        Self {
            name: f.name,
            label: f.label,
            kind,
            required: f.required,
            identity: f.identity,
            default: f.default,
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &mut DashboardController,
    kind: EntityKind,
    args: EntityArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EntityCommand::List => {
            util::load(controller, global).await?;
            let out = render_rows(controller, kind, global);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EntityCommand::Fields => {
            let views: Vec<FieldView> = controller
                .dialog(kind)
                .fields()
                .iter()
                .map(FieldView::from)
                .collect();
            let out = output::render_list(global.output, &views, Clone::clone, |f| {
                f.name.to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EntityCommand::Add(edit) => {
            // Only the session is needed up front; no existing record is read.
            util::require_dashboard(controller)?;
            controller.open_editor(kind, None)?;
            save(controller, kind, &edit, global).await
        }

        EntityCommand::Edit { id, edit } => {
            util::load(controller, global).await?;
            controller.open_editor(kind, Some(&id))?;
            save(controller, kind, &edit, global).await
        }

        EntityCommand::Delete { id } => {
            util::load(controller, global).await?;

            let action = format!("delete {kind}");
            let mut prompt_error = None;
            let mut ask = |prompt: &str| match util::confirm(prompt, &action, global.yes) {
                Ok(answer) => answer,
                Err(e) => {
                    prompt_error = Some(e);
                    false
                }
            };
            let result = controller.delete(kind, &id, &mut ask).await;
            if let Some(e) = prompt_error {
                return Err(e);
            }

            match result {
                Ok(DeleteOutcome::Declined) => {
                    if !global.quiet {
                        eprintln!("Cancelled");
                    }
                    Ok(())
                }
                Ok(DeleteOutcome::Deleted) => util::finish(controller, global, Ok(())),
                Err(e) => util::finish(controller, global, Err(e)),
            }
        }
    }
}

fn render_rows(controller: &mut DashboardController, kind: EntityKind, global: &GlobalOpts) -> String {
    controller.set_tab(Tab::from(kind));
    match controller.visible_rows() {
        Rows::Products(rows) => output::render_list(
            global.output,
            &rows,
            |r| ProductTableRow::from(r),
            |r| r.id.clone(),
        ),
        Rows::Orders(rows) => output::render_list(
            global.output,
            &rows,
            |r| OrderTableRow::from(r),
            |r| r.id.clone(),
        ),
        Rows::Shipping(rows) => output::render_list(
            global.output,
            &rows,
            |r| ShippingTableRow::from(r),
            |r| r.id.clone(),
        ),
    }
}

/// Apply `--set` values (and prompts), then submit the open editor.
async fn save(
    controller: &mut DashboardController,
    kind: EntityKind,
    edit: &EditArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    for (field, value) in &edit.set {
        controller.set_field(kind, field, value.clone())?;
    }
    if edit.interactive {
        prompt_fields(controller, kind)?;
    }

    let pb = util::spinner(&format!("Saving {kind}..."), global.quiet);
    let result = controller.submit(kind).await;
    pb.finish_and_clear();

    if let (Err(_), Some(inline)) = (&result, controller.dialog(kind).error()) {
        debug!(%kind, inline, "editor kept open");
    }
    util::finish(controller, global, result)
}

/// Ask for every editable field, pre-filled with the current value.
fn prompt_fields(controller: &mut DashboardController, kind: EntityKind) -> Result<(), CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "interactive".into(),
            reason: "--interactive needs a terminal; use --set instead".into(),
        });
    }
    let to_io = |e: dialoguer::Error| CliError::Io(std::io::Error::other(e));

    let fields = controller.dialog(kind).fields();
    for spec in fields {
        if controller.dialog(kind).is_disabled(spec.name) {
            continue;
        }
        let current = controller.dialog(kind).value(spec.name).to_owned();
        let value = match spec.kind {
            FieldKind::Choice(options) => {
                let default = options.iter().position(|o| *o == current).unwrap_or(0);
                let picked = dialoguer::Select::new()
                    .with_prompt(spec.label)
                    .items(options)
                    .default(default)
                    .interact()
                    .map_err(to_io)?;
                options.get(picked).copied().unwrap_or_default().to_owned()
            }
            _ => dialoguer::Input::<String>::new()
                .with_prompt(spec.label)
                .with_initial_text(current)
                .allow_empty(!spec.required)
                .interact_text()
                .map_err(to_io)?,
        };
        controller.set_field(kind, spec.name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Seed mix", 48), "Seed mix");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn choice_fields_list_their_options() {
        let spec = FieldSpec::text("status", "Status")
            .kind(FieldKind::Choice(&["ON_TRACK", "DELIVERED"]));
        let view = FieldView::from(&spec);
        assert_eq!(view.kind, "one of ON_TRACK|DELIVERED");
        assert!(view.required);
    }
}
