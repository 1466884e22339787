//! `openadmin org ...`

use std::io::Write;

use openadmin_core::{AlwaysConfirm, Confirmer, ServiceError};
use org::{CreateOrg, DeleteOutcome, OrgService};

use crate::OrgAction;
use crate::output::{Output, write_tree};

pub fn run<W: Write>(
    orgs: &mut OrgService,
    action: OrgAction,
    confirmer: &dyn Confirmer,
    out: &mut Output<W>,
) -> anyhow::Result<()> {
    match action {
        OrgAction::Tree => show_tree(orgs, out),

        OrgAction::List => {
            let flat = orgs.tree().flatten();
            out.emit(&flat, |w| {
                for node in &flat {
                    writeln!(w, "{}{}\t{}", "  ".repeat(node.depth), node.label, node.key)?;
                }
                Ok(())
            })
        }

        OrgAction::Search { query } => {
            orgs.search(query.as_deref().unwrap_or(""));
            show_tree(orgs, out)
        }

        OrgAction::Select { key } => {
            orgs.select(&key).map_err(ServiceError::from)?;
            out.notice(&format!("selected {}.", key))
        }

        OrgAction::Unselect => {
            orgs.clear_selection();
            out.notice("selection cleared.")
        }

        OrgAction::Add { name, parent } => {
            let node = match parent {
                Some(parent) => orgs.create(CreateOrg {
                    name,
                    parent_key: Some(parent),
                }),
                None => orgs.add_to_selected(&name),
            }
            .map_err(ServiceError::from)?;
            out.emit(&node, |w| writeln!(w, "organization {} ({}) created.", node.label, node.key))
        }

        OrgAction::Rename { name, key } => {
            let renamed = match key {
                Some(key) => orgs.rename(&key, &name),
                None => orgs.rename_selected(&name),
            };
            renamed.map_err(ServiceError::from)?;
            out.notice("organization renamed.")
        }

        OrgAction::Delete { key, yes } => {
            let confirmer: &dyn Confirmer = if yes { &AlwaysConfirm } else { confirmer };
            let outcome = match key {
                Some(key) => orgs.delete(&key, confirmer),
                None => orgs.delete_selected(confirmer),
            }
            .map_err(ServiceError::from)?;
            out.emit(&outcome, |w| match &outcome {
                DeleteOutcome::Deleted { removed } => {
                    writeln!(w, "deleted {} organization(s): {}", removed.len(), removed.join(", "))
                }
                DeleteOutcome::Cancelled => writeln!(w, "Cancelled."),
            })
        }

        OrgAction::Detail { key } => {
            let detail = orgs.detail(&key).map_err(ServiceError::from)?;
            out.emit(&detail, |w| {
                writeln!(w, "key:         {}", detail.key)?;
                writeln!(w, "name:        {}", detail.name)?;
                writeln!(w, "parent:      {}", detail.parent_key.as_deref().unwrap_or("-"))?;
                writeln!(w, "depth:       {}", detail.depth)?;
                writeln!(w, "children:    {}", detail.children)?;
                writeln!(w, "descendants: {}", detail.descendants)
            })
        }

        OrgAction::Expand { key } => {
            orgs.toggle(&key, true).map_err(ServiceError::from)?;
            show_tree(orgs, out)
        }

        OrgAction::Collapse { key } => {
            orgs.toggle(&key, false).map_err(ServiceError::from)?;
            show_tree(orgs, out)
        }
    }
}

fn show_tree<W: Write>(orgs: &OrgService, out: &mut Output<W>) -> anyhow::Result<()> {
    let view = orgs.view();
    out.emit(&view, |w| {
        if !view.query.is_empty() {
            writeln!(w, "search \"{}\": {} match(es)", view.query, view.matches)?;
        }
        write_tree(w, &view.nodes, &view.expanded, view.selected.as_deref())
    })
}
