//! `openadmin assign ...`: the role→permission dialog.

use std::io::Write;

use access::AccessService;
use openadmin_core::ServiceError;
use openadmin_tree::CheckState;

use crate::AssignAction;
use crate::output::Output;

pub fn run<W: Write>(
    access: &mut AccessService,
    action: AssignAction,
    out: &mut Output<W>,
) -> anyhow::Result<()> {
    match action {
        AssignAction::Show { role } => {
            let granted = access.assigned(&role).map_err(ServiceError::from)?.to_vec();
            let effective = access.effective_permissions(&role).map_err(ServiceError::from)?;
            let value = serde_json::json!({
                "role": role,
                "granted": granted,
                "effective": effective,
            });
            out.emit(&value, |w| {
                writeln!(w, "granted:   {}", granted.join(", "))?;
                writeln!(w, "effective: {}", effective.join(", "))
            })
        }

        AssignAction::Open { role } => {
            access.open_assignment(&role).map_err(ServiceError::from)?;
            show_dialog(access, out)
        }

        AssignAction::Check { key } => {
            access.check(&key, true).map_err(ServiceError::from)?;
            show_dialog(access, out)
        }

        AssignAction::Uncheck { key } => {
            access.check(&key, false).map_err(ServiceError::from)?;
            show_dialog(access, out)
        }

        AssignAction::Report { keys } => {
            access.report_checked(keys).map_err(ServiceError::from)?;
            show_dialog(access, out)
        }

        AssignAction::View => show_dialog(access, out),

        AssignAction::Save => {
            let saved = access.save_assignment().map_err(ServiceError::from)?;
            out.emit(&saved, |w| writeln!(w, "saved {} permission key(s).", saved.len()))
        }

        AssignAction::Cancel => {
            if access.cancel_assignment() {
                out.notice("assignment discarded.")
            } else {
                out.notice("no assignment dialog is open.")
            }
        }

        AssignAction::Set { role, keys } => {
            let saved = access.set_assignment(&role, keys).map_err(ServiceError::from)?;
            out.emit(&saved, |w| writeln!(w, "saved {} permission key(s).", saved.len()))
        }
    }
}

/// The permission tree with a tri-state box per node.
fn show_dialog<W: Write>(access: &AccessService, out: &mut Output<W>) -> anyhow::Result<()> {
    let view = access.assignment_view().map_err(ServiceError::from)?;
    out.emit(&view, |w| {
        writeln!(w, "{}", view.title)?;
        for visit in access.tree().iter() {
            let state = view
                .states
                .get(&visit.node.key)
                .copied()
                .unwrap_or(CheckState::Unchecked);
            let mark = match state {
                CheckState::Checked => "[x]",
                CheckState::HalfChecked => "[-]",
                CheckState::Unchecked => "[ ]",
            };
            writeln!(
                w,
                "{}{} {} ({})",
                "  ".repeat(visit.depth),
                mark,
                visit.node.label,
                visit.node.key
            )?;
        }
        Ok(())
    })
}
