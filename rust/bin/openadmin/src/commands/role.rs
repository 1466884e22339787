//! `openadmin role ...`

use std::io::{self, Write};

use access::{AccessService, CreateRole, Role};
use openadmin_core::ServiceError;

use crate::RoleAction;
use crate::commands::{list_params, parse_patch};
use crate::output::Output;

pub fn run<W: Write>(
    access: &mut AccessService,
    action: RoleAction,
    out: &mut Output<W>,
) -> anyhow::Result<()> {
    match action {
        RoleAction::List { q, sort, limit, offset } => {
            let params = list_params(q, sort, limit, offset);
            let list = access.list_roles(&params).map_err(ServiceError::from)?;
            out.emit(&list, |w| {
                writeln!(
                    w,
                    "{:<4} {:<12} {:>6}  {:<10}  {:<32}  DESCRIPTION",
                    "ID", "NAME", "USERS", "CREATED", "KEY"
                )?;
                for role in &list.items {
                    write_row(w, role)?;
                }
                writeln!(w, "({} of {})", list.items.len(), list.total)
            })
        }

        RoleAction::Get { key } => {
            let role = access.get_role(&key).map_err(ServiceError::from)?;
            out.emit(role, |w| write_row(w, role))
        }

        RoleAction::Create { name, description } => {
            let role = access
                .create_role(CreateRole { name, description })
                .map_err(ServiceError::from)?;
            out.emit(&role, |w| writeln!(w, "role {} created (key {}).", role.name, role.key))
        }

        RoleAction::Update { key, json_body } => {
            let patch = parse_patch(&json_body)?;
            let role = access.update_role(&key, patch).map_err(ServiceError::from)?;
            out.emit(&role, |w| write_row(w, &role))
        }

        RoleAction::Delete { key } => {
            let role = access.delete_role(&key).map_err(ServiceError::from)?;
            out.emit(&role, |w| writeln!(w, "role {} deleted.", role.name))
        }
    }
}

fn write_row<W: Write>(w: &mut W, role: &Role) -> io::Result<()> {
    writeln!(
        w,
        "{:<4} {:<12} {:>6}  {:<10}  {:<32}  {}",
        role.id, role.name, role.users_count, role.created_at, role.key, role.description
    )
}
