//! `openadmin perm ...`

use std::io::{self, Write};

use access::{AccessService, CreatePermission, Permission, PermissionKind};
use openadmin_core::ServiceError;

use crate::PermAction;
use crate::commands::{list_params, parse_patch};
use crate::output::Output;

pub fn run<W: Write>(
    access: &mut AccessService,
    action: PermAction,
    out: &mut Output<W>,
) -> anyhow::Result<()> {
    match action {
        PermAction::List { kind, q, sort, limit, offset } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let params = list_params(q, sort, limit, offset);
            let list = access
                .list_permissions(&params, kind)
                .map_err(ServiceError::from)?;
            out.emit(&list, |w| {
                writeln!(
                    w,
                    "{:<4} {:<10} {:<20} {:<4}  {:<10}  {:<32}  DESCRIPTION",
                    "ID", "NAME", "CODE", "TYPE", "CREATED", "KEY"
                )?;
                for perm in &list.items {
                    write_row(w, perm)?;
                }
                writeln!(w, "({} of {})", list.items.len(), list.total)
            })
        }

        PermAction::Get { key } => {
            let perm = access.get_permission(&key).map_err(ServiceError::from)?;
            out.emit(perm, |w| write_row(w, perm))
        }

        PermAction::Create { name, code, kind, description } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let perm = access
                .create_permission(CreatePermission { name, code, kind, description })
                .map_err(ServiceError::from)?;
            out.emit(&perm, |w| writeln!(w, "permission {} created (key {}).", perm.code, perm.key))
        }

        PermAction::Update { key, json_body } => {
            let patch = parse_patch(&json_body)?;
            let perm = access.update_permission(&key, patch).map_err(ServiceError::from)?;
            out.emit(&perm, |w| write_row(w, &perm))
        }

        PermAction::Delete { key } => {
            let perm = access.delete_permission(&key).map_err(ServiceError::from)?;
            out.emit(&perm, |w| writeln!(w, "permission {} deleted.", perm.code))
        }
    }
}

fn parse_kind(value: &str) -> Result<PermissionKind, ServiceError> {
    value.parse().map_err(ServiceError::Validation)
}

fn write_row<W: Write>(w: &mut W, perm: &Permission) -> io::Result<()> {
    writeln!(
        w,
        "{:<4} {:<10} {:<20} {:<4}  {:<10}  {:<32}  {}",
        perm.id, perm.name, perm.code, perm.kind, perm.created_at, perm.key, perm.description
    )
}
