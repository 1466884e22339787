use tracing::info;

use openadmin_core::{ListParams, ListResult, merge_patch, new_id, today};
use openadmin_tree::assignment::rename_key;

use crate::model::{CreatePermission, Permission, PermissionKind};
use crate::service::{
    AccessError, AccessService, directed, matches_query, require_object, required,
};

impl AccessService {
    /// Create a new permission. The code must not be taken.
    pub fn create_permission(
        &mut self,
        input: CreatePermission,
    ) -> Result<Permission, AccessError> {
        let name = required(&input.name, "permission name")?;
        let code = required(&input.code, "permission code")?;
        let kind = input
            .kind
            .ok_or_else(|| AccessError::Validation("permission type is required".into()))?;
        self.ensure_code_free(&code, None)?;

        let permission = Permission {
            key: new_id(),
            id: self.permissions.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            name,
            code,
            description: input.description.unwrap_or_default().trim().to_string(),
            kind,
            created_at: today(),
        };
        info!(key = %permission.key, code = %permission.code, "permission created");
        self.permissions.push(permission.clone());
        Ok(permission)
    }

    /// Get a permission by key.
    pub fn get_permission(&self, key: &str) -> Result<&Permission, AccessError> {
        self.permissions
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| AccessError::NotFound(format!("permission '{}'", key)))
    }

    /// List permissions, optionally only one type. `q` filters on name,
    /// code and description; `sort` accepts `id`, `name`, `code` and
    /// `created_at`.
    pub fn list_permissions(
        &self,
        params: &ListParams,
        kind: Option<PermissionKind>,
    ) -> Result<ListResult<Permission>, AccessError> {
        let mut items: Vec<Permission> = self
            .permissions
            .iter()
            .filter(|p| kind.is_none_or(|k| p.kind == k))
            .filter(|p| {
                matches_query(
                    &[p.name.as_str(), p.code.as_str(), p.description.as_str()],
                    params.query(),
                )
            })
            .cloned()
            .collect();

        if let Some((field, desc)) = params.sort_field() {
            match field {
                "id" => items.sort_by(|a, b| directed(a.id.cmp(&b.id), desc)),
                "name" => items.sort_by(|a, b| directed(a.name.cmp(&b.name), desc)),
                "code" => items.sort_by(|a, b| directed(a.code.cmp(&b.code), desc)),
                "created_at" => {
                    items.sort_by(|a, b| directed(a.created_at.cmp(&b.created_at), desc))
                }
                other => {
                    return Err(AccessError::Validation(format!(
                        "cannot sort permissions by '{}'",
                        other
                    )));
                }
            }
        }

        Ok(params.paginate(items))
    }

    /// Update a permission with JSON merge-patch. `key`, `id` and
    /// `created_at` cannot be changed; a new code must be free.
    pub fn update_permission(
        &mut self,
        key: &str,
        patch: serde_json::Value,
    ) -> Result<Permission, AccessError> {
        let current = self.get_permission(key)?.clone();
        require_object(&patch)?;

        let mut base = serde_json::to_value(&current)
            .map_err(|e| AccessError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        base["key"] = serde_json::json!(current.key);
        base["id"] = serde_json::json!(current.id);
        base["created_at"] = serde_json::json!(current.created_at);

        let mut updated: Permission = serde_json::from_value(base)
            .map_err(|e| AccessError::Validation(e.to_string()))?;
        updated.name = required(&updated.name, "permission name")?;
        updated.code = required(&updated.code, "permission code")?;
        self.ensure_code_free(&updated.code, Some(key))?;

        if let Some(slot) = self.permissions.iter_mut().find(|p| p.key == key) {
            *slot = updated.clone();
        }
        if updated.code != current.code {
            // Grants follow the code
            self.assignments.rename_everywhere(&current.code, &updated.code);
            if let Some(draft) = self.draft.as_mut() {
                draft.checked = rename_key(&draft.checked, &current.code, &updated.code);
            }
        }
        info!(key, code = %updated.code, "permission updated");
        Ok(updated)
    }

    /// Delete a permission by key. Its code is revoked from every role.
    pub fn delete_permission(&mut self, key: &str) -> Result<Permission, AccessError> {
        let index = self
            .permissions
            .iter()
            .position(|p| p.key == key)
            .ok_or_else(|| AccessError::NotFound(format!("permission '{}'", key)))?;

        let permission = self.permissions.remove(index);
        self.assignments.revoke_everywhere(&permission.code);
        info!(key, code = %permission.code, "permission deleted");
        Ok(permission)
    }

    fn ensure_code_free(&self, code: &str, except: Option<&str>) -> Result<(), AccessError> {
        let taken = self
            .permissions
            .iter()
            .any(|p| p.code == code && Some(p.key.as_str()) != except);
        if taken {
            return Err(AccessError::Conflict(format!(
                "permission code '{}' already exists",
                code
            )));
        }
        Ok(())
    }
}
