use tracing::info;

use openadmin_core::{ListParams, ListResult, merge_patch, new_id, today};

use crate::model::{CreateRole, Role};
use crate::service::{
    AccessError, AccessService, directed, matches_query, require_object, required,
};

impl AccessService {
    /// Create a new role. It starts with no users and no permissions.
    pub fn create_role(&mut self, input: CreateRole) -> Result<Role, AccessError> {
        let name = required(&input.name, "role name")?;

        let role = Role {
            key: new_id(),
            id: self.roles.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            name,
            description: input.description.unwrap_or_default().trim().to_string(),
            users_count: 0,
            created_at: today(),
        };
        info!(key = %role.key, name = %role.name, "role created");
        self.roles.push(role.clone());
        Ok(role)
    }

    /// Get a role by key.
    pub fn get_role(&self, key: &str) -> Result<&Role, AccessError> {
        self.roles
            .iter()
            .find(|r| r.key == key)
            .ok_or_else(|| AccessError::NotFound(format!("role '{}'", key)))
    }

    /// List roles. `q` filters on name and description; `sort` accepts
    /// `id`, `name`, `users_count` and `created_at`.
    pub fn list_roles(&self, params: &ListParams) -> Result<ListResult<Role>, AccessError> {
        let mut items: Vec<Role> = self
            .roles
            .iter()
            .filter(|r| matches_query(&[r.name.as_str(), r.description.as_str()], params.query()))
            .cloned()
            .collect();

        if let Some((field, desc)) = params.sort_field() {
            match field {
                "id" => items.sort_by(|a, b| directed(a.id.cmp(&b.id), desc)),
                "name" => items.sort_by(|a, b| directed(a.name.cmp(&b.name), desc)),
                "users_count" => {
                    items.sort_by(|a, b| directed(a.users_count.cmp(&b.users_count), desc))
                }
                "created_at" => {
                    items.sort_by(|a, b| directed(a.created_at.cmp(&b.created_at), desc))
                }
                other => {
                    return Err(AccessError::Validation(format!(
                        "cannot sort roles by '{}'",
                        other
                    )));
                }
            }
        }

        Ok(params.paginate(items))
    }

    /// Update a role with JSON merge-patch. `key`, `id` and `created_at`
    /// cannot be changed.
    pub fn update_role(
        &mut self,
        key: &str,
        patch: serde_json::Value,
    ) -> Result<Role, AccessError> {
        let current = self.get_role(key)?.clone();
        require_object(&patch)?;

        let mut base = serde_json::to_value(&current)
            .map_err(|e| AccessError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        base["key"] = serde_json::json!(current.key);
        base["id"] = serde_json::json!(current.id);
        base["created_at"] = serde_json::json!(current.created_at);

        let mut updated: Role = serde_json::from_value(base)
            .map_err(|e| AccessError::Validation(e.to_string()))?;
        updated.name = required(&updated.name, "role name")?;

        if let Some(slot) = self.roles.iter_mut().find(|r| r.key == key) {
            *slot = updated.clone();
        }
        info!(key, "role updated");
        Ok(updated)
    }

    /// Delete a role by key, together with its permission grants.
    pub fn delete_role(&mut self, key: &str) -> Result<Role, AccessError> {
        let index = self
            .roles
            .iter()
            .position(|r| r.key == key)
            .ok_or_else(|| AccessError::NotFound(format!("role '{}'", key)))?;

        // Also drop the grants and any dialog open for this role
        self.assignments.remove(key);
        if self.draft.as_ref().is_some_and(|d| d.role_key == key) {
            self.draft = None;
        }

        let role = self.roles.remove(index);
        info!(key, name = %role.name, "role deleted");
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_crud() {
        let mut svc = AccessService::demo();

        let role = svc
            .create_role(CreateRole {
                name: " 审计员 ".to_string(),
                description: Some("只读审计".to_string()),
            })
            .unwrap();
        assert_eq!(role.name, "审计员");
        assert_eq!(role.id, 5);
        assert_eq!(role.users_count, 0);
        assert_eq!(role.created_at.len(), 10);

        // Get
        assert_eq!(svc.get_role(&role.key).unwrap().description, "只读审计");

        // Update
        let updated = svc
            .update_role(&role.key, serde_json::json!({"description": "审计与合规", "id": 99}))
            .unwrap();
        assert_eq!(updated.description, "审计与合规");
        assert_eq!(updated.id, 5);

        // List
        let list = svc.list_roles(&ListParams::default()).unwrap();
        assert_eq!(list.total, 5);

        // Delete
        svc.delete_role(&role.key).unwrap();
        assert!(matches!(svc.get_role(&role.key), Err(AccessError::NotFound(_))));
    }

    #[test]
    fn test_create_role_requires_name() {
        let mut svc = AccessService::demo();
        let err = svc
            .create_role(CreateRole { name: "  ".into(), description: None })
            .unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)));
        assert_eq!(svc.roles.len(), 4);
    }

    #[test]
    fn test_update_cannot_blank_name() {
        let mut svc = AccessService::demo();
        let err = svc.update_role("1", serde_json::json!({"name": ""})).unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)));
        assert_eq!(svc.get_role("1").unwrap().name, "超级管理员");
    }

    #[test]
    fn test_update_rejects_non_object_patch() {
        let mut svc = AccessService::demo();
        let err = svc
            .update_role("1", serde_json::json!(["not", "an", "object"]))
            .unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)));
        assert_eq!(svc.get_role("1").unwrap().name, "超级管理员");
    }

    #[test]
    fn test_list_roles_filter_and_sort() {
        let svc = AccessService::demo();

        let params = ListParams {
            q: Some("管理员".into()),
            ..Default::default()
        };
        let list = svc.list_roles(&params).unwrap();
        let names: Vec<&str> = list.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["超级管理员", "管理员"]);

        let params = ListParams {
            sort: Some("-users_count".into()),
            limit: 2,
            ..Default::default()
        };
        let list = svc.list_roles(&params).unwrap();
        assert_eq!(list.total, 4);
        let ids: Vec<u32> = list.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);

        let params = ListParams {
            sort: Some("color".into()),
            ..Default::default()
        };
        assert!(matches!(svc.list_roles(&params), Err(AccessError::Validation(_))));
    }

    #[test]
    fn test_delete_role_drops_grants() {
        let mut svc = AccessService::demo();
        svc.open_assignment("2").unwrap();
        svc.delete_role("2").unwrap();
        assert!(!svc.assignments().contains("2"));
        assert!(svc.draft().is_none());
        assert!(matches!(svc.delete_role("2"), Err(AccessError::NotFound(_))));
    }
}
