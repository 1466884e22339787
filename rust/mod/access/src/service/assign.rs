use tracing::{info, warn};

use openadmin_tree::assignment::dedup_keys;
use openadmin_tree::{check_states, checked_leaves, toggle_check};

use crate::model::{AssignmentDraft, AssignmentView};
use crate::service::{AccessError, AccessService};

impl AccessService {
    /// Open the assignment dialog for a role. The draft starts from the
    /// role's saved grants (empty when it has none). Opening another role
    /// replaces any open draft.
    pub fn open_assignment(&mut self, role_key: &str) -> Result<&AssignmentDraft, AccessError> {
        let role = self.get_role(role_key)?;
        let draft = AssignmentDraft {
            role_key: role.key.clone(),
            role_name: role.name.clone(),
            checked: self.assignments.get(role_key).to_vec(),
        };
        if let Some(old) = self.draft.replace(draft) {
            if old.role_key != role_key {
                warn!(role = %old.role_key, "unsaved assignment discarded");
            }
        }
        self.require_draft()
    }

    pub fn draft(&self) -> Option<&AssignmentDraft> {
        self.draft.as_ref()
    }

    /// Check or uncheck one node in the open dialog, propagating to
    /// descendants and ancestors the way the permission tree does.
    pub fn check(&mut self, key: &str, checked: bool) -> Result<&[String], AccessError> {
        let draft = self.require_draft()?;
        let next = toggle_check(&self.tree, &draft.checked, key, checked)?;
        let draft = self.draft_mut()?;
        draft.checked = next;
        Ok(&draft.checked)
    }

    /// Take the checked list the permission tree reported, as-is.
    pub fn report_checked<I, S>(&mut self, keys: I) -> Result<&[String], AccessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let draft = self.draft_mut()?;
        draft.checked = dedup_keys(keys);
        Ok(&draft.checked)
    }

    /// Render model for the open dialog.
    pub fn assignment_view(&self) -> Result<AssignmentView, AccessError> {
        let draft = self.require_draft()?;
        Ok(AssignmentView {
            title: format!("设置 \"{}\" 的权限", draft.role_name),
            role_key: draft.role_key.clone(),
            checked: draft.checked.clone(),
            states: check_states(&self.tree, &draft.checked),
        })
    }

    /// Store the draft as the role's grants and close the dialog.
    pub fn save_assignment(&mut self) -> Result<Vec<String>, AccessError> {
        let draft = self
            .draft
            .take()
            .ok_or_else(|| AccessError::Validation("no assignment dialog is open".into()))?;
        self.assignments.save(draft.role_key.clone(), draft.checked);
        Ok(self.assignments.get(&draft.role_key).to_vec())
    }

    /// Replace a role's grants directly, without the dialog.
    pub fn set_assignment<I, S>(
        &mut self,
        role_key: &str,
        keys: I,
    ) -> Result<Vec<String>, AccessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.get_role(role_key)?;
        self.assignments.save(role_key, keys);
        Ok(self.assignments.get(role_key).to_vec())
    }

    /// Close the dialog without saving. Returns whether one was open.
    pub fn cancel_assignment(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => {
                info!(role = %draft.role_key, "assignment dialog cancelled");
                true
            }
            None => false,
        }
    }

    /// Saved grants of a role.
    pub fn assigned(&self, role_key: &str) -> Result<&[String], AccessError> {
        self.get_role(role_key)?;
        Ok(self.assignments.get(role_key))
    }

    /// The leaf permission codes among a role's saved grants.
    pub fn effective_permissions(&self, role_key: &str) -> Result<Vec<String>, AccessError> {
        let granted = self.assigned(role_key)?;
        Ok(checked_leaves(&self.tree, granted)
            .into_iter()
            .map(String::from)
            .collect())
    }

    fn require_draft(&self) -> Result<&AssignmentDraft, AccessError> {
        self.draft
            .as_ref()
            .ok_or_else(|| AccessError::Validation("no assignment dialog is open".into()))
    }

    fn draft_mut(&mut self) -> Result<&mut AssignmentDraft, AccessError> {
        self.draft
            .as_mut()
            .ok_or_else(|| AccessError::Validation("no assignment dialog is open".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openadmin_tree::CheckState;

    #[test]
    fn test_open_unknown_role() {
        let mut svc = AccessService::demo();
        assert!(matches!(svc.open_assignment("42"), Err(AccessError::NotFound(_))));
        assert!(svc.draft().is_none());
    }

    #[test]
    fn test_open_loads_saved_grants() {
        let mut svc = AccessService::demo();
        let draft = svc.open_assignment("4").unwrap();
        assert_eq!(draft.checked, vec!["user:view", "org:view", "file:view"]);
        assert_eq!(draft.role_name, "访客");

        let role = svc
            .create_role(crate::model::CreateRole { name: "新角色".into(), description: None })
            .unwrap();
        assert!(svc.open_assignment(&role.key).unwrap().checked.is_empty());
    }

    #[test]
    fn test_check_conducts_through_tree() {
        let mut svc = AccessService::demo();
        svc.open_assignment("4").unwrap();
        let checked = svc.check("org", true).unwrap().to_vec();
        assert!(checked.contains(&"org".to_string()));
        assert!(checked.contains(&"org:delete".to_string()));

        let view = svc.assignment_view().unwrap();
        assert_eq!(view.states["org"], CheckState::Checked);
        assert_eq!(view.states["business"], CheckState::HalfChecked);
        assert_eq!(view.states["role"], CheckState::Unchecked);
        assert_eq!(view.title, "设置 \"访客\" 的权限");

        let checked = svc.check("org:add", false).unwrap();
        assert!(!checked.contains(&"org".to_string()));
        assert!(!checked.contains(&"org:add".to_string()));
        assert!(checked.contains(&"org:edit".to_string()));
    }

    #[test]
    fn test_check_unknown_node() {
        let mut svc = AccessService::demo();
        svc.open_assignment("1").unwrap();
        assert!(matches!(svc.check("ghost", true), Err(AccessError::NotFound(_))));
    }

    #[test]
    fn test_report_then_save_verbatim() {
        let mut svc = AccessService::demo();
        svc.open_assignment("3").unwrap();
        svc.report_checked(["file:view", "user", "file:view", "legacy:key"]).unwrap();
        let saved = svc.save_assignment().unwrap();
        assert_eq!(saved, vec!["file:view", "user", "legacy:key"]);
        assert_eq!(svc.assigned("3").unwrap(), saved.as_slice());
        assert!(svc.draft().is_none());
    }

    #[test]
    fn test_save_twice_is_idempotent() {
        let mut svc = AccessService::demo();
        svc.open_assignment("2").unwrap();
        svc.save_assignment().unwrap();
        let first = svc.assignments().clone();

        svc.open_assignment("2").unwrap();
        svc.save_assignment().unwrap();
        assert_eq!(svc.assignments(), &first);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut svc = AccessService::demo();
        svc.open_assignment("4").unwrap();
        svc.report_checked(Vec::<String>::new()).unwrap();
        assert!(svc.cancel_assignment());
        assert!(!svc.cancel_assignment());
        assert_eq!(svc.assigned("4").unwrap().len(), 3);
        assert!(matches!(svc.save_assignment(), Err(AccessError::Validation(_))));
    }

    #[test]
    fn test_effective_permissions_are_leaves() {
        let mut svc = AccessService::demo();
        svc.set_assignment("4", ["business", "org", "org:view", "user:view"])
            .unwrap();
        assert_eq!(svc.effective_permissions("4").unwrap(), vec!["org:view", "user:view"]);
        assert!(matches!(svc.effective_permissions("9"), Err(AccessError::NotFound(_))));
    }
}
