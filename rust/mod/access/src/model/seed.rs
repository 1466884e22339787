use openadmin_tree::{Assignments, Tree, TreeNode};

use crate::model::{Permission, PermissionKind, Role};

fn role(id: u32, name: &str, description: &str, users_count: u32, created_at: &str) -> Role {
    Role {
        key: id.to_string(),
        id,
        name: name.into(),
        description: description.into(),
        users_count,
        created_at: created_at.into(),
    }
}

fn permission(
    id: u32,
    name: &str,
    code: &str,
    description: &str,
    kind: PermissionKind,
    created_at: &str,
) -> Permission {
    Permission {
        key: id.to_string(),
        id,
        name: name.into(),
        code: code.into(),
        description: description.into(),
        kind,
        created_at: created_at.into(),
    }
}

/// Built-in roles.
pub fn seed_roles() -> Vec<Role> {
    vec![
        role(1, "超级管理员", "系统最高权限，可以管理所有功能", 3, "2023-01-01"),
        role(2, "管理员", "系统管理权限，可以管理大部分功能", 5, "2023-01-02"),
        role(3, "普通用户", "基本操作权限，只能使用基本功能", 42, "2023-01-03"),
        role(4, "访客", "只读权限，只能查看不能修改", 18, "2023-01-04"),
    ]
}

/// Built-in permission codes.
pub fn seed_permissions() -> Vec<Permission> {
    use PermissionKind::{Action, Menu};
    vec![
        permission(1, "用户管理", "user:view", "查看用户列表", Menu, "2023-01-01"),
        permission(2, "用户添加", "user:add", "添加用户", Action, "2023-01-01"),
        permission(3, "用户编辑", "user:edit", "编辑用户", Action, "2023-01-01"),
        permission(4, "用户删除", "user:delete", "删除用户", Action, "2023-01-01"),
        permission(5, "组织管理", "org:view", "查看组织列表", Menu, "2023-01-02"),
        permission(6, "组织添加", "org:add", "添加组织", Action, "2023-01-02"),
        permission(7, "组织编辑", "org:edit", "编辑组织", Action, "2023-01-02"),
        permission(8, "组织删除", "org:delete", "删除组织", Action, "2023-01-02"),
    ]
}

fn group(key: &str, label: &str, leaves: &[(&str, &str)]) -> TreeNode {
    leaves
        .iter()
        .fold(TreeNode::leaf(key, label), |node, (k, l)| node.child(TreeNode::leaf(*k, *l)))
}

/// The permission tree shown in the assignment dialog. Leaf keys are
/// permission codes.
pub fn permission_tree() -> Tree {
    let system = TreeNode::leaf("system", "系统管理")
        .child(group(
            "user",
            "用户管理",
            &[
                ("user:view", "查看用户列表"),
                ("user:add", "添加用户"),
                ("user:edit", "编辑用户"),
                ("user:delete", "删除用户"),
            ],
        ))
        .child(group(
            "role",
            "角色管理",
            &[
                ("role:view", "查看角色列表"),
                ("role:add", "添加角色"),
                ("role:edit", "编辑角色"),
                ("role:delete", "删除角色"),
                ("role:assignPerm", "分配权限"),
            ],
        ))
        .child(group(
            "permission",
            "权限管理",
            &[
                ("permission:view", "查看权限列表"),
                ("permission:add", "添加权限"),
                ("permission:edit", "编辑权限"),
                ("permission:delete", "删除权限"),
            ],
        ));

    let business = TreeNode::leaf("business", "业务管理")
        .child(group(
            "org",
            "组织管理",
            &[
                ("org:view", "查看组织列表"),
                ("org:add", "添加组织"),
                ("org:edit", "编辑组织"),
                ("org:delete", "删除组织"),
            ],
        ))
        .child(group(
            "file",
            "文件管理",
            &[
                ("file:view", "查看文件列表"),
                ("file:upload", "上传文件"),
                ("file:download", "下载文件"),
                ("file:delete", "删除文件"),
            ],
        ));

    Tree::from_roots(vec![system, business]).unwrap_or_default()
}

/// Grants the built-in roles start with.
pub fn default_assignments() -> Assignments {
    let mut assignments = Assignments::new();
    assignments.save(
        "1",
        [
            "user:view", "user:add", "user:edit", "user:delete",
            "org:view", "org:add", "org:edit", "org:delete",
            "role:view", "role:add", "role:edit", "role:delete", "role:assignPerm",
            "permission:view", "permission:add", "permission:edit", "permission:delete",
            "file:view", "file:upload", "file:download", "file:delete",
        ],
    );
    assignments.save(
        "2",
        [
            "user:view", "user:add", "user:edit",
            "org:view", "org:add", "org:edit",
            "role:view",
            "file:view", "file:upload", "file:download",
        ],
    );
    assignments.save("3", ["user:view", "org:view", "file:view", "file:download"]);
    assignments.save("4", ["user:view", "org:view", "file:view"]);
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_tree_shape() {
        let tree = permission_tree();
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.len(), 2 + 5 + 21);
        assert_eq!(tree.find_parent_key("role:assignPerm"), Some("role"));
    }

    #[test]
    fn test_default_grants_are_tree_leaves() {
        let tree = permission_tree();
        let assignments = default_assignments();
        assert_eq!(assignments.len(), 4);
        for (_, keys) in assignments.iter() {
            for key in keys {
                assert!(tree.find_by_key(key).is_some_and(TreeNode::is_leaf), "{}", key);
            }
        }
        assert_eq!(assignments.get("1").len(), 21);
    }

    #[test]
    fn test_seed_codes_are_unique() {
        let perms = seed_permissions();
        let mut codes: Vec<&str> = perms.iter().map(|p| p.code.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), perms.len());
        assert_eq!(seed_roles().len(), 4);
    }
}
