use openadmin_tree::{Tree, TreeNode};

/// Keys expanded when the demo organization loads.
pub const DEMO_EXPANDED: [&str; 3] = ["0", "0-0", "0-1"];

/// The demo organization every seeded session starts from.
pub fn demo_tree() -> Tree {
    let company = TreeNode::leaf("0", "总公司")
        .child(
            TreeNode::leaf("0-0", "研发部")
                .child(TreeNode::leaf("0-0-0", "前端组"))
                .child(TreeNode::leaf("0-0-1", "后端组"))
                .child(TreeNode::leaf("0-0-2", "测试组")),
        )
        .child(
            TreeNode::leaf("0-1", "市场部")
                .child(TreeNode::leaf("0-1-0", "营销组"))
                .child(TreeNode::leaf("0-1-1", "策划组")),
        )
        .child(TreeNode::leaf("0-2", "财务部"))
        .child(TreeNode::leaf("0-3", "人力资源部"));

    Tree::from_roots(vec![company]).unwrap_or_default()
}
