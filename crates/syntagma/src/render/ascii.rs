//! ASCII tree rendering.

use compact_str::CompactString;

/// A tree the ASCII renderer can lay out: a label and child views.
pub trait TreeView {
    /// The node's one-line label.
    fn label(&self) -> CompactString;

    /// The node's children, in display order.
    fn children(&self) -> Vec<&dyn TreeView>;
}

/// Render `root` as a box-drawing tree, one node per line.
///
/// ```text
/// E
/// ├── T
/// │   └── id
/// └── +
/// ```
///
/// The result carries no trailing newline.
#[must_use]
pub fn render_tree(root: &dyn TreeView) -> String {
    let mut out = String::new();
    out.push_str(&root.label());
    render_children(&root.children(), "", &mut out);
    out
}

fn render_children(children: &[&dyn TreeView], prefix: &str, out: &mut String) {
    for (index, child) in children.iter().enumerate() {
        let last = index + 1 == children.len();
        out.push('\n');
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&child.label());
        let extended = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(&child.children(), &extended, out);
    }
}
