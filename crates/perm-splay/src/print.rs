//! Box-drawing dump of a tree's shape and digests, for debugging.
//!
//! Recursive, so only meant for small trees.

use crate::node::NodeArena;

type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Renders `children` one per line under `tab`, with `├─`/`└─` branches.
pub fn print_tree(tab: &str, children: &[Option<&PrintChild<'_>>]) -> String {
    let mut out = String::new();
    let Some(last) = children.iter().rposition(Option::is_some) else {
        return out;
    };

    for (i, child_opt) in children.iter().enumerate().take(last + 1) {
        let Some(child_fn) = *child_opt else {
            continue;
        };

        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let child = child_fn(&child_tab);
        let branch = if child.is_empty() {
            "│"
        } else if is_last {
            "└─"
        } else {
            "├─"
        };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        if !child.is_empty() {
            out.push(' ');
            out.push_str(&child);
        }
    }

    out
}

/// Renders the subtree at `node`. Stored values are shown as-is, pending
/// tags are listed next to the node that holds them.
pub fn print_node(arena: &NodeArena, node: Option<u32>, tab: &str) -> String {
    let Some(i) = node else {
        return "∅".to_string();
    };
    let n = &arena[i];
    let mut head = format!("Node[{i}] {} {{ size={} sum={} min={} max={} }}", n.value, n.size, n.sum, n.min, n.max);
    if let Some(v) = n.pending_assign {
        head.push_str(&format!(" ={v}"));
    }
    if n.pending_add != 0 {
        head.push_str(&format!(" +{}", n.pending_add));
    }
    if n.pending_reverse {
        head.push_str(" ⇄");
    }
    if n.l.is_none() && n.r.is_none() {
        return head;
    }
    let left: &PrintChild<'_> = &|tab: &str| print_node(arena, n.l, tab);
    let right: &PrintChild<'_> = &|tab: &str| print_node(arena, n.r, tab);
    head + &print_tree(tab, &[Some(left), Some(right)])
}
