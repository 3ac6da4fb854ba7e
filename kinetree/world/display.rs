//! Human-readable world dump
//!
//! ```text
//! N
//!   ├─ A
//!   │  └─ B
//!   └─ C
//! [A] <- (1, 0, 0), θ: 1.5707963267948966
//! [B] <- (1, 0, 0), θ: 1.5707963267948966
//! [C] <- (0, 0, 0), θ: 0
//! ```

use super::World;
use crate::frame::Frame;
use crate::tree::FrameTree;
use std::fmt;

impl<R: Frame> fmt::Display for World<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tree.root())?;

        let mut prefix = String::from("  ");
        write_branches(f, &self.tree, 0, &mut prefix)?;

        for edge in self.edges() {
            writeln!(f, "{}", edge)?;
        }
        Ok(())
    }
}

fn write_branches(f: &mut fmt::Formatter<'_>, tree: &FrameTree, node: usize, prefix: &mut String) -> fmt::Result {
    let children: Vec<usize> = tree.children_at(node).collect();

    for (i, &child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        if let Some(frame) = tree.frame_at(child) {
            writeln!(f, "{}{} {}", prefix, if last { "└─" } else { "├─" }, frame)?;
        }

        let len = prefix.len();
        prefix.push_str(if last { "   " } else { "│  " });
        write_branches(f, tree, child, prefix)?;
        prefix.truncate(len);
    }

    Ok(())
}
