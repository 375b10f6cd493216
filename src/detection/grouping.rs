use log::trace;

use crate::error::Result;
use crate::models::{Group, Target};

/// Link targets into pairs.
///
/// Targets are ordered by the y of their left-most corner. Then for each
/// target `i` the first `j` in that order with `angle(i) - angle(j) > 0`
/// becomes its partner. A target can appear in several groups and the
/// result is not deduplicated.
pub fn group_targets(targets: &[Target]) -> Result<Vec<Group<'_>>> {
    let mut sorted: Vec<&Target> = targets.iter().collect();
    sorted.sort_by_key(|t| t.sorted_vertices_by_x()[0].y);

    let mut groups = Vec::new();
    for (i, &a) in sorted.iter().enumerate() {
        let Some((j, &b)) = sorted
            .iter()
            .enumerate()
            .find(|(_, b)| a.angle() - b.angle() > 0.0)
        else {
            continue;
        };
        trace!("pairing target {} ({:.1} deg) with {} ({:.1} deg)", i, a.angle(), j, b.angle());
        groups.push(Group::new(a, b)?);
    }
    Ok(groups)
}
