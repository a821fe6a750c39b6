//! Prettifier — compress a canonical degree set into the shortest Harte string.
//!
//! Greedy longest match: the shorthand table is scanned in priority order
//! and the first pattern contained in the chord body wins. Whatever the
//! pattern does not cover is written out as an explicit degree list. A bare
//! list that names no root, third or fifth would pick up the default triad,
//! so it is pinned with `1` or with `*3`/`*5` markers.

use super::degree::Degree;
use super::resolve::{names_triad, CanonicalDegreeSet};
use super::shorthand::ShorthandTable;

const THIRD: Degree = Degree::from_parts(3, 0);
const FIFTH: Degree = Degree::from_parts(5, 0);

/// Render the most compact Harte string for `set`.
pub fn prettify(set: &CanonicalDegreeSet, table: &ShorthandTable) -> String {
    let body = set.body();
    let has_root = body.contains(&Degree::ROOT);
    let rest: Vec<Degree> = body.into_iter().filter(|d| !d.is_root()).collect();

    let matched = table
        .iter()
        .filter(|entry| !entry.degrees.is_empty())
        .find(|entry| entry.is_contained_in(&rest));

    let mut residual: Vec<Degree> = match matched {
        Some(entry) => rest
            .iter()
            .filter(|d| !entry.degrees.contains(d))
            .copied()
            .collect(),
        None => rest.clone(),
    };

    let mut shorthand = matched.map(|entry| entry.name.as_str());
    if shorthand.is_none() && rest.is_empty() && has_root {
        shorthand = table
            .iter()
            .find(|entry| entry.degrees.is_empty())
            .map(|entry| entry.name.as_str());
    }

    let takes_default_triad = shorthand.is_none() && !rest.iter().any(names_triad);
    if takes_default_triad && has_root {
        residual.insert(0, Degree::ROOT);
    }
    if !has_root {
        residual.push(Degree::ROOT.omitted());
    }
    if takes_default_triad && !has_root {
        residual.extend([THIRD.omitted(), FIFTH.omitted()]);
    }

    let mut out = set.root().to_string();
    if shorthand.is_some() || !residual.is_empty() {
        out.push(':');
    }
    if let Some(name) = shorthand {
        out.push_str(name);
    }
    if !residual.is_empty() {
        let list: Vec<String> = residual.iter().map(Degree::to_string).collect();
        out.push('(');
        out.push_str(&list.join(","));
        out.push(')');
    }
    if renders_bass(set, has_root) {
        out.push('/');
        out.push_str(&set.bass().to_string());
    }
    out
}

/// The bass suffix is dropped in root position, unless the root only sounds
/// because it is the bass.
fn renders_bass(set: &CanonicalDegreeSet, has_root: bool) -> bool {
    let bass = set.bass();
    if bass != Degree::ROOT {
        return true;
    }
    !has_root && set.contains(&Degree::ROOT)
}
