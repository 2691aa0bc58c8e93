//! Reviewer selection.
//!
//! Two pieces composed by every call site that needs a reviewer:
//!
//! - [`eligible_reviewers`] narrows a roster down to the members that may
//!   review: active, not the excluded user, not already assigned.
//! - [`pick_distinct`] draws indices uniformly without replacement. The
//!   generator is seeded from the operating system on every call so that the
//!   next pick cannot be predicted from earlier ones.

use std::collections::HashSet;

use rand::{CryptoRng, Rng, SeedableRng, rngs::StdRng, seq::index};

use crate::{EngineError, ResultEngine, TeamMember};

/// Returns the ids of the members allowed to review, in roster order.
pub fn eligible_reviewers(
    members: &[TeamMember],
    exclude_user_id: &str,
    already_assigned: &HashSet<&str>,
) -> Vec<String> {
    members
        .iter()
        .filter(|m| m.is_active)
        .filter(|m| m.user_id != exclude_user_id)
        .filter(|m| !already_assigned.contains(m.user_id.as_str()))
        .map(|m| m.user_id.clone())
        .collect()
}

/// Picks `min(count, pool_len)` distinct indices in `0..pool_len`.
pub fn pick_distinct(pool_len: usize, count: usize) -> ResultEngine<Vec<usize>> {
    let mut rng =
        StdRng::try_from_os_rng().map_err(|err| EngineError::RandomSource(err.to_string()))?;
    Ok(pick_distinct_with(&mut rng, pool_len, count))
}

/// Same as [`pick_distinct`] with a caller provided generator.
pub fn pick_distinct_with<R>(rng: &mut R, pool_len: usize, count: usize) -> Vec<usize>
where
    R: Rng + CryptoRng + ?Sized,
{
    let amount = count.min(pool_len);
    index::sample(rng, pool_len, amount).into_vec()
}

/// Chooses up to `count` ids out of `candidates`.
pub fn select_reviewers(candidates: &[String], count: usize) -> ResultEngine<Vec<String>> {
    let picked = pick_distinct(candidates.len(), count)?;
    Ok(picked
        .into_iter()
        .filter_map(|i| candidates.get(i).cloned())
        .collect())
}

/// Chooses exactly one id, `None` when there is nobody to choose from.
pub fn select_one(candidates: &[String]) -> ResultEngine<Option<String>> {
    Ok(select_reviewers(candidates, 1)?.into_iter().next())
}
