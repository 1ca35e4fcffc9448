use roster_types::{User, UserId};

/// Narrows a team roster down to users who may review a given pull request.
///
/// `roster` is expected to hold active users only. The author and every id
/// in `excluded` are dropped; everyone else is kept in roster order. When
/// replacing a reviewer, `excluded` must include the reviewer being
/// replaced so it cannot be drawn as its own replacement.
pub fn eligible_candidates(roster: Vec<User>, author_id: UserId, excluded: &[UserId]) -> Vec<User> {
    roster
        .into_iter()
        .filter(|u| u.id != author_id && !excluded.contains(&u.id))
        .collect()
}
