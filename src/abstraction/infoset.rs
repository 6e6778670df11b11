use super::position::Position;
use crate::cards::Street;
use std::fmt::Write as _;

/// canonical information-set key: `s{street}_{pos}_{bucket}_{history}`. `bucket`
/// must depend only on the acting player's private knowledge and the currently
/// public cards -- never on the opponent's hole cards -- so this builder takes a
/// pre-formatted bucket tag rather than reaching into opponent state itself.
pub fn infoset_key(street: Street, position: Position, bucket: &dyn std::fmt::Display, history: &str) -> String {
    let mut key = String::with_capacity(32);
    let _ = write!(key, "s{}_{}_{}_{}", street as u8, position, bucket, history);
    key
}
