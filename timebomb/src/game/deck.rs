//! Role pools, deck construction and dealing.

use super::{
    constants::CARDS_PER_PLAYER,
    entities::{Card, Role},
    rng::GameRng,
};

/// `(players, defenders, bombers)`. A pool can hold one more role than
/// there are players; the surplus role is set aside unseen.
pub const ROLE_TABLE: [(usize, usize, usize); 6] = [
    (3, 2, 2),
    (4, 3, 2),
    (5, 3, 2),
    (6, 4, 2),
    (7, 5, 3),
    (8, 5, 3),
];

/// Number of defender and bomber roles in the pool for `player_count`.
#[must_use]
pub fn roles_count(player_count: usize) -> Option<(usize, usize)> {
    ROLE_TABLE
        .iter()
        .find(|(players, _, _)| *players == player_count)
        .map(|&(_, defenders, bombers)| (defenders, bombers))
}

#[must_use]
pub fn role_pool(player_count: usize) -> Option<Vec<Role>> {
    let (defenders, bombers) = roles_count(player_count)?;
    let mut roles = vec![Role::Defender; defenders];
    roles.extend(std::iter::repeat_n(Role::Bomber, bombers));
    Some(roles)
}

/// Shuffles the pool and hands out one role per seat. Returns `None` for
/// player counts the table doesn't cover.
pub fn assign_roles(player_count: usize, rng: &mut GameRng) -> Option<Vec<Role>> {
    let mut roles = role_pool(player_count)?;
    rng.shuffle(&mut roles);
    roles.truncate(player_count);
    Some(roles)
}

/// Builds a shuffled deck of `5 * player_count - cards_consumed` cards:
/// one bomb, enough wires for the defenders to still reach `player_count`
/// reveals, nops for the rest.
pub fn build_deck(
    player_count: usize,
    cards_consumed: usize,
    wires_revealed: usize,
    rng: &mut GameRng,
) -> Vec<Card> {
    let len = (CARDS_PER_PLAYER * player_count).saturating_sub(cards_consumed);
    if len == 0 {
        return Vec::new();
    }

    let wires = player_count.saturating_sub(wires_revealed).min(len - 1);
    let mut cards = Vec::with_capacity(len);
    cards.push(Card::Bomb);
    cards.extend(std::iter::repeat_n(Card::Wire, wires));
    cards.resize(len, Card::Nop);
    rng.shuffle(&mut cards);
    cards
}

/// Splits `cards` into `player_count` contiguous hands of equal size.
/// Cards past the last full hand are left out of the deal.
#[must_use]
pub fn deal_even(cards: &[Card], player_count: usize) -> Vec<Vec<Card>> {
    if player_count == 0 {
        return Vec::new();
    }
    let size = cards.len() / player_count;
    if size == 0 {
        return vec![Vec::new(); player_count];
    }
    cards
        .chunks_exact(size)
        .take(player_count)
        .map(<[Card]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(cards: &[Card], kind: Card) -> usize {
        cards.iter().filter(|&&c| c == kind).count()
    }

    #[test]
    fn test_roles_count_table() {
        assert_eq!(roles_count(3), Some((2, 2)));
        assert_eq!(roles_count(4), Some((3, 2)));
        assert_eq!(roles_count(5), Some((3, 2)));
        assert_eq!(roles_count(6), Some((4, 2)));
        assert_eq!(roles_count(7), Some((5, 3)));
        assert_eq!(roles_count(8), Some((5, 3)));
        assert_eq!(roles_count(2), None);
        assert_eq!(roles_count(9), None);
    }

    #[test]
    fn test_assign_roles_one_per_player() {
        let mut rng = GameRng::seeded(3);
        for n in 3..=8 {
            let roles = assign_roles(n, &mut rng).unwrap();
            assert_eq!(roles.len(), n);

            let (defenders, bombers) = roles_count(n).unwrap();
            let assigned_bombers = roles.iter().filter(|&&r| r == Role::Bomber).count();
            assert!(assigned_bombers <= bombers);
            assert!(n - assigned_bombers <= defenders);
        }
    }

    #[test]
    fn test_assign_roles_rejects_unknown_count() {
        let mut rng = GameRng::seeded(3);
        assert!(assign_roles(1, &mut rng).is_none());
    }

    #[test]
    fn test_full_deck_composition() {
        let mut rng = GameRng::seeded(11);
        let deck = build_deck(4, 0, 0, &mut rng);
        assert_eq!(deck.len(), 20);
        assert_eq!(count(&deck, Card::Bomb), 1);
        assert_eq!(count(&deck, Card::Wire), 4);
        assert_eq!(count(&deck, Card::Nop), 15);
    }

    #[test]
    fn test_deck_shrinks_and_drops_revealed_wires() {
        let mut rng = GameRng::seeded(11);
        let deck = build_deck(5, 10, 2, &mut rng);
        assert_eq!(deck.len(), 15);
        assert_eq!(count(&deck, Card::Bomb), 1);
        assert_eq!(count(&deck, Card::Wire), 3);
    }

    #[test]
    fn test_exhausted_supply_is_empty() {
        let mut rng = GameRng::seeded(11);
        assert!(build_deck(3, 15, 0, &mut rng).is_empty());
        assert!(build_deck(3, 40, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_wires_never_push_out_the_bomb() {
        let mut rng = GameRng::seeded(11);
        // Final deal with no wires found yet: n slots, n wires wanted.
        let deck = build_deck(3, 12, 0, &mut rng);
        assert_eq!(deck.len(), 3);
        assert_eq!(count(&deck, Card::Bomb), 1);
        assert_eq!(count(&deck, Card::Wire), 2);
    }

    #[test]
    fn test_deal_even_splits_in_order() {
        let cards = [
            Card::Bomb,
            Card::Wire,
            Card::Nop,
            Card::Nop,
            Card::Wire,
            Card::Nop,
        ];
        let hands = deal_even(&cards, 3);
        assert_eq!(
            hands,
            vec![
                vec![Card::Bomb, Card::Wire],
                vec![Card::Nop, Card::Nop],
                vec![Card::Wire, Card::Nop],
            ]
        );
    }

    #[test]
    fn test_deal_even_drops_remainder() {
        let cards = [Card::Nop; 7];
        let hands = deal_even(&cards, 3);
        assert_eq!(hands.len(), 3);
        assert!(hands.iter().all(|hand| hand.len() == 2));
    }

    #[test]
    fn test_deal_even_short_deck_gives_empty_hands() {
        let hands = deal_even(&[Card::Bomb, Card::Nop], 3);
        assert_eq!(hands, vec![Vec::<Card>::new(); 3]);
    }
}
