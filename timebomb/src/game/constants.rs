/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 3;

/// Most players a game can start with.
pub const MAX_PLAYERS: usize = 8;

/// Cards per player in the first deal of an epoch.
pub const CARDS_PER_PLAYER: usize = 5;

/// Zero-based round on which any non-winning cut ends the game for the
/// bombers.
pub const FINAL_ROUND: usize = 4;

/// Player names are truncated to this many characters.
pub const MAX_NAME_LENGTH: usize = 32;
