use serde::{Deserialize, Serialize};

/// A single league entry: a player's name and how many games they have won
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub name: String,
    pub wins: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, wins: u32) -> Self {
        Self {
            name: name.into(),
            wins,
        }
    }
}

/// Ordered collection of players, stored on disk as a bare JSON array
///
/// Order at rest is insertion order. Use [`League::sort_by_wins`] for the
/// ranking view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct League(Vec<Player>);

impl League {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decodes a league from raw JSON bytes. Empty or whitespace-only input is an empty league.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }
        serde_json::from_slice(bytes)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn find(&self, name: &str) -> Option<&Player> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.0.iter_mut().find(|p| p.name == name)
    }

    /// Increments the named player's wins, adding them with one win if unknown.
    /// Returns the player's new win count, which saturates at `u32::MAX`.
    pub fn record_win(&mut self, name: &str) -> u32 {
        match self.find_mut(name) {
            Some(player) => {
                player.wins = player.wins.saturating_add(1);
                player.wins
            }
            None => {
                self.0.push(Player::new(name, 1));
                1
            }
        }
    }

    pub fn score_of(&self, name: &str) -> u32 {
        self.find(name).map(|p| p.wins).unwrap_or(0)
    }

    /// Stable sort, most wins first
    pub fn sort_by_wins(&mut self) {
        self.0.sort_by(|a, b| b.wins.cmp(&a.wins));
    }

    pub fn players(&self) -> &[Player] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.0.iter()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.0
    }
}

impl From<Vec<Player>> for League {
    fn from(players: Vec<Player>) -> Self {
        Self(players)
    }
}

impl FromIterator<Player> for League {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for League {
    type Item = Player;
    type IntoIter = std::vec::IntoIter<Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a League {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
