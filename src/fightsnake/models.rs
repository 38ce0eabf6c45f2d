use std::{collections::VecDeque, fmt};

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::fightsnake::types::{APIVersion, Coord, Direction, Head, Tail};

struct DeserializeU64OrStringVisitor;

impl<'de> de::Visitor<'de> for DeserializeU64OrStringVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or string")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(u64::try_from(v).unwrap_or(0))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.parse::<u64>().unwrap_or(0))
    }
}

// the engine reports latency as a string, except when it doesn't.
fn from_string_or_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DeserializeU64OrStringVisitor)
}

/// Response body for `GET /`.
#[derive(Serialize, Debug, Clone)]
pub struct Status {
    pub apiversion: APIVersion,
    pub author:     String,
    pub color:      String,
    pub head:       Head,
    pub tail:       Tail,
    pub version:    String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    #[serde(rename = "foodSpawnChance")]
    pub food_spawn_chance:      Option<u64>,
    #[serde(rename = "minimumFood")]
    pub minimum_food:           Option<u64>,
    #[serde(rename = "hazardDamagePerTurn")]
    pub hazard_damage_per_turn: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Ruleset {
    pub name:     String,
    pub version:  String,
    pub settings: Option<Settings>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Game {
    pub id:      String,
    pub ruleset: Ruleset,
    pub map:     Option<String>,
    pub source:  Option<String>,
    pub timeout: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Board {
    pub height:  i64,
    pub width:   i64,
    #[serde(default)]
    pub food:    Vec<Coord>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
    #[serde(default)]
    pub snakes:  Vec<Snake>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Customizations {
    pub color: String,
    pub head:  String,
    pub tail:  String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Snake {
    pub id:             String,
    #[serde(default)]
    pub name:           String,
    #[serde(default)]
    pub health:         i64,
    pub body:           VecDeque<Coord>,
    #[serde(default, deserialize_with = "from_string_or_u64")]
    pub latency:        u64,
    #[serde(default)]
    pub head:           Option<Coord>,
    #[serde(default)]
    pub length:         u64,
    #[serde(default)]
    pub shout:          String,
    #[serde(default)]
    pub squad:          String,
    pub customizations: Option<Customizations>,
}

impl Snake {
    /// The head as reported in the body, falling back to the `head` field.
    #[must_use]
    pub fn head(&self) -> Option<Coord> {
        self.body.front().copied().or(self.head)
    }

    /// The direction the snake last moved in, if its neck is distinct from
    /// its head.
    #[must_use]
    pub fn facing(&self) -> Option<Direction> {
        let head = self.body.front()?;
        let neck = self.body.get(1)?;
        Direction::between(*neck, *head)
    }
}

/// Request body for `/move`.
#[derive(Deserialize, Debug, Clone)]
pub struct GameState {
    #[serde(default)]
    pub game:  Game,
    #[serde(default)]
    pub turn:  u64,
    pub board: Board,
    pub you:   Snake,
}

/// Request body for `/start` and `/end`. Only the game itself matters there,
/// so the board and snakes are not required.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Notification {
    pub game: Game,
    pub turn: u64,
}

/// Response body for `POST /move`.
#[derive(Serialize, Debug, Clone)]
pub struct Movement {
    #[serde(rename = "move")]
    pub movement: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shout:    Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_STATE: &str = r##"{
        "game": {
            "id": "totally-unique-game-id",
            "ruleset": {
                "name": "standard",
                "version": "v1.2.3",
                "settings": {
                    "foodSpawnChance": 25,
                    "minimumFood": 1,
                    "hazardDamagePerTurn": 14
                }
            },
            "map": "standard",
            "source": "league",
            "timeout": 500
        },
        "turn": 14,
        "board": {
            "height": 11,
            "width": 11,
            "food": [{"x": 5, "y": 5}, {"x": 9, "y": 0}, {"x": 2, "y": 6}],
            "hazards": [{"x": 3, "y": 2}],
            "snakes": [
                {
                    "id": "snake-508e96ac-94ad-11ea-bb37",
                    "name": "My Snake",
                    "health": 54,
                    "body": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}],
                    "latency": "111",
                    "head": {"x": 0, "y": 0},
                    "length": 3,
                    "shout": "why are we shouting??",
                    "squad": "",
                    "customizations": {"color": "#FF0000", "head": "pixel", "tail": "pixel"}
                }
            ]
        },
        "you": {
            "id": "snake-508e96ac-94ad-11ea-bb37",
            "name": "My Snake",
            "health": 54,
            "body": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}],
            "latency": 111,
            "head": {"x": 0, "y": 0},
            "length": 3,
            "shout": "why are we shouting??",
            "squad": "",
            "customizations": {"color": "#FF0000", "head": "pixel", "tail": "pixel"}
        }
    }"##;

    #[test]
    fn parses_engine_payload() {
        let state: GameState =
            serde_json::from_str(FULL_STATE).expect("payload should parse");

        assert_eq!(state.game.id, "totally-unique-game-id");
        assert_eq!(state.game.timeout, 500);
        assert_eq!(
            state
                .game
                .ruleset
                .settings
                .and_then(|s| s.hazard_damage_per_turn),
            Some(14)
        );
        assert_eq!(state.turn, 14);
        assert_eq!(state.board.width, 11);
        assert_eq!(state.board.food.len(), 3);
        assert_eq!(state.board.snakes[0].latency, 111);
        assert_eq!(state.you.latency, 111);
        assert_eq!(state.you.head(), Some(Coord::new(0, 0)));
        assert_eq!(state.you.facing(), Some(Direction::Left));
    }

    #[test]
    fn parses_minimal_payload() {
        let state: GameState = serde_json::from_str(
            r#"{
                "board": {"width": 7, "height": 7},
                "you": {"id": "me", "body": [{"x": 1, "y": 1}]}
            }"#,
        )
        .expect("minimal payload should parse");

        assert!(state.game.id.is_empty());
        assert!(state.board.snakes.is_empty());
        assert_eq!(state.you.head(), Some(Coord::new(1, 1)));
        assert_eq!(state.you.facing(), None);
    }

    #[test]
    fn notification_needs_only_the_game() {
        let bare: Notification =
            serde_json::from_str(r#"{"game": {"id": "g"}}"#).expect("parses");
        assert_eq!(bare.game.id, "g");
        assert_eq!(bare.turn, 0);

        let full: Notification =
            serde_json::from_str(FULL_STATE).expect("full state parses");
        assert_eq!(full.game.id, "totally-unique-game-id");
        assert_eq!(full.turn, 14);
    }

    #[test]
    fn garbage_latency_is_zero() {
        let snake: Snake = serde_json::from_str(
            r#"{"id": "s", "body": [], "latency": "timeout"}"#,
        )
        .expect("snake should parse");
        assert_eq!(snake.latency, 0);
        assert_eq!(snake.head(), None);
    }

    #[test]
    fn movement_omits_empty_shout() {
        let quiet = Movement {
            movement: Direction::Left,
            shout:    None,
        };
        assert_eq!(
            serde_json::to_string(&quiet).expect("serializes"),
            r#"{"move":"left"}"#
        );

        let loud = Movement {
            movement: Direction::Up,
            shout:    Some("hi".to_owned()),
        };
        assert_eq!(
            serde_json::to_string(&loud).expect("serializes"),
            r#"{"move":"up","shout":"hi"}"#
        );
    }
}
