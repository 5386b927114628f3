use serde::{Deserialize, Serialize};

/// The mark at one end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Tail,
    Arrow,
    /// Undetermined mark, used by partial ancestral graphs.
    Circle,
}

impl Endpoint {
    /// The glyph drawn at the left-hand node of an edge string.
    pub fn left_glyph(&self) -> char {
        match self {
            Self::Tail => '-',
            Self::Arrow => '<',
            Self::Circle => 'o',
        }
    }

    /// The glyph drawn at the right-hand node of an edge string.
    pub fn right_glyph(&self) -> char {
        match self {
            Self::Tail => '-',
            Self::Arrow => '>',
            Self::Circle => 'o',
        }
    }

    fn from_left_glyph(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Tail),
            '<' => Some(Self::Arrow),
            'o' => Some(Self::Circle),
            _ => None,
        }
    }

    fn from_right_glyph(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Tail),
            '>' => Some(Self::Arrow),
            'o' => Some(Self::Circle),
            _ => None,
        }
    }

    /// Parse a three-character connector such as `-->` or `o-o`
    /// into (mark at left node, mark at right node).
    pub fn parse_connector(connector: &str) -> Option<(Self, Self)> {
        let chars: Vec<char> = connector.chars().collect();
        if chars.len() != 3 || chars[1] != '-' {
            return None;
        }
        Some((
            Self::from_left_glyph(chars[0])?,
            Self::from_right_glyph(chars[2])?,
        ))
    }
}
