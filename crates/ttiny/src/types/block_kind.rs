use std::fmt;

/// The kind of a control block.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum BlockKind {
    /// `[% IF path %]`
    If,
    /// `[% UNLESS path %]`
    Unless,
    /// `[% FOREACH var IN path %]`
    Foreach,
}

impl BlockKind {
    /// Look up a block kind by its opening keyword.
    ///
    /// Keywords are case-sensitive: `if` is not a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "IF" => Some(BlockKind::If),
            "UNLESS" => Some(BlockKind::Unless),
            "FOREACH" => Some(BlockKind::Foreach),
            _ => None,
        }
    }

    /// Look up a block kind by its correlation id prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'I' => Some(BlockKind::If),
            'U' => Some(BlockKind::Unless),
            'F' => Some(BlockKind::Foreach),
            _ => None,
        }
    }

    /// The opening keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::If => "IF",
            BlockKind::Unless => "UNLESS",
            BlockKind::Foreach => "FOREACH",
        }
    }

    /// The letter that prefixes correlation ids of this kind.
    pub fn prefix(self) -> char {
        match self {
            BlockKind::If => 'I',
            BlockKind::Unless => 'U',
            BlockKind::Foreach => 'F',
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
