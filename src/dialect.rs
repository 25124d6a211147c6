//! Compatibility level to grammar version resolution.
//!
//! SQL Server identifies its T-SQL dialects by a numeric compatibility level.
//! Each level selects one `SqlVersion`, which in turn decides the reserved
//! keyword set and the multi-character operators the lexer recognizes.

use serde::Serialize;
use std::fmt;

/// A T-SQL grammar version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SqlVersion {
    /// SQL Server 2000
    Sql80,
    /// SQL Server 2005
    Sql90,
    /// SQL Server 2008 / 2008 R2
    Sql100,
    /// SQL Server 2012
    Sql110,
    /// SQL Server 2014
    Sql120,
    /// SQL Server 2016
    Sql130,
    /// SQL Server 2017
    Sql140,
}

/// Compatibility level assumed when none is given.
pub const DEFAULT_COMPAT_LEVEL: u32 = 110;

/// Compatibility levels understood by the resolver.
const COMPAT_LEVELS: [(u32, SqlVersion); 7] = [
    (80, SqlVersion::Sql80),
    (90, SqlVersion::Sql90),
    (100, SqlVersion::Sql100),
    (110, SqlVersion::Sql110),
    (120, SqlVersion::Sql120),
    (130, SqlVersion::Sql130),
    (140, SqlVersion::Sql140),
];

impl SqlVersion {
    /// Grammar used when the compatibility level is missing or unknown.
    pub const DEFAULT: SqlVersion = SqlVersion::Sql110;

    /// Every supported version, oldest first.
    pub const ALL: [SqlVersion; 7] = [
        SqlVersion::Sql80,
        SqlVersion::Sql90,
        SqlVersion::Sql100,
        SqlVersion::Sql110,
        SqlVersion::Sql120,
        SqlVersion::Sql130,
        SqlVersion::Sql140,
    ];

    /// Look up a compatibility level, returning `None` for unknown levels.
    pub fn lookup(level: u32) -> Option<SqlVersion> {
        COMPAT_LEVELS
            .iter()
            .find(|(known, _)| *known == level)
            .map(|(_, version)| *version)
    }

    /// Resolve a compatibility level, falling back to [`SqlVersion::DEFAULT`].
    pub fn from_compat_level(level: u32) -> SqlVersion {
        match Self::lookup(level) {
            Some(version) => version,
            None => {
                log::warn!(
                    "unrecognized compatibility level {}, using {}",
                    level,
                    Self::DEFAULT
                );
                Self::DEFAULT
            }
        }
    }

    /// The compatibility level this version is selected by.
    pub fn compat_level(self) -> u32 {
        COMPAT_LEVELS
            .iter()
            .find(|(_, version)| *version == self)
            .map(|(level, _)| *level)
            .unwrap_or_default()
    }

    pub fn product_name(self) -> &'static str {
        match self {
            SqlVersion::Sql80 => "SQL Server 2000",
            SqlVersion::Sql90 => "SQL Server 2005",
            SqlVersion::Sql100 => "SQL Server 2008",
            SqlVersion::Sql110 => "SQL Server 2012",
            SqlVersion::Sql120 => "SQL Server 2014",
            SqlVersion::Sql130 => "SQL Server 2016",
            SqlVersion::Sql140 => "SQL Server 2017",
        }
    }
}

impl Default for SqlVersion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SqlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TSql{} ({})", self.compat_level(), self.product_name())
    }
}
