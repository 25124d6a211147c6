//! Reserved keywords per grammar version

use crate::dialect::SqlVersion;

/// Reserved words and the first version that reserves them.
/// Kept in ASCII order so lookups can binary search.
const RESERVED: &[(&str, SqlVersion)] = &[
    ("ADD", SqlVersion::Sql80),
    ("ALL", SqlVersion::Sql80),
    ("ALTER", SqlVersion::Sql80),
    ("AND", SqlVersion::Sql80),
    ("ANY", SqlVersion::Sql80),
    ("AS", SqlVersion::Sql80),
    ("ASC", SqlVersion::Sql80),
    ("AUTHORIZATION", SqlVersion::Sql80),
    ("BACKUP", SqlVersion::Sql80),
    ("BEGIN", SqlVersion::Sql80),
    ("BETWEEN", SqlVersion::Sql80),
    ("BREAK", SqlVersion::Sql80),
    ("BROWSE", SqlVersion::Sql80),
    ("BULK", SqlVersion::Sql80),
    ("BY", SqlVersion::Sql80),
    ("CASCADE", SqlVersion::Sql80),
    ("CASE", SqlVersion::Sql80),
    ("CHECK", SqlVersion::Sql80),
    ("CHECKPOINT", SqlVersion::Sql80),
    ("CLOSE", SqlVersion::Sql80),
    ("CLUSTERED", SqlVersion::Sql80),
    ("COALESCE", SqlVersion::Sql80),
    ("COLLATE", SqlVersion::Sql80),
    ("COLUMN", SqlVersion::Sql80),
    ("COMMIT", SqlVersion::Sql80),
    ("COMPUTE", SqlVersion::Sql80),
    ("CONSTRAINT", SqlVersion::Sql80),
    ("CONTAINS", SqlVersion::Sql80),
    ("CONTAINSTABLE", SqlVersion::Sql80),
    ("CONTINUE", SqlVersion::Sql80),
    ("CONVERT", SqlVersion::Sql80),
    ("CREATE", SqlVersion::Sql80),
    ("CROSS", SqlVersion::Sql80),
    ("CURRENT", SqlVersion::Sql80),
    ("CURRENT_DATE", SqlVersion::Sql80),
    ("CURRENT_TIME", SqlVersion::Sql80),
    ("CURRENT_TIMESTAMP", SqlVersion::Sql80),
    ("CURRENT_USER", SqlVersion::Sql80),
    ("CURSOR", SqlVersion::Sql80),
    ("DATABASE", SqlVersion::Sql80),
    ("DBCC", SqlVersion::Sql80),
    ("DEALLOCATE", SqlVersion::Sql80),
    ("DECLARE", SqlVersion::Sql80),
    ("DEFAULT", SqlVersion::Sql80),
    ("DELETE", SqlVersion::Sql80),
    ("DENY", SqlVersion::Sql80),
    ("DESC", SqlVersion::Sql80),
    ("DISK", SqlVersion::Sql80),
    ("DISTINCT", SqlVersion::Sql80),
    ("DISTRIBUTED", SqlVersion::Sql80),
    ("DOUBLE", SqlVersion::Sql80),
    ("DROP", SqlVersion::Sql80),
    ("DUMP", SqlVersion::Sql80),
    ("ELSE", SqlVersion::Sql80),
    ("END", SqlVersion::Sql80),
    ("ERRLVL", SqlVersion::Sql80),
    ("ESCAPE", SqlVersion::Sql80),
    ("EXCEPT", SqlVersion::Sql90),
    ("EXEC", SqlVersion::Sql80),
    ("EXECUTE", SqlVersion::Sql80),
    ("EXISTS", SqlVersion::Sql80),
    ("EXIT", SqlVersion::Sql80),
    ("EXTERNAL", SqlVersion::Sql90),
    ("FETCH", SqlVersion::Sql80),
    ("FILE", SqlVersion::Sql80),
    ("FILLFACTOR", SqlVersion::Sql80),
    ("FOR", SqlVersion::Sql80),
    ("FOREIGN", SqlVersion::Sql80),
    ("FREETEXT", SqlVersion::Sql80),
    ("FREETEXTTABLE", SqlVersion::Sql80),
    ("FROM", SqlVersion::Sql80),
    ("FULL", SqlVersion::Sql80),
    ("FUNCTION", SqlVersion::Sql80),
    ("GOTO", SqlVersion::Sql80),
    ("GRANT", SqlVersion::Sql80),
    ("GROUP", SqlVersion::Sql80),
    ("HAVING", SqlVersion::Sql80),
    ("HOLDLOCK", SqlVersion::Sql80),
    ("IDENTITY", SqlVersion::Sql80),
    ("IDENTITYCOL", SqlVersion::Sql80),
    ("IDENTITY_INSERT", SqlVersion::Sql80),
    ("IF", SqlVersion::Sql80),
    ("IN", SqlVersion::Sql80),
    ("INDEX", SqlVersion::Sql80),
    ("INNER", SqlVersion::Sql80),
    ("INSERT", SqlVersion::Sql80),
    ("INTERSECT", SqlVersion::Sql90),
    ("INTO", SqlVersion::Sql80),
    ("IS", SqlVersion::Sql80),
    ("JOIN", SqlVersion::Sql80),
    ("KEY", SqlVersion::Sql80),
    ("KILL", SqlVersion::Sql80),
    ("LEFT", SqlVersion::Sql80),
    ("LIKE", SqlVersion::Sql80),
    ("LINENO", SqlVersion::Sql80),
    ("LOAD", SqlVersion::Sql80),
    ("MERGE", SqlVersion::Sql100),
    ("NATIONAL", SqlVersion::Sql80),
    ("NOCHECK", SqlVersion::Sql80),
    ("NONCLUSTERED", SqlVersion::Sql80),
    ("NOT", SqlVersion::Sql80),
    ("NULL", SqlVersion::Sql80),
    ("NULLIF", SqlVersion::Sql80),
    ("OF", SqlVersion::Sql80),
    ("OFF", SqlVersion::Sql80),
    ("OFFSETS", SqlVersion::Sql80),
    ("ON", SqlVersion::Sql80),
    ("OPEN", SqlVersion::Sql80),
    ("OPENDATASOURCE", SqlVersion::Sql80),
    ("OPENQUERY", SqlVersion::Sql80),
    ("OPENROWSET", SqlVersion::Sql80),
    ("OPENXML", SqlVersion::Sql80),
    ("OPTION", SqlVersion::Sql80),
    ("OR", SqlVersion::Sql80),
    ("ORDER", SqlVersion::Sql80),
    ("OUTER", SqlVersion::Sql80),
    ("OVER", SqlVersion::Sql80),
    ("PERCENT", SqlVersion::Sql80),
    ("PIVOT", SqlVersion::Sql90),
    ("PLAN", SqlVersion::Sql80),
    ("PRECISION", SqlVersion::Sql80),
    ("PRIMARY", SqlVersion::Sql80),
    ("PRINT", SqlVersion::Sql80),
    ("PROC", SqlVersion::Sql80),
    ("PROCEDURE", SqlVersion::Sql80),
    ("PUBLIC", SqlVersion::Sql80),
    ("RAISERROR", SqlVersion::Sql80),
    ("READ", SqlVersion::Sql80),
    ("READTEXT", SqlVersion::Sql80),
    ("RECONFIGURE", SqlVersion::Sql80),
    ("REFERENCES", SqlVersion::Sql80),
    ("REPLICATION", SqlVersion::Sql80),
    ("RESTORE", SqlVersion::Sql80),
    ("RESTRICT", SqlVersion::Sql80),
    ("RETURN", SqlVersion::Sql80),
    ("REVERT", SqlVersion::Sql90),
    ("REVOKE", SqlVersion::Sql80),
    ("RIGHT", SqlVersion::Sql80),
    ("ROLLBACK", SqlVersion::Sql80),
    ("ROWCOUNT", SqlVersion::Sql80),
    ("ROWGUIDCOL", SqlVersion::Sql80),
    ("RULE", SqlVersion::Sql80),
    ("SAVE", SqlVersion::Sql80),
    ("SCHEMA", SqlVersion::Sql80),
    ("SECURITYAUDIT", SqlVersion::Sql90),
    ("SELECT", SqlVersion::Sql80),
    ("SEMANTICKEYPHRASETABLE", SqlVersion::Sql110),
    ("SEMANTICSIMILARITYDETAILSTABLE", SqlVersion::Sql110),
    ("SEMANTICSIMILARITYTABLE", SqlVersion::Sql110),
    ("SESSION_USER", SqlVersion::Sql80),
    ("SET", SqlVersion::Sql80),
    ("SETUSER", SqlVersion::Sql80),
    ("SHUTDOWN", SqlVersion::Sql80),
    ("SOME", SqlVersion::Sql80),
    ("STATISTICS", SqlVersion::Sql80),
    ("SYSTEM_USER", SqlVersion::Sql80),
    ("TABLE", SqlVersion::Sql80),
    ("TABLESAMPLE", SqlVersion::Sql90),
    ("TEXTSIZE", SqlVersion::Sql80),
    ("THEN", SqlVersion::Sql80),
    ("TO", SqlVersion::Sql80),
    ("TOP", SqlVersion::Sql80),
    ("TRAN", SqlVersion::Sql80),
    ("TRANSACTION", SqlVersion::Sql80),
    ("TRIGGER", SqlVersion::Sql80),
    ("TRUNCATE", SqlVersion::Sql80),
    ("TRY_CONVERT", SqlVersion::Sql110),
    ("TSEQUAL", SqlVersion::Sql80),
    ("UNION", SqlVersion::Sql80),
    ("UNIQUE", SqlVersion::Sql80),
    ("UNPIVOT", SqlVersion::Sql90),
    ("UPDATE", SqlVersion::Sql80),
    ("UPDATETEXT", SqlVersion::Sql80),
    ("USE", SqlVersion::Sql80),
    ("USER", SqlVersion::Sql80),
    ("VALUES", SqlVersion::Sql80),
    ("VARYING", SqlVersion::Sql80),
    ("VIEW", SqlVersion::Sql80),
    ("WAITFOR", SqlVersion::Sql80),
    ("WHEN", SqlVersion::Sql80),
    ("WHERE", SqlVersion::Sql80),
    ("WHILE", SqlVersion::Sql80),
    ("WITH", SqlVersion::Sql80),
    ("WITHIN", SqlVersion::Sql110),
    ("WRITETEXT", SqlVersion::Sql80),
];

/// Whether `word` is a reserved keyword under `version`.
pub fn is_reserved(word: &str, version: SqlVersion) -> bool {
    if word.len() > 32 || !word.is_ascii() {
        return false;
    }
    let upper = word.to_ascii_uppercase();
    RESERVED
        .binary_search_by(|(keyword, _)| (*keyword).cmp(upper.as_str()))
        .map(|idx| RESERVED[idx].1 <= version)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_table_is_sorted() {
        assert!(RESERVED.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_reserved("select", SqlVersion::Sql80));
        assert!(is_reserved("SeLeCt", SqlVersion::Sql80));
        assert!(!is_reserved("selects", SqlVersion::Sql140));
    }

    #[test_case("PIVOT", SqlVersion::Sql80, false)]
    #[test_case("PIVOT", SqlVersion::Sql90, true)]
    #[test_case("MERGE", SqlVersion::Sql90, false)]
    #[test_case("MERGE", SqlVersion::Sql100, true)]
    #[test_case("TRY_CONVERT", SqlVersion::Sql100, false)]
    #[test_case("TRY_CONVERT", SqlVersion::Sql110, true)]
    #[test_case("WITHIN", SqlVersion::Sql140, true)]
    fn test_version_gates(word: &str, version: SqlVersion, expected: bool) {
        assert_eq!(is_reserved(word, version), expected);
    }

    #[test]
    fn test_go_is_not_reserved() {
        for version in SqlVersion::ALL {
            assert!(!is_reserved("GO", version));
        }
    }
}
