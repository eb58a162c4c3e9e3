use regex::Regex;
use std::sync::OnceLock;

/// Extracts constraint names and offending key/value pairs from PostgreSQL
/// error messages and details.
pub struct ConstraintParser;

struct Patterns {
    /// `Key (school_id)=(…) is not present…` / `Key (lower(name::text))=(…) already exists.`
    key_value: Regex,
    constraint: Regex,
    table: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        key_value: Regex::new(r"Key \((.+?)\)=\((.*?)\)(?: already exists| is not present|\.|$)")
            .expect("key/value pattern is valid"),
        constraint: Regex::new(r#"constraint "([^"]+)""#).expect("constraint pattern is valid"),
        table: Regex::new(r#"table "([^"]+)""#).expect("table pattern is valid"),
    })
}

impl ConstraintParser {
    /// Returns `(column expression, value)` from a `Key (…)=(…)` fragment.
    pub fn key_value(text: &str) -> Option<(String, String)> {
        patterns()
            .key_value
            .captures(text)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    /// Constraint name quoted in a violation message.
    pub fn constraint_name(text: &str) -> Option<String> {
        patterns()
            .constraint
            .captures(text)
            .map(|caps| caps[1].to_string())
    }

    /// First table name quoted in a violation message.
    pub fn table_name(text: &str) -> Option<String> {
        patterns()
            .table
            .captures(text)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expression_index_key() {
        let detail = "Key (lower(name::text))=(springfield elementary) already exists.";
        assert_eq!(
            ConstraintParser::key_value(detail),
            Some((
                "lower(name::text)".to_string(),
                "springfield elementary".to_string()
            ))
        );
    }

    #[test]
    fn parses_foreign_key_detail() {
        let detail = "Key (school_id)=(7d0e6c1e-2f7b-4b8e-9a53-000000000001) is not present in table \"schools\".";
        let (column, value) = ConstraintParser::key_value(detail).unwrap();
        assert_eq!(column, "school_id");
        assert_eq!(value, "7d0e6c1e-2f7b-4b8e-9a53-000000000001");
        assert_eq!(
            ConstraintParser::table_name(detail),
            Some("schools".to_string())
        );
    }

    #[test]
    fn parses_constraint_name_from_message() {
        let message = "insert or update on table \"students\" violates foreign key constraint \"fk_student_school\"";
        assert_eq!(
            ConstraintParser::constraint_name(message),
            Some("fk_student_school".to_string())
        );
        assert_eq!(
            ConstraintParser::table_name(message),
            Some("students".to_string())
        );
    }

    #[test]
    fn missing_fragments_yield_none() {
        assert_eq!(ConstraintParser::key_value("something went wrong"), None);
        assert_eq!(ConstraintParser::constraint_name("no quotes here"), None);
    }
}
