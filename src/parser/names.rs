use std::sync::LazyLock;

use regex::Regex;

/// Words whose singular and plural forms are identical.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// Irregular `(plural, singular)` pairs, matched on the last word of a name.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("sexes", "sex"),
    ("moves", "move"),
    ("zombies", "zombie"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
];

/// Suffix rules, most specific first. The first matching rule wins.
static SINGULAR_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)(database)s$", "${1}"),
        (r"(?i)(quiz)zes$", "${1}"),
        (r"(?i)(matr)ices$", "${1}ix"),
        (r"(?i)(vert|ind)ices$", "${1}ex"),
        (r"(?i)(^|_)(ox)en$", "${1}${2}"),
        (r"(?i)(alias|status)(es)?$", "${1}"),
        (r"(?i)(octop|vir)(us|i)$", "${1}us"),
        (r"(?i)(^|_)(a)x[ie]s$", "${1}${2}xis"),
        (r"(?i)(cris|test)(is|es)$", "${1}is"),
        (r"(?i)(shoe)s$", "${1}"),
        (r"(?i)(o)es$", "${1}"),
        (r"(?i)(bus)(es)?$", "${1}"),
        (r"(?i)(^|_)([ml])ice$", "${1}${2}ouse"),
        (r"(?i)(x|ch|ss|sh)es$", "${1}"),
        (r"(?i)(m)ovies$", "${1}ovie"),
        (r"(?i)(s)eries$", "${1}eries"),
        (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
        (r"(?i)([lr])ves$", "${1}f"),
        (r"(?i)(tive)s$", "${1}"),
        (r"(?i)(hive)s$", "${1}"),
        (r"(?i)([^f])ves$", "${1}fe"),
        (
            r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
            "${1}sis",
        ),
        (r"(?i)([ti])a$", "${1}um"),
        (r"(?i)(n)ews$", "${1}ews"),
        (r"(?i)(ss)$", "${1}"),
        (r"(?i)s$", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let regex = Regex::new(pattern).unwrap_or_else(|e| panic!("bad rule {pattern}: {e}"));
        (regex, replacement)
    })
    .collect()
});

/// Return `"{schema}.{table}"`, or just `table` when `schema` is empty.
pub fn qualified_table_name(schema: &str, table: &str) -> String {
    if schema.is_empty() {
        table.to_string()
    } else {
        format!("{schema}.{table}")
    }
}

/// Singularize an English plural noun.
///
/// Only the last `_`-separated word is inflected, so snake_case table names
/// such as `product_categories` become `product_category`.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let split = word.rfind('_').map_or(0, |idx| idx + 1);
    let (prefix, last) = word.split_at(split);
    let lower = last.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return format!("{prefix}{}", match_leading_case(last, singular));
    }

    for (rule, replacement) in SINGULAR_RULES.iter() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

/// Derive the conventional primary-key column of a table: the singular table
/// name followed by `_id`.
///
/// Examples:
/// - `"products"` -> `"product_id"`
/// - `"categories"` -> `"category_id"`
pub fn primary_key_from_table_name(table: &str) -> String {
    format!("{}_id", singularize(table))
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    let upper = original.chars().next().is_some_and(char::is_uppercase);
    if !upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_table_name_only_prefixes_non_empty_schema() {
        assert_eq!(qualified_table_name("my_schema", "my_table"), "my_schema.my_table");
        assert_eq!(qualified_table_name("", "my_table"), "my_table");
    }

    #[test]
    fn singularize_handles_regular_suffixes() {
        assert_eq!(singularize("products"), "product");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("branches"), "branch");
        assert_eq!(singularize("wolves"), "wolf");
        assert_eq!(singularize("knives"), "knife");
        assert_eq!(singularize("heroes"), "hero");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("analyses"), "analysis");
        assert_eq!(singularize("matrices"), "matrix");
        assert_eq!(singularize("indices"), "index");
        assert_eq!(singularize("quizzes"), "quiz");
        assert_eq!(singularize("movies"), "movie");
    }

    #[test]
    fn singularize_handles_irregular_and_uncountable_words() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("children"), "child");
        assert_eq!(singularize("mice"), "mouse");
        assert_eq!(singularize("oxen"), "ox");
        assert_eq!(singularize("sheep"), "sheep");
        assert_eq!(singularize("series"), "series");
        assert_eq!(singularize("news"), "news");
        assert_eq!(singularize("People"), "Person");
    }

    #[test]
    fn singularize_only_inflects_the_last_snake_case_word() {
        assert_eq!(singularize("product_tags"), "product_tag");
        assert_eq!(singularize("product_categories"), "product_category");
        assert_eq!(singularize("sales_people"), "sales_person");
        assert_eq!(singularize("news_items"), "news_item");
    }

    #[test]
    fn singularize_leaves_singular_words_alone() {
        assert_eq!(singularize("product"), "product");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize(""), "");
    }

    #[test]
    fn primary_key_follows_singular_id_convention() {
        assert_eq!(primary_key_from_table_name("products"), "product_id");
        assert_eq!(primary_key_from_table_name("categories"), "category_id");
        assert_eq!(primary_key_from_table_name("people"), "person_id");
    }
}
