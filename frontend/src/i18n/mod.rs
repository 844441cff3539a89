pub mod uz;

pub use uz as current;

pub fn fill_one(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

pub fn fill_two(
    template: &str,
    first: impl std::fmt::Display,
    second: impl std::fmt::Display,
) -> String {
    match template.split_once("{}") {
        Some((head, tail)) => format!("{head}{first}{}", fill_one(tail, second)),
        None => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_fill_in_order() {
        assert_eq!(fill_one(current::pages::PAGE_LABEL_TEMPLATE, 7), "Sahifa 7");
        assert_eq!(
            fill_two(current::dashboard::PUBLISHED_TEMPLATE, "Nashr qilindi", 4),
            "✅ Nashr qilindi (v4)"
        );
    }

    #[test]
    fn braces_inside_values_are_kept() {
        assert_eq!(fill_two("{} / {}", "{}", "b"), "{} / b");
    }
}
